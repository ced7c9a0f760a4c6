//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::Path;

use super::schema::Config;
use crate::domain::paths::ShellEnv;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file for `env`, falling back to defaults
    ///
    /// Location: `<config-root>/arc-init/config.toml`, where the config root
    /// is `XDG_CONFIG_HOME` or `~/.config`.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed
    pub fn load(env: &ShellEnv) -> Result<Self> {
        match env.config_file() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}
