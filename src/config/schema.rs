//! Configuration schema and type definitions

use serde::{Deserialize, Serialize};

use crate::domain::shell::ShellKind;

/// Configuration for arc-init
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Shell setup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Shells to set up when none are selected and `$SHELL` is unrecognised
    #[serde(default = "default_fallback")]
    pub fallback: Vec<ShellKind>,
    /// Always add RC blocks, as if `--write-rc` were given
    #[serde(default)]
    pub write_rc: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            write_rc: false,
        }
    }
}

fn default_fallback() -> Vec<ShellKind> {
    vec![ShellKind::Bash, ShellKind::Zsh]
}
