//! Path resolution for completion files and RC files
//!
//! Nothing here reads the process environment except [`ShellEnv::from_process`];
//! every resolver takes the environment as an explicit parameter.

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use super::shell::ShellKind;

/// Program name used for completion file names and generated scripts
pub const PROGRAM_NAME: &str = "arc-init";

/// Environment inputs for path resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellEnv {
    /// User home directory
    pub home: Option<PathBuf>,
    /// Config-root override (`XDG_CONFIG_HOME`), only honoured when absolute
    pub config_home: Option<PathBuf>,
    /// Value of `$SHELL`
    pub shell: Option<String>,
}

impl ShellEnv {
    /// Capture the current process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_vars(
            dirs::home_dir(),
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("SHELL"),
        )
    }

    /// Build an environment from raw variable values
    #[must_use]
    pub fn from_vars(
        home: Option<PathBuf>,
        xdg_config_home: Option<OsString>,
        shell: Option<OsString>,
    ) -> Self {
        let config_home = xdg_config_home
            .map(PathBuf::from)
            .filter(|p| p.is_absolute());
        let shell = shell
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty());

        Self {
            home,
            config_home,
            shell,
        }
    }

    /// Home directory, or an error when it cannot be determined
    ///
    /// # Errors
    /// Returns an error if no home directory is known
    pub fn require_home(&self) -> Result<&Path> {
        self.home.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Could not determine home directory. Please set the HOME environment variable."
            )
        })
    }

    /// Config root: `XDG_CONFIG_HOME` if set, else `~/.config`
    #[must_use]
    pub fn config_root(&self) -> Option<PathBuf> {
        self.config_home
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(".config")))
    }

    /// Path of the arc-init config file
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config_root()
            .map(|root| root.join(PROGRAM_NAME).join("config.toml"))
    }
}

/// Location of a completion script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl CompletionTarget {
    /// Resolve the completion target for a shell
    ///
    /// # Errors
    /// Returns an error if the home directory is needed but unknown
    pub fn resolve(shell: ShellKind, env: &ShellEnv) -> Result<Self> {
        let config_root = || -> Result<PathBuf> {
            match &env.config_home {
                Some(root) => Ok(root.clone()),
                None => Ok(env.require_home()?.join(".config")),
            }
        };

        let target = match shell {
            ShellKind::Bash => Self {
                dir: config_root()?.join("bash").join("completions"),
                file_name: format!("{PROGRAM_NAME}.bash"),
            },
            ShellKind::Zsh => Self {
                dir: env.require_home()?.join(".zsh").join("completions"),
                file_name: format!("_{PROGRAM_NAME}"),
            },
            ShellKind::Fish => Self {
                dir: config_root()?.join("fish").join("completions"),
                file_name: format!("{PROGRAM_NAME}.fish"),
            },
            ShellKind::PowerShell => Self {
                dir: config_root()?.join("powershell"),
                file_name: format!("{PROGRAM_NAME}.ps1"),
            },
        };

        Ok(target)
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Startup file for a shell, `None` for shells without RC management
///
/// bash prefers `~/.bashrc` and falls back to `~/.bash_profile` when the
/// former does not exist.
///
/// # Errors
/// Returns an error if the home directory is unknown
pub fn rc_path(shell: ShellKind, env: &ShellEnv) -> Result<Option<PathBuf>> {
    if !shell.supports_rc() {
        return Ok(None);
    }

    let home = env.require_home()?;
    let path = match shell {
        ShellKind::Bash => {
            let bashrc = home.join(".bashrc");
            if bashrc.exists() {
                bashrc
            } else {
                home.join(".bash_profile")
            }
        }
        _ => home.join(".zshrc"),
    };

    Ok(Some(path))
}

/// Lexically normalize a path by resolving `.` and `..` components
///
/// Does NOT resolve symlinks or touch the filesystem
fn normalize_path_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

fn strip_home<'a>(path: &'a Path, home: Option<&Path>) -> Option<&'a Path> {
    home.and_then(|home| path.strip_prefix(home).ok())
}

/// Convert a path to home-relative display format (`~/...`)
#[must_use]
pub fn display_path(path: &Path, home: Option<&Path>) -> String {
    let normalized = normalize_path_lexically(path);

    if let Some(rel) = strip_home(&normalized, home) {
        let rel_str = rel.display().to_string();
        if rel_str.is_empty() {
            return "~".to_string();
        }
        return format!("~/{rel_str}");
    }
    normalized.display().to_string()
}

/// Render a path for use inside a double-quoted shell string
///
/// Paths under the home directory become `$HOME/...`. Characters that keep
/// their meaning inside double quotes (`"`, `$`, `` ` ``, `\`) are escaped.
#[must_use]
pub fn shell_quoted_path(path: &Path, home: Option<&Path>) -> String {
    let normalized = normalize_path_lexically(path);

    match strip_home(&normalized, home) {
        Some(rel) if rel.as_os_str().is_empty() => "$HOME".to_string(),
        Some(rel) => format!("$HOME/{}", escape_double_quoted(&rel.display().to_string())),
        None => escape_double_quoted(&normalized.display().to_string()),
    }
}

fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '"' | '$' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
