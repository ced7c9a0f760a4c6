//! Shell kinds and shell selection
//!
//! Decides which shells an invocation touches: explicit flags first, then
//! `--all`, then detection from `$SHELL`, then the configured fallback list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported shells, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    #[serde(alias = "pwsh")]
    PowerShell,
}

impl ShellKind {
    /// Every shell, in the order they are processed
    pub const ALL: [Self; 4] = [Self::Bash, Self::Zsh, Self::Fish, Self::PowerShell];

    /// Lowercase name used in messages and config files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::PowerShell => "powershell",
        }
    }

    /// Whether this shell has a managed RC block
    ///
    /// Only bash and zsh startup files are edited; fish and powershell get a
    /// completion file and nothing else.
    #[must_use]
    pub const fn supports_rc(self) -> bool {
        matches!(self, Self::Bash | Self::Zsh)
    }

    /// Detect a shell from the value of `$SHELL` (substring match, zsh first)
    #[must_use]
    pub fn detect(shell_var: &str) -> Option<Self> {
        if shell_var.contains("zsh") {
            return Some(Self::Zsh);
        }
        if shell_var.contains("bash") {
            return Some(Self::Bash);
        }
        if shell_var.contains("fish") {
            return Some(Self::Fish);
        }
        let lower = shell_var.to_lowercase();
        if lower.contains("powershell") || lower.contains("pwsh") {
            return Some(Self::PowerShell);
        }
        None
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ShellKind> for clap_complete::Shell {
    fn from(kind: ShellKind) -> Self {
        match kind {
            ShellKind::Bash => Self::Bash,
            ShellKind::Zsh => Self::Zsh,
            ShellKind::Fish => Self::Fish,
            ShellKind::PowerShell => Self::PowerShell,
        }
    }
}

/// Shell selection flags as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ShellFlags {
    pub bash: bool,
    pub zsh: bool,
    pub fish: bool,
    pub powershell: bool,
    pub all: bool,
}

impl ShellFlags {
    fn explicit(self) -> Vec<ShellKind> {
        ShellKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ShellKind::Bash => self.bash,
                ShellKind::Zsh => self.zsh,
                ShellKind::Fish => self.fish,
                ShellKind::PowerShell => self.powershell,
            })
            .collect()
    }
}

/// Resolve the shells to process
///
/// The result is always in [`ShellKind::ALL`] order with no duplicates.
#[must_use]
pub fn select_shells(
    flags: ShellFlags,
    shell_var: Option<&str>,
    fallback: &[ShellKind],
) -> Vec<ShellKind> {
    let explicit = flags.explicit();
    if !explicit.is_empty() {
        return explicit;
    }

    if flags.all {
        return ShellKind::ALL.to_vec();
    }

    if let Some(kind) = shell_var.and_then(ShellKind::detect) {
        return vec![kind];
    }

    ShellKind::ALL
        .into_iter()
        .filter(|kind| fallback.contains(kind))
        .collect()
}
