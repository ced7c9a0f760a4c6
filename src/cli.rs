// CommandFactory is used by tests via Cli::command()
#[allow(unused_imports)]
use clap::CommandFactory;

use clap::{Args, Parser, Subcommand};

use crate::domain::shell::ShellFlags;

/// Initialize arc components
#[derive(Parser, Debug)]
#[command(name = "arc-init", author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize shell completions
    ///
    /// Installs completion scripts for bash, zsh, fish, and PowerShell.
    /// By default, detects your current shell from the SHELL environment variable.
    ///
    /// Idempotent: running multiple times is safe. Existing files are not
    /// overwritten unless --force is used. RC file blocks are added once and
    /// not duplicated; with --force an existing block is rewritten in place.
    #[command(after_help = "Examples:
  arc-init shell
  arc-init shell --all
  arc-init shell --bash --zsh
  arc-init shell --write-rc
  arc-init shell --uninstall-rc")]
    Shell(ShellArgs),
}

/// Arguments for `arc-init shell`
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ShellArgs {
    /// Install bash completion
    #[arg(long)]
    pub bash: bool,
    /// Install zsh completion
    #[arg(long)]
    pub zsh: bool,
    /// Install fish completion
    #[arg(long)]
    pub fish: bool,
    /// Install PowerShell completion
    #[arg(long)]
    pub powershell: bool,
    /// Install completions for all supported shells
    #[arg(long)]
    pub all: bool,
    /// Overwrite existing completion files and rewrite an existing RC block
    #[arg(short, long)]
    pub force: bool,
    /// Append idempotent RC lines to enable completions
    #[arg(long)]
    pub write_rc: bool,
    /// Remove RC lines previously added by arc-init
    #[arg(long)]
    pub uninstall_rc: bool,
}

impl ShellArgs {
    #[must_use]
    pub const fn shell_flags(&self) -> ShellFlags {
        ShellFlags {
            bash: self.bash,
            zsh: self.zsh,
            fish: self.fish,
            powershell: self.powershell,
            all: self.all,
        }
    }
}
