#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};
use clap::CommandFactory;
use std::io::Write;

use crate::cli::Cli;
use crate::domain::paths::PROGRAM_NAME;
use crate::domain::shell::ShellKind;

/// Completion script generator interface
pub trait CompletionGenerator {
    /// Write the completion script for `shell` into `out`
    fn generate(&self, shell: ShellKind, out: &mut dyn Write) -> Result<()>;
}

/// Generator backed by `clap_complete` and the arc-init command tree
#[derive(Debug, Default)]
pub struct ClapGenerator;

impl CompletionGenerator for ClapGenerator {
    fn generate(&self, shell: ShellKind, out: &mut dyn Write) -> Result<()> {
        let mut cmd = Cli::command();

        // clap_complete panics on write errors; render in memory first
        let mut script = Vec::new();
        clap_complete::generate(
            clap_complete::Shell::from(shell),
            &mut cmd,
            PROGRAM_NAME,
            &mut script,
        );

        out.write_all(&script)
            .with_context(|| format!("Failed to write {shell} completion script"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: ShellKind) -> String {
        let mut out = Vec::new();
        ClapGenerator.generate(shell, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_script_registers_completion() {
        let script = render(ShellKind::Bash);
        assert!(script.contains("complete -F"));
        assert!(script.contains(PROGRAM_NAME));
    }

    #[test]
    fn test_zsh_script_has_compdef() {
        let script = render(ShellKind::Zsh);
        assert!(script.starts_with("#compdef arc-init"));
    }

    #[test]
    fn test_fish_script_completes_shell_flags() {
        let script = render(ShellKind::Fish);
        assert!(script.contains("complete -c arc-init"));
        assert!(script.contains("write-rc"));
    }

    #[test]
    fn test_powershell_script_registers_completer() {
        let script = render(ShellKind::PowerShell);
        assert!(script.contains("Register-ArgumentCompleter"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let err = ClapGenerator
            .generate(ShellKind::Bash, &mut FailingWriter)
            .unwrap_err();
        assert!(format!("{err:#}").contains("disk full"));
    }
}
