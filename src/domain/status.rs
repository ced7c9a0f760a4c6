//! Per-shell operation outcomes and the final status report

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::paths::display_path;
use super::shell::ShellKind;

/// Result of writing a completion file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Script generated at this path
    Written(PathBuf),
    /// File already existed and overwrite was not requested
    Skipped(PathBuf),
}

/// Result of an RC block operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RcOutcome {
    Added(PathBuf),
    /// Existing block replaced because overwrite was requested
    Updated(PathBuf),
    /// Block already present
    Skipped(PathBuf),
    Removed(PathBuf),
    /// Removal found no well-formed block
    NotPresent(PathBuf),
    /// Shell has no managed startup file
    Unsupported,
}

impl CompletionOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Skipped(path) => path,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Written(_) => None,
            Self::Skipped(_) => Some("already exists, use --force to overwrite"),
        }
    }
}

impl RcOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Added(path)
            | Self::Updated(path)
            | Self::Skipped(path)
            | Self::Removed(path)
            | Self::NotPresent(path) => Some(path),
            Self::Unsupported => None,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Skipped(_) => Some("already present, use --force to update"),
            Self::NotPresent(_) => Some("no managed block found"),
            Self::Unsupported => Some("RC files are only managed for bash and zsh"),
            Self::Added(_) | Self::Updated(_) | Self::Removed(_) => None,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Added(_) => "ADDED",
            Self::Updated(_) => "UPDATED",
            Self::Skipped(_) => "SKIPPED",
            Self::Removed(_) => "REMOVED",
            Self::NotPresent(_) => "NOTHING TO REMOVE",
            Self::Unsupported => "NOT MANAGED",
        }
    }
}

/// Everything that happened to one shell during an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellStatus {
    pub shell: ShellKind,
    pub completion: Option<CompletionOutcome>,
    pub rc: Option<RcOutcome>,
    /// Errors prefixed with the stage that produced them
    pub errors: Vec<String>,
}

impl ShellStatus {
    #[must_use]
    pub const fn new(shell: ShellKind) -> Self {
        Self {
            shell,
            completion: None,
            rc: None,
            errors: Vec::new(),
        }
    }

    /// Record a failed stage; the message keeps the full error chain
    pub fn record_error(&mut self, stage: &str, err: &anyhow::Error) {
        self.errors.push(format!("{stage}: {err:#}"));
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Most relevant human-readable reason, RC outcome first
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        self.rc
            .as_ref()
            .and_then(RcOutcome::reason)
            .or_else(|| self.completion.as_ref().and_then(CompletionOutcome::reason))
    }
}

/// Write the status summary
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn write_report<W: Write>(
    out: &mut W,
    statuses: &[ShellStatus],
    home: Option<&Path>,
) -> io::Result<()> {
    if statuses.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "=== Shell Completions Status ===")?;
    writeln!(out)?;

    for status in statuses {
        writeln!(out, "{}:", status.shell.name().to_uppercase())?;

        match &status.completion {
            Some(CompletionOutcome::Written(path)) => writeln!(
                out,
                "  Completions: INSTALLED ({})",
                display_path(path, home)
            )?,
            Some(outcome @ CompletionOutcome::Skipped(path)) => writeln!(
                out,
                "  Completions: SKIPPED ({}: {})",
                outcome.reason().unwrap_or_default(),
                display_path(path, home)
            )?,
            None => writeln!(out, "  Completions: FAILED")?,
        }

        if let Some(rc) = &status.rc {
            match (rc.path(), rc.reason()) {
                (Some(path), Some(reason)) => writeln!(
                    out,
                    "  RC block: {} ({reason}: {})",
                    rc.label(),
                    display_path(path, home)
                )?,
                (Some(path), None) => writeln!(
                    out,
                    "  RC block: {} ({})",
                    rc.label(),
                    display_path(path, home)
                )?,
                (None, Some(reason)) => writeln!(out, "  RC block: {} ({reason})", rc.label())?,
                (None, None) => writeln!(out, "  RC block: {}", rc.label())?,
            }
        }

        for err in &status.errors {
            writeln!(out, "  Error: {err}")?;
        }

        writeln!(out)?;
    }

    writeln!(out, "Next steps:")?;
    writeln!(out, "  - If completions are not working, restart your shell")?;
    writeln!(out, "  - Use --force to overwrite existing files")?;
    writeln!(out, "  - Use --write-rc to update shell RC files")?;

    Ok(())
}
