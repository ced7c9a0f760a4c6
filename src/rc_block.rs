//! RC block management
//!
//! Maintains a single marker-delimited block inside a shell startup file.
//! Presence is a literal substring check for both markers; the first start
//! marker and the first end marker bound the block.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::domain::paths::{shell_quoted_path, CompletionTarget, PROGRAM_NAME};
use crate::domain::shell::ShellKind;
use crate::domain::status::RcOutcome;

/// First line of the managed block
pub const MARKER_START: &str = "# >>> arc-init >>>";
/// Last line of the managed block
pub const MARKER_END: &str = "# <<< arc-init <<<";

const BACKUP_SUFFIX: &str = ".arc-init.bak";

/// A managed block: start marker, payload lines, end marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcBlock {
    payload: Vec<String>,
}

impl RcBlock {
    #[must_use]
    pub const fn new(payload: Vec<String>) -> Self {
        Self { payload }
    }

    /// Block that loads the completion script at `target`
    ///
    /// Returns `None` for shells without RC management.
    #[must_use]
    pub fn for_shell(shell: ShellKind, target: &CompletionTarget, home: Option<&Path>) -> Option<Self> {
        let payload = match shell {
            ShellKind::Bash => {
                let script = shell_quoted_path(&target.path(), home);
                vec![
                    format!("# {PROGRAM_NAME} bash completions"),
                    format!("if [ -f \"{script}\" ]; then"),
                    format!("  . \"{script}\""),
                    "fi".to_string(),
                ]
            }
            ShellKind::Zsh => {
                let dir = shell_quoted_path(&target.dir, home);
                vec![
                    format!("# {PROGRAM_NAME} zsh completions"),
                    format!("fpath+=(\"{dir}\")"),
                    "autoload -Uz compinit".to_string(),
                    "compinit".to_string(),
                ]
            }
            ShellKind::Fish | ShellKind::PowerShell => return None,
        };

        Some(Self::new(payload))
    }

    /// Render the block, terminated by a newline
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(MARKER_START);
        out.push('\n');
        for line in &self.payload {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(MARKER_END);
        out.push('\n');
        out
    }
}

/// Whether both markers occur anywhere in `content`
#[must_use]
pub fn contains_block(content: &[u8]) -> bool {
    find_bytes(content, MARKER_START).is_some() && find_bytes(content, MARKER_END).is_some()
}

fn find_bytes(haystack: &[u8], needle: &str) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_bytes())
}

/// Byte range from the first start marker through the first end marker
///
/// `None` if either marker is missing or the end marker comes first.
fn find_block(content: &[u8]) -> Option<Range<usize>> {
    let start = find_bytes(content, MARKER_START)?;
    let end = find_bytes(content, MARKER_END)?;
    if end < start {
        return None;
    }
    Some(start..end + MARKER_END.len())
}

/// Sibling path that receives a copy of the RC file before the first edit
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Insert `block` into the RC file at `path`
///
/// - Markers already present: nothing changes, unless `overwrite` is set, in
///   which case the existing block is replaced in place.
/// - Markers absent: the block is appended after a blank line. Without
///   `overwrite` the original content is first copied to [`backup_path`].
///
/// The file is handled as raw bytes; only the markers need to be ASCII.
/// The parent directory must already exist.
///
/// # Errors
/// Returns an error if the RC file cannot be read or written
pub fn upsert(path: &Path, block: &RcBlock, overwrite: bool) -> Result<RcOutcome> {
    let existing = match fs::read(path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read RC file: {}", path.display()));
        }
    };

    let rendered = block.render();
    let current = existing.as_deref().unwrap_or_default();

    if existing.is_some() {
        if contains_block(current) {
            if !overwrite {
                return Ok(RcOutcome::Skipped(path.to_path_buf()));
            }
            let Some(span) = find_block(current) else {
                return Ok(RcOutcome::Skipped(path.to_path_buf()));
            };

            let mut updated = Vec::with_capacity(current.len() + rendered.len());
            updated.extend_from_slice(&current[..span.start]);
            updated.extend_from_slice(rendered.trim_end().as_bytes());
            updated.extend_from_slice(&current[span.end..]);
            fs::write(path, updated)
                .with_context(|| format!("Failed to update RC file: {}", path.display()))?;
            return Ok(RcOutcome::Updated(path.to_path_buf()));
        }

        if !overwrite {
            // Best-effort; a failed backup must not block the edit
            let _ = fs::write(backup_path(path), current);
        }
    }

    let separator = if current.is_empty() || current.ends_with(b"\n") {
        "\n"
    } else {
        "\n\n"
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open RC file: {}", path.display()))?;
    file.write_all(format!("{separator}{rendered}").as_bytes())
        .with_context(|| format!("Failed to append to RC file: {}", path.display()))?;

    Ok(RcOutcome::Added(path.to_path_buf()))
}

/// Remove the managed block from the RC file at `path`
///
/// A file without a well-formed block is left byte-for-byte unchanged and
/// [`RcOutcome::NotPresent`] is returned. Otherwise the block is cut out, the
/// rest is trimmed of ASCII whitespace and written back with a single
/// trailing newline.
///
/// # Errors
/// Returns an error if the RC file cannot be read or written
pub fn remove(path: &Path) -> Result<RcOutcome> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read RC file: {}", path.display()))?;

    let Some(span) = find_block(&content) else {
        return Ok(RcOutcome::NotPresent(path.to_path_buf()));
    };

    let mut remaining = content[..span.start].to_vec();
    remaining.extend_from_slice(&content[span.end..]);
    let mut updated = remaining.trim_ascii().to_vec();
    updated.push(b'\n');
    fs::write(path, updated)
        .with_context(|| format!("Failed to write RC file: {}", path.display()))?;

    Ok(RcOutcome::Removed(path.to_path_buf()))
}
