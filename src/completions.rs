//! Completion file writer
//!
//! Writes one completion script per shell. An existing file is never touched
//! unless overwrite was requested.

use anyhow::{Context, Result};
use std::fs;

use crate::domain::paths::CompletionTarget;
use crate::domain::shell::ShellKind;
use crate::domain::status::CompletionOutcome;
use crate::integrations::generator::CompletionGenerator;

/// Write the completion script for `shell` to `target`
///
/// The target directory is always created first. When the file already
/// exists and `overwrite` is false nothing is written and
/// [`CompletionOutcome::Skipped`] is returned. The script is rendered in
/// memory, so a failed generation leaves no file behind.
///
/// # Errors
/// Returns an error if:
/// - The target directory cannot be created
/// - The file cannot be created or written
/// - The generator fails
pub fn write_completion<G: CompletionGenerator + ?Sized>(
    generator: &G,
    shell: ShellKind,
    target: &CompletionTarget,
    overwrite: bool,
) -> Result<CompletionOutcome> {
    fs::create_dir_all(&target.dir).with_context(|| {
        format!(
            "Failed to create completion directory: {}",
            target.dir.display()
        )
    })?;

    let path = target.path();
    if !overwrite && path.exists() {
        return Ok(CompletionOutcome::Skipped(path));
    }

    let mut script = Vec::new();
    generator
        .generate(shell, &mut script)
        .with_context(|| format!("Failed to generate {shell} completions"))?;
    fs::write(&path, script)
        .with_context(|| format!("Failed to write completion file: {}", path.display()))?;

    Ok(CompletionOutcome::Written(path))
}
