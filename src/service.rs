#![allow(clippy::missing_errors_doc)]
use anyhow::Result;
use std::path::Path;

use crate::completions::write_completion;
use crate::domain::paths::{rc_path, CompletionTarget, ShellEnv};
use crate::domain::shell::ShellKind;
use crate::domain::status::{CompletionOutcome, RcOutcome, ShellStatus};
use crate::integrations::generator::CompletionGenerator;
use crate::rc_block::{self, RcBlock};

/// What to do with shell startup files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RcAction {
    #[default]
    None,
    Install,
    Remove,
}

impl RcAction {
    /// Resolve the RC flags; removal wins when both are set
    #[must_use]
    pub const fn from_flags(write_rc: bool, uninstall_rc: bool) -> Self {
        if uninstall_rc {
            Self::Remove
        } else if write_rc {
            Self::Install
        } else {
            Self::None
        }
    }
}

/// Options shared by every shell in one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetupOptions {
    pub force: bool,
    pub rc: RcAction,
}

/// Shell setup service that coordinates completion files and RC blocks
pub struct SetupService<'a, G>
where
    G: CompletionGenerator,
{
    env: &'a ShellEnv,
    generator: G,
}

impl<'a, G> SetupService<'a, G>
where
    G: CompletionGenerator,
{
    pub const fn new(env: &'a ShellEnv, generator: G) -> Self {
        Self { env, generator }
    }

    /// Process every shell in order
    ///
    /// Failures are recorded on each shell's status and never stop the
    /// remaining shells.
    pub fn run(&self, shells: &[ShellKind], options: SetupOptions) -> Vec<ShellStatus> {
        shells
            .iter()
            .map(|&shell| self.setup_shell(shell, options))
            .collect()
    }

    /// Write the completion file and apply the RC action for one shell
    pub fn setup_shell(&self, shell: ShellKind, options: SetupOptions) -> ShellStatus {
        let mut status = ShellStatus::new(shell);

        let target = match CompletionTarget::resolve(shell, self.env) {
            Ok(target) => Some(target),
            Err(err) => {
                status.record_error(&format!("{shell} completion"), &err);
                None
            }
        };

        if let Some(target) = &target {
            match self.write_completion(shell, target, options.force) {
                Ok(outcome) => status.completion = Some(outcome),
                Err(err) => status.record_error(&format!("{shell} completion"), &err),
            }
        }

        match options.rc {
            RcAction::None => {}
            RcAction::Install => match self.install_rc(shell, target.as_ref(), options.force) {
                Ok(outcome) => status.rc = outcome,
                Err(err) => status.record_error(&format!("{shell} RC"), &err),
            },
            RcAction::Remove => match self.remove_rc(shell) {
                Ok(outcome) => status.rc = Some(outcome),
                Err(err) => status.record_error(&format!("remove {shell} RC"), &err),
            },
        }

        status
    }

    fn write_completion(
        &self,
        shell: ShellKind,
        target: &CompletionTarget,
        force: bool,
    ) -> Result<CompletionOutcome> {
        write_completion(&self.generator, shell, target, force)
    }

    /// Add the RC block for `shell`
    ///
    /// Returns `Ok(None)` when the completion target could not be resolved;
    /// that failure is already on the status.
    fn install_rc(
        &self,
        shell: ShellKind,
        target: Option<&CompletionTarget>,
        force: bool,
    ) -> Result<Option<RcOutcome>> {
        let Some(path) = rc_path(shell, self.env)? else {
            return Ok(Some(RcOutcome::Unsupported));
        };
        let Some(target) = target else {
            return Ok(None);
        };
        let Some(block) = RcBlock::for_shell(shell, target, self.env.home.as_deref()) else {
            return Ok(Some(RcOutcome::Unsupported));
        };

        if let Some(parent) = path.parent() {
            // Best-effort; upsert reports the real failure
            let _ = std::fs::create_dir_all(parent);
        }

        rc_block::upsert(&path, &block, force).map(Some)
    }

    fn remove_rc(&self, shell: ShellKind) -> Result<RcOutcome> {
        match rc_path(shell, self.env)? {
            Some(path) => rc_block::remove(&path),
            None => Ok(RcOutcome::Unsupported),
        }
    }

    /// Home directory used for display
    pub fn home(&self) -> Option<&Path> {
        self.env.home.as_deref()
    }
}
