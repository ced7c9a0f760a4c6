//! Shell command - Install completion scripts and RC blocks

use anyhow::Result;
use std::io::{self, Write};

use crate::cli::ShellArgs;
use crate::color;
use crate::config::Config;
use crate::domain::paths::ShellEnv;
use crate::domain::shell::{select_shells, ShellKind};
use crate::domain::status::{write_report, ShellStatus};
use crate::integrations::generator::{ClapGenerator, CompletionGenerator};
use crate::service::{RcAction, SetupOptions, SetupService};

/// Set up shell completions
///
/// Per-shell failures are logged to stderr and summarized in the report; they
/// never make the command fail.
///
/// # Errors
/// Returns an error if:
/// - The config file exists but cannot be read or parsed
/// - The status report cannot be written to stdout
pub fn cmd_shell(args: &ShellArgs, color_mode: color::ColorMode) -> Result<()> {
    let env = ShellEnv::from_process();
    let config = Config::load(&env)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_shell_setup(args, &env, &config, ClapGenerator, color_mode, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Run shell setup against an explicit environment and generator
///
/// # Errors
/// Returns an error if the status report cannot be written
pub fn run_shell_setup<G, W>(
    args: &ShellArgs,
    env: &ShellEnv,
    config: &Config,
    generator: G,
    color_mode: color::ColorMode,
    out: &mut W,
) -> Result<Vec<ShellStatus>>
where
    G: CompletionGenerator,
    W: Write,
{
    let shells = select_shells(
        args.shell_flags(),
        env.shell.as_deref(),
        &config.shell.fallback,
    );

    if shells.is_empty() {
        eprintln!(
            "{}",
            color::warn(color_mode, "No shells selected; nothing to do")
        );
        return Ok(Vec::new());
    }

    eprintln!(
        "{}",
        color::info(
            color_mode,
            format!("Setting up {}", shell_list(&shells, color_mode))
        )
    );

    let options = SetupOptions {
        force: args.force,
        rc: RcAction::from_flags(args.write_rc || config.shell.write_rc, args.uninstall_rc),
    };

    let service = SetupService::new(env, generator);
    let statuses = service.run(&shells, options);

    let mut failures = 0;
    for status in &statuses {
        for err in &status.errors {
            eprintln!("{}", color::error(color_mode, err));
            failures += 1;
        }
    }

    write_report(out, &statuses, service.home())?;

    if failures == 0 {
        eprintln!("{}", color::success(color_mode, "Shell setup complete"));
    } else {
        let noun = if failures == 1 {
            "operation"
        } else {
            "operations"
        };
        eprintln!(
            "{}",
            color::warn(
                color_mode,
                format!(
                    "{failures} shell {noun} failed {}",
                    color::dim(color_mode, "(see errors above)")
                )
            )
        );
    }

    Ok(statuses)
}

fn shell_list(shells: &[ShellKind], color_mode: color::ColorMode) -> String {
    shells
        .iter()
        .map(|shell| color_mode.colorize_shell(shell.name()))
        .collect::<Vec<_>>()
        .join(", ")
}
