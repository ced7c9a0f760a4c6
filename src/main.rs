use anyhow::Result;
use clap::Parser;

use arc_init::cli::{Cli, Commands};
use arc_init::{color, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);

    match cli.command {
        Commands::Shell(args) => commands::shell::cmd_shell(&args, color_mode),
    }
}
