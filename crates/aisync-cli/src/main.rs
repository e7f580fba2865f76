//! AI Config Sync CLI
//!
//! The command-line interface for projecting the `.ai/` source tree into
//! per-tool configuration layouts.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} AI Config Sync", "aisync".green().bold());
            println!();
            println!("Run {} for available commands.", "aisync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Sync { targets, init_dirs } => {
            commands::run_sync(&cwd, &targets, init_dirs)
        }
        Commands::Targets => commands::run_targets(),
        Commands::Render {
            command,
            kind,
            data,
            tool,
            init,
        } => commands::run_render(&cwd, &command, kind.as_deref(), data.as_deref(), &tool, init),
    }
}
