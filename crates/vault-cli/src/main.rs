//! Configuration Vault CLI
//!
//! Operator interface for the change history of a configuration directory.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::VaultContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow(), e);
    }
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command else {
        println!("{} Configuration Vault", "vault".green().bold());
        println!();
        println!("Run {} for available commands.", "vault --help".cyan());
        return Ok(());
    };

    let context = VaultContext::resolve(&cli.root, cli.config.as_deref())?;
    execute_command(&context, command)
}

fn execute_command(context: &VaultContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init => commands::run_init(context),
        Commands::Commit {
            message,
            author,
            email,
            amend_timeout,
        } => commands::run_commit(
            context,
            &message,
            author.as_deref(),
            email.as_deref(),
            amend_timeout,
        ),
        Commands::Status { json } => commands::run_status(context, json),
        Commands::Log { json, limit } => commands::run_log(context, json, limit),
    }
}
