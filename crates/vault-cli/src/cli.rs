//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Configuration Vault - change history for a configuration directory
#[derive(Parser, Debug)]
#[command(name = "vault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration root directory
    #[arg(long, global = true, env = "VAULT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Settings file (defaults to <root>/vault.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the history, or record changes made outside the vault
    ///
    /// Safe to run repeatedly: a clean tree records nothing.
    Init,

    /// Record the current tree on behalf of an author
    ///
    /// Consecutive commits by the same author within the amend window
    /// replace the previous revision instead of adding one.
    Commit {
        /// Revision message
        #[arg(short, long)]
        message: String,

        /// Author name (defaults to $VAULT_AUTHOR, then $USER)
        #[arg(long)]
        author: Option<String>,

        /// Author email (defaults to the author name)
        #[arg(long)]
        email: Option<String>,

        /// Override the amend window in milliseconds
        #[arg(long, allow_hyphen_values = true)]
        amend_timeout: Option<i64>,
    },

    /// Show differences between the tree and the last revision
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List recorded revisions, newest first
    Log {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Show at most this many revisions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}
