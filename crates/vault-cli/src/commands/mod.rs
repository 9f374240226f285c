//! Command implementations for vault-cli

pub mod commit;
pub mod init;
pub mod log;
pub mod status;

pub use commit::run_commit;
pub use init::run_init;
pub use log::run_log;
pub use status::run_status;

use colored::Colorize;

use crate::context::VaultContext;

/// Hint printed by read-only commands on a root without history.
fn print_not_initialized(context: &VaultContext) {
    println!("{}", "Not initialized".red().bold());
    println!();
    println!("{}:   {}", "Root".dimmed(), context.root);
    println!("Run {} to create the history.", "vault init".cyan());
}
