//! Commit command implementation

use colored::Colorize;
use vault_core::CommitOutcome;

use crate::context::{VaultContext, resolve_actor};
use crate::error::{CliError, Result};

/// Run the commit command
pub fn run_commit(
    context: &VaultContext,
    message: &str,
    author: Option<&str>,
    email: Option<&str>,
    amend_timeout: Option<i64>,
) -> Result<()> {
    if !context.is_initialized() {
        return Err(CliError::user(format!(
            "{} has no history yet; run `vault init` first",
            context.root
        )));
    }

    let actor = resolve_actor(author, email);
    let mut manager = context.manager(actor.clone());
    if let Some(millis) = amend_timeout {
        manager.set_amend_timeout(millis);
    }

    manager.open()?;
    let outcome = manager.commit(message)?;
    manager.destroy()?;

    match outcome {
        CommitOutcome::Unchanged => println!("{} Nothing to commit", "=".dimmed()),
        CommitOutcome::Appended(id) => println!(
            "{} Recorded revision {} by {}",
            "+".green(),
            id.short().yellow(),
            actor
        ),
        CommitOutcome::Amended(id) => println!(
            "{} Amended revision {} by {}",
            "~".cyan(),
            id.short().yellow(),
            actor
        ),
    }
    Ok(())
}
