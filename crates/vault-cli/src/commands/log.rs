//! Log command implementation

use colored::Colorize;

use super::print_not_initialized;
use crate::context::VaultContext;
use crate::error::Result;

/// Run the log command
pub fn run_log(context: &VaultContext, json: bool, limit: Option<usize>) -> Result<()> {
    let initialized = context.is_initialized();
    let mut revisions = if initialized {
        let mut manager = context.reader();
        manager.open()?;
        let revisions = manager.revisions()?;
        manager.destroy()?;
        revisions
    } else {
        Vec::new()
    };
    revisions.reverse();
    if let Some(limit) = limit {
        revisions.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&revisions)?);
        return Ok(());
    }
    if !initialized {
        print_not_initialized(context);
        return Ok(());
    }

    for revision in &revisions {
        println!(
            "{} {} {}",
            revision.id.short().yellow(),
            revision.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            revision.author.to_string().cyan()
        );
        println!("    {}", revision.message);
    }
    Ok(())
}
