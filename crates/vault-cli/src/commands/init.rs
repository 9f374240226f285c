//! Init command implementation

use colored::Colorize;

use crate::context::VaultContext;
use crate::error::Result;

/// Run the init command
pub fn run_init(context: &VaultContext) -> Result<()> {
    let mut manager = context.reader();
    let recorded = manager.initialize()?;
    let count = manager.get_commit_count()?;
    manager.destroy()?;

    match recorded {
        Some(id) => println!(
            "{} Recorded revision {} in {}",
            "+".green(),
            id.short().yellow(),
            context.root
        ),
        None => println!("{} Already up to date", "=".dimmed()),
    }
    println!("{}: {}", "Revisions".dimmed(), count);
    Ok(())
}
