//! Status command implementation

use std::collections::BTreeSet;

use colored::{ColoredString, Colorize};
use serde::Serialize;
use vault_git::WorkingTreeStatus;

use super::print_not_initialized;
use crate::context::VaultContext;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct StatusReport {
    root: String,
    initialized: bool,
    clean: bool,
    revisions: usize,
    #[serde(flatten)]
    status: WorkingTreeStatus,
}

/// Run the status command
pub fn run_status(context: &VaultContext, json: bool) -> Result<()> {
    if !context.is_initialized() {
        if json {
            let report = StatusReport {
                root: context.root.to_string(),
                initialized: false,
                clean: false,
                revisions: 0,
                status: WorkingTreeStatus::default(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_not_initialized(context);
        }
        return Ok(());
    }

    let mut manager = context.reader();
    manager.open()?;
    let report = StatusReport {
        root: context.root.to_string(),
        initialized: true,
        clean: manager.is_clean()?,
        revisions: manager.get_commit_count()?,
        status: manager.status()?,
    };
    manager.destroy()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Vault Status".bold());
    println!();
    println!("{}:        {}", "Root".dimmed(), report.root);
    println!("{}:   {}", "Revisions".dimmed(), report.revisions);
    if report.clean {
        println!("{}:       {}", "State".dimmed(), "clean".green());
    } else {
        println!("{}:       {}", "State".dimmed(), "dirty".yellow());
    }

    let status = &report.status;
    print_section("Added", &status.added, "A".green());
    print_section("Modified", &status.modified, "M".yellow());
    print_section("Removed", &status.removed, "D".red());
    print_section("Untracked", &status.untracked, "?".dimmed());
    Ok(())
}

fn print_section(title: &str, paths: &BTreeSet<String>, marker: ColoredString) {
    if paths.is_empty() {
        return;
    }
    println!();
    println!("{}:", title.bold());
    for path in paths {
        println!("  {} {}", marker, path);
    }
}
