//! Clean-state evaluation
//!
//! Read-only: nothing here stages or records anything.

use vault_git::{VersionStore, WorkingTreeStatus};

use super::VersioningManager;
use crate::{IgnorePolicy, Result};

/// Whether `status` describes a tree in sync with its last revision.
///
/// Tracked paths must be unchanged and every untracked path must be ignored.
pub fn is_clean(status: &WorkingTreeStatus, ignore: &IgnorePolicy) -> bool {
    status.tracked_is_empty() && status.untracked.iter().all(|p| ignore.is_ignored(p))
}

/// Working-tree status with ignored untracked paths filtered out.
pub fn visible_status<S: VersionStore + ?Sized>(
    store: &S,
    ignore: &IgnorePolicy,
) -> Result<WorkingTreeStatus> {
    let mut status = store.diff_working_tree()?;
    status.retain_untracked(|path| !ignore.is_ignored(path));
    Ok(status)
}

impl<S: VersionStore> VersioningManager<S> {
    /// Whether the working tree matches the last revision.
    ///
    /// Computed fresh on every call.
    pub fn is_clean(&self) -> Result<bool> {
        let store = self.open_store_ref()?;
        let status = store.diff_working_tree()?;
        Ok(is_clean(&status, &self.ignore))
    }
}
