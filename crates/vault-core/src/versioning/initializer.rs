//! History bootstrap and reconciliation with disk

use chrono::Utc;
use vault_git::{RevisionId, VersionStore};

use super::{VersioningManager, staging};
use crate::Result;

/// Message of the first revision of a configuration root.
pub const INITIAL_MESSAGE: &str = "Initializing configuration history";

/// Message of revisions folding in edits made outside the commit API.
pub const EXTERNAL_CHANGES_MESSAGE: &str = "Recording externally made configuration changes";

impl<S: VersionStore> VersioningManager<S> {
    /// Make sure the history exists and matches the files on disk.
    ///
    /// Opens (creating if needed) the version store, stages the working tree
    /// and, if that yields anything, records one system-authored revision:
    /// the initial one for an empty history, otherwise one capturing external
    /// edits. A tree already in sync is left alone, and an empty tree gets no
    /// revision. Safe to call on every startup; afterwards the tree is clean.
    ///
    /// Returns the recorded revision, if any.
    pub fn initialize(&mut self) -> Result<Option<RevisionId>> {
        self.open()?;
        let author = self.system_author.clone();
        let (store, ignore) = self.store_and_policy()?;
        let root = store.root().clone();

        let recorded = staging::atomically(store, |store| {
            let fresh = store.revision_count()? == 0;
            staging::sync_index(store, ignore)?;
            if !store.has_staged_changes()? {
                return Ok(None);
            }

            let message = if fresh {
                INITIAL_MESSAGE
            } else {
                EXTERNAL_CHANGES_MESSAGE
            };
            let id = store.commit_new(message, &author, Utc::now())?;
            Ok(Some((id, fresh)))
        })?;

        match recorded {
            Some((id, true)) => {
                tracing::info!(
                    root = %root,
                    revision = %id.short(),
                    "Initialized configuration history"
                );
                Ok(Some(id))
            }
            Some((id, false)) => {
                tracing::info!(
                    root = %root,
                    revision = %id.short(),
                    "Recorded external configuration changes"
                );
                Ok(Some(id))
            }
            None => {
                tracing::debug!(root = %root, "Configuration history already up to date");
                Ok(None)
            }
        }
    }
}
