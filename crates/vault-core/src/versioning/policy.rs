//! Amend-or-append commit policy
//!
//! Rapid edits by one actor are collapsed into a single revision: when the
//! head revision was authored by the same actor within the amend window, the
//! head is rewritten instead of extended. A different actor never amends
//! someone else's revision.

use chrono::{DateTime, Duration, Utc};
use vault_git::{Actor, Revision, RevisionId, VersionStore};

use super::{VersioningManager, staging};
use crate::Result;

/// Time window in which the head revision may be amended.
///
/// Zero or negative disables amending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmendWindow(i64);

impl AmendWindow {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn disabled() -> Self {
        Self(0)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn is_enabled(&self) -> bool {
        self.0 > 0
    }

    /// Whether a head revision `elapsed` old is still inside the window.
    ///
    /// A head stamped in the future (clock skew) counts as inside.
    pub fn allows(&self, elapsed: Duration) -> bool {
        self.is_enabled() && elapsed <= Duration::milliseconds(self.0)
    }
}

/// What to do with a non-empty stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitAction {
    Append,
    Amend,
}

/// Result of [`VersioningManager::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was staged; history untouched
    Unchanged,
    /// A new revision was added
    Appended(RevisionId),
    /// The head revision was replaced
    Amended(RevisionId),
}

impl CommitOutcome {
    pub fn revision(&self) -> Option<&RevisionId> {
        match self {
            Self::Unchanged => None,
            Self::Appended(id) | Self::Amended(id) => Some(id),
        }
    }
}

/// Decide between amending `head` and appending a new revision.
pub fn decide(
    head: Option<&Revision>,
    actor: &Actor,
    now: DateTime<Utc>,
    window: AmendWindow,
) -> CommitAction {
    match head {
        Some(head) if head.author == *actor && window.allows(now - head.timestamp) => {
            CommitAction::Amend
        }
        _ => CommitAction::Append,
    }
}

impl<S: VersionStore> VersioningManager<S> {
    /// Record the current working tree as an edit by the current actor.
    ///
    /// Does nothing when the tree already matches the head revision.
    /// Otherwise amends the head (same actor, inside the amend window) or
    /// appends a new revision. On failure the index is reset and the error
    /// is returned; nothing is retried.
    pub fn commit(&mut self, message: &str) -> Result<CommitOutcome> {
        let requested = self.identity.current_actor();
        let window = self.amend_window;
        let (store, ignore) = self.store_and_policy()?;
        // compare against authors as the store records them
        let actor = store.canonical_actor(&requested)?;

        let outcome = staging::atomically(store, |store| {
            staging::sync_index(store, ignore)?;
            if !store.has_staged_changes()? {
                return Ok(CommitOutcome::Unchanged);
            }

            let now = Utc::now();
            let head = store.head()?;
            match decide(head.as_ref(), &actor, now, window) {
                CommitAction::Amend => Ok(CommitOutcome::Amended(
                    store.amend_head(message, &actor, now)?,
                )),
                CommitAction::Append => Ok(CommitOutcome::Appended(
                    store.commit_new(message, &actor, now)?,
                )),
            }
        })?;

        match &outcome {
            CommitOutcome::Unchanged => {
                tracing::debug!(actor = %actor, "Nothing to commit");
            }
            CommitOutcome::Appended(id) => {
                tracing::info!(
                    revision = %id.short(),
                    actor = %actor,
                    "Recorded configuration change"
                );
            }
            CommitOutcome::Amended(id) => {
                tracing::info!(
                    revision = %id.short(),
                    actor = %actor,
                    "Amended previous configuration change"
                );
            }
        }
        Ok(outcome)
    }
}
