//! Index synchronization

use vault_git::VersionStore;

use crate::{IgnorePolicy, Result};

/// What [`sync_index`] changed in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSummary {
    /// Added, modified or newly tracked paths
    pub staged: Vec<String>,
    /// Paths dropped from the next revision
    pub removed: Vec<String>,
    /// Untracked paths left alone by the ignore policy
    pub ignored: usize,
}

impl StageSummary {
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }
}

/// Mirror the working tree into the index.
///
/// Stages every added, modified and non-ignored untracked path and removes
/// every deleted one, so that a revision recorded right afterwards matches
/// the files on disk minus ignored content.
pub fn sync_index<S: VersionStore + ?Sized>(
    store: &mut S,
    ignore: &IgnorePolicy,
) -> Result<StageSummary> {
    let status = store.diff_working_tree()?;
    let mut summary = StageSummary::default();

    summary.staged.extend(status.added);
    summary.staged.extend(status.modified);
    for path in status.untracked {
        if ignore.is_ignored(&path) {
            summary.ignored += 1;
        } else {
            summary.staged.push(path);
        }
    }
    summary.removed.extend(status.removed);

    if !summary.staged.is_empty() {
        store.stage(&summary.staged)?;
    }
    if !summary.removed.is_empty() {
        store.unstage(&summary.removed)?;
    }

    tracing::debug!(
        staged = summary.staged.len(),
        removed = summary.removed.len(),
        ignored = summary.ignored,
        "Synchronized index with working tree"
    );
    Ok(summary)
}

/// Run `op` against the store, resetting the index if it fails.
///
/// Either the whole stage-and-record sequence applies or the index is back at
/// the head revision when the error reaches the caller.
pub(crate) fn atomically<S, T>(store: &mut S, op: impl FnOnce(&mut S) -> Result<T>) -> Result<T>
where
    S: VersionStore + ?Sized,
{
    match op(store) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Err(reset_err) = store.reset_index() {
                tracing::warn!(
                    error = %reset_err,
                    "Failed to reset index after aborted versioning operation"
                );
            }
            Err(err)
        }
    }
}
