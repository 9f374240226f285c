//! Version store capability trait

use chrono::{DateTime, Utc};
use vault_fs::NormalizedPath;

use crate::{Actor, Result, Revision, RevisionId, WorkingTreeStatus};

/// The narrow capability the versioning logic needs from an engine.
///
/// Implementations own one underlying resource for one root directory.
/// Every method except [`close`](VersionStore::close) and
/// [`is_closed`](VersionStore::is_closed) fails with
/// [`Error::Closed`](crate::Error::Closed) once the store has been released.
///
/// Stores are not synchronized: callers serialize mutating calls against a
/// single root.
pub trait VersionStore {
    /// Root of the working tree this store versions
    fn root(&self) -> &NormalizedPath;

    /// `actor` exactly as this store would record it as an author.
    fn canonical_actor(&self, actor: &Actor) -> Result<Actor> {
        Ok(actor.clone())
    }

    /// Add the current on-disk content of `paths` to the next revision.
    fn stage(&mut self, paths: &[String]) -> Result<()>;

    /// Remove `paths` from the next revision.
    fn unstage(&mut self, paths: &[String]) -> Result<()>;

    /// Whether the next revision would differ from the head revision.
    fn has_staged_changes(&self) -> Result<bool>;

    /// Discard staged changes, resetting the index to the head revision.
    fn reset_index(&mut self) -> Result<()>;

    /// Append a revision on top of the head.
    fn commit_new(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId>;

    /// Rewrite the head revision in place with the staged content, keeping
    /// its parent link.
    fn amend_head(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId>;

    /// Differences between the working tree and the head revision.
    ///
    /// The store's own metadata never appears in the result.
    fn diff_working_tree(&self) -> Result<WorkingTreeStatus>;

    /// All revisions, oldest first.
    fn history(&self) -> Result<Vec<Revision>>;

    /// The most recent revision, if any.
    fn head(&self) -> Result<Option<Revision>> {
        Ok(self.history()?.pop())
    }

    fn revision_count(&self) -> Result<usize> {
        Ok(self.history()?.len())
    }

    /// Release the underlying resource.
    ///
    /// Idempotent: only the first call releases anything.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;
}
