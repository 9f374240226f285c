//! Versioning of a configuration root
//!
//! [`VersioningManager`] composes the pieces that keep the revision history
//! consistent with the files on disk:
//!
//! - [`clean`]: is the working tree in sync with the last revision?
//! - [`staging`]: mirror the working tree into the next revision
//! - [`initializer`]: bootstrap the history, fold in external edits
//! - [`policy`]: amend-or-append decision for each edit
//! - [`lifecycle`]: release of the version store
//!
//! # Concurrency
//!
//! Mutating operations take `&mut self`, so one manager instance is driven by
//! one owner at a time. Nothing guards a root against several managers or
//! several processes: unsynchronized writers on the same root record
//! revisions in undefined order, and must be serialized by the caller (for
//! example one manager per process plus a file lock across processes).

pub mod clean;
pub mod initializer;
pub mod lifecycle;
pub mod policy;
pub mod staging;

use std::sync::Arc;

use vault_fs::NormalizedPath;
use vault_git::{Actor, GitStore, Revision, VersionStore, WorkingTreeStatus};

use crate::{Error, IdentityProvider, IgnorePolicy, Result, VersioningSettings};

pub use policy::{AmendWindow, CommitAction, CommitOutcome, decide};
pub use staging::StageSummary;

type StoreOpener<S> = Box<dyn Fn(&NormalizedPath) -> vault_git::Result<S> + Send + Sync>;

/// Keeps the change history of one configuration root.
///
/// The version store is opened by [`initialize`](Self::initialize) (or
/// [`open`](Self::open)) and
/// released by [`destroy`](Self::destroy), or on drop at the latest.
pub struct VersioningManager<S: VersionStore = GitStore> {
    root: NormalizedPath,
    identity: Arc<dyn IdentityProvider>,
    opener: StoreOpener<S>,
    store: Option<S>,
    amend_window: AmendWindow,
    ignore: IgnorePolicy,
    system_author: Actor,
    destroyed: bool,
}

impl VersioningManager<GitStore> {
    /// Manager for `root` backed by git, with default settings.
    pub fn new(
        root: impl Into<NormalizedPath>,
        identity: impl IdentityProvider + 'static,
    ) -> Self {
        Self::with_settings(root, identity, VersioningSettings::default())
    }

    pub fn with_settings(
        root: impl Into<NormalizedPath>,
        identity: impl IdentityProvider + 'static,
        settings: VersioningSettings,
    ) -> Self {
        Self::with_opener(root, identity, settings, |root: &NormalizedPath| {
            GitStore::open(root.clone())
        })
    }
}

impl<S: VersionStore> VersioningManager<S> {
    /// Manager whose version store is produced by `opener` on first use.
    pub fn with_opener(
        root: impl Into<NormalizedPath>,
        identity: impl IdentityProvider + 'static,
        settings: VersioningSettings,
        opener: impl Fn(&NormalizedPath) -> vault_git::Result<S> + Send + Sync + 'static,
    ) -> Self {
        Self {
            root: root.into(),
            identity: Arc::new(identity),
            opener: Box::new(opener),
            store: None,
            amend_window: AmendWindow::from_millis(settings.amend_timeout_ms),
            ignore: IgnorePolicy::from_settings(&settings.ignore),
            system_author: settings.system_author,
            destroyed: false,
        }
    }

    /// Replace the ignore policy, e.g. to add a custom predicate.
    pub fn with_ignore_policy(mut self, ignore: IgnorePolicy) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn ignore_policy(&self) -> &IgnorePolicy {
        &self.ignore
    }

    /// Set the amend window in milliseconds; applies from the next commit.
    ///
    /// Zero or negative values make every commit append a new revision.
    pub fn set_amend_timeout(&mut self, millis: i64) {
        tracing::debug!(millis, "Amend timeout changed");
        self.amend_window = AmendWindow::from_millis(millis);
    }

    pub fn amend_timeout(&self) -> i64 {
        self.amend_window.as_millis()
    }

    /// Number of recorded revisions; zero until the history is initialized.
    pub fn get_commit_count(&self) -> Result<usize> {
        match self.store_if_open()? {
            Some(store) => Ok(store.revision_count()?),
            None => Ok(0),
        }
    }

    /// Recorded revisions, oldest first; empty until initialized.
    pub fn revisions(&self) -> Result<Vec<Revision>> {
        match self.store_if_open()? {
            Some(store) => Ok(store.history()?),
            None => Ok(Vec::new()),
        }
    }

    /// Current differences to the last revision, without ignored untracked
    /// paths.
    pub fn status(&self) -> Result<WorkingTreeStatus> {
        let store = self.open_store_ref()?;
        clean::visible_status(store, &self.ignore)
    }

    /// The store if it has been opened, `None` before initialization.
    fn store_if_open(&self) -> Result<Option<&S>> {
        if self.destroyed {
            return Err(Error::Destroyed {
                root: self.root.to_native(),
            });
        }
        Ok(self.store.as_ref())
    }

    fn open_store_ref(&self) -> Result<&S> {
        self.store_if_open()?.ok_or_else(|| Error::NotInitialized {
            root: self.root.to_native(),
        })
    }

    /// The open store together with the ignore policy, for operations that
    /// need both while mutating the store.
    fn store_and_policy(&mut self) -> Result<(&mut S, &IgnorePolicy)> {
        if self.destroyed {
            return Err(Error::Destroyed {
                root: self.root.to_native(),
            });
        }
        match self.store.as_mut() {
            Some(store) => Ok((store, &self.ignore)),
            None => Err(Error::NotInitialized {
                root: self.root.to_native(),
            }),
        }
    }

    /// Attach to the version store (creating it if absent) without recording
    /// anything. [`initialize`](Self::initialize) does this implicitly; use it
    /// directly to commit an edit without first folding in other changes as
    /// a system revision.
    pub fn open(&mut self) -> Result<()> {
        if self.store_if_open()?.is_none() {
            let store = (self.opener)(&self.root)?;
            tracing::debug!(root = %self.root, "Attached configuration history");
            self.store = Some(store);
        }
        Ok(())
    }
}
