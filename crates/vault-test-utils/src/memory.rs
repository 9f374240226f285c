//! In-memory fake version store.
//!
//! Lets the versioning policy be tested without touching disk, while counting
//! resource releases and injecting engine failures on demand.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use vault_fs::NormalizedPath;
use vault_git::{
    Actor, Error, Result, Revision, RevisionId, VersionStore, WorkingTreeStatus,
};

type Snapshot = BTreeMap<String, String>;

/// Shared state behind every [`MemoryStore`] it opens: the fake working tree
/// plus probes for tests.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    files: Arc<Mutex<Snapshot>>,
    opens: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `path` in the fake working tree.
    pub fn write_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn remove_file(&self, path: &str) {
        self.files.lock().unwrap().remove(path);
    }

    /// Open a store over this backend; counts as one acquisition.
    pub fn open(&self, root: &NormalizedPath) -> Result<MemoryStore> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryStore {
            root: root.clone(),
            backend: self.clone(),
            index: Snapshot::new(),
            revisions: Vec::new(),
            next_id: 0,
            closed: false,
        })
    }

    /// Number of stores opened so far.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of underlying releases performed so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Make `commit_new` and `amend_head` fail until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Snapshot {
        self.files.lock().unwrap().clone()
    }
}

/// A [`VersionStore`] keeping index and history in memory.
pub struct MemoryStore {
    root: NormalizedPath,
    backend: MemoryBackend,
    index: Snapshot,
    revisions: Vec<(Revision, Snapshot)>,
    next_id: u64,
    closed: bool,
}

impl MemoryStore {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }

    fn head_snapshot(&self) -> Snapshot {
        self.revisions
            .last()
            .map(|(_, snapshot)| snapshot.clone())
            .unwrap_or_default()
    }

    fn check_writable(&self) -> Result<()> {
        if self.backend.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Git(git2::Error::from_str("simulated engine failure")));
        }
        Ok(())
    }

    fn next_revision_id(&mut self) -> RevisionId {
        self.next_id += 1;
        RevisionId::new(format!("{:040x}", self.next_id))
    }
}

impl VersionStore for MemoryStore {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn stage(&mut self, paths: &[String]) -> Result<()> {
        self.ensure_open()?;
        let disk = self.backend.snapshot();
        for path in paths {
            match disk.get(path) {
                Some(content) => {
                    self.index.insert(path.clone(), content.clone());
                }
                None => {
                    return Err(Error::Git(git2::Error::from_str(&format!(
                        "could not find '{path}' to stage"
                    ))));
                }
            }
        }
        Ok(())
    }

    fn unstage(&mut self, paths: &[String]) -> Result<()> {
        self.ensure_open()?;
        for path in paths {
            self.index.remove(path);
        }
        Ok(())
    }

    fn has_staged_changes(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.index != self.head_snapshot())
    }

    fn reset_index(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.index = self.head_snapshot();
        Ok(())
    }

    fn commit_new(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId> {
        self.ensure_open()?;
        self.check_writable()?;
        let id = self.next_revision_id();
        let revision = Revision {
            id: id.clone(),
            author: author.clone(),
            timestamp,
            message: message.to_string(),
            parent: self.revisions.last().map(|(r, _)| r.id.clone()),
        };
        self.revisions.push((revision, self.index.clone()));
        Ok(id)
    }

    fn amend_head(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId> {
        self.ensure_open()?;
        self.check_writable()?;
        if self.revisions.is_empty() {
            return Err(Error::NoHead);
        }
        let id = self.next_revision_id();
        let snapshot = self.index.clone();
        let Some((head, head_snapshot)) = self.revisions.last_mut() else {
            return Err(Error::NoHead);
        };
        head.id = id.clone();
        head.author = author.clone();
        head.timestamp = timestamp;
        head.message = message.to_string();
        *head_snapshot = snapshot;
        Ok(id)
    }

    fn diff_working_tree(&self) -> Result<WorkingTreeStatus> {
        self.ensure_open()?;
        let disk = self.backend.snapshot();
        let head = self.head_snapshot();
        let mut status = WorkingTreeStatus::default();

        for (path, content) in &disk {
            match (head.get(path), self.index.get(path)) {
                (None, None) => {
                    status.untracked.insert(path.clone());
                }
                (None, Some(_)) => {
                    status.added.insert(path.clone());
                }
                (Some(_), None) => {
                    status.untracked.insert(path.clone());
                }
                (Some(recorded), Some(staged)) => {
                    if recorded != content || staged != content {
                        status.modified.insert(path.clone());
                    }
                }
            }
        }
        for path in head.keys().chain(self.index.keys()) {
            if !disk.contains_key(path) {
                status.removed.insert(path.clone());
            }
        }

        Ok(status)
    }

    fn history(&self) -> Result<Vec<Revision>> {
        self.ensure_open()?;
        Ok(self.revisions.iter().map(|(r, _)| r.clone()).collect())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.backend.releases.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
