//! libgit2-backed version store

use std::path::Path;

use chrono::{DateTime, Utc};
use git2::{Commit, ErrorCode, Repository, Signature, Status, StatusOptions, Time};
use vault_fs::{NormalizedPath, VaultPath};

use crate::{
    Actor, Error, Result, Revision, RevisionId, VersionStore, WorkingTreeStatus, history,
};

/// Version store keeping history in a `.git` directory inside the root.
///
/// The repository handle is held until [`close`](VersionStore::close) (or
/// drop). `.gitignore` rules in the root are honoured when listing untracked
/// files.
pub struct GitStore {
    root: NormalizedPath,
    repo: Option<Repository>,
}

impl GitStore {
    /// Attach to the repository at `root`, creating it if absent.
    ///
    /// A missing root directory is created. Fails if `root` is a file or the
    /// existing `.git` directory cannot be opened.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let native = root.to_native();

        if native.exists() && !native.is_dir() {
            return Err(Error::NotADirectory { path: native });
        }
        std::fs::create_dir_all(&native).map_err(|e| vault_fs::Error::io(&native, e))?;

        let repo = if root.join(VaultPath::GitDir.as_str()).exists() {
            tracing::debug!(root = %root, "Opening version store");
            Repository::open(&native)?
        } else {
            tracing::info!(root = %root, "Creating version store");
            Repository::init(&native)?
        };

        Ok(Self {
            root,
            repo: Some(repo),
        })
    }

    /// Whether a version store already exists under `root`.
    pub fn exists(root: &NormalizedPath) -> bool {
        root.join(VaultPath::GitDir.as_str()).is_dir()
    }

    fn repo(&self) -> Result<&Repository> {
        self.repo.as_ref().ok_or(Error::Closed)
    }
}

/// Head commit, or `None` while the branch is unborn.
fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn signature(author: &Actor, timestamp: DateTime<Utc>) -> Result<Signature<'static>> {
    Signature::new(
        &author.name,
        &author.email,
        &Time::new(timestamp.timestamp(), 0),
    )
    .map_err(|e| Error::InvalidSignature {
        name: author.name.clone(),
        email: author.email.clone(),
        message: e.message().to_string(),
    })
}

/// Sort one status entry into the matching bucket.
///
/// A deletion on disk wins over whatever the index holds, so the path gets
/// removed from the next revision.
pub(crate) fn classify(path: &str, status: Status, out: &mut WorkingTreeStatus) {
    let path = path.to_string();

    if status.is_ignored() {
        return;
    }
    if status.is_wt_deleted() {
        out.removed.insert(path);
    } else if status.is_index_deleted() {
        if status.is_wt_new() {
            out.untracked.insert(path);
        } else {
            out.removed.insert(path);
        }
    } else if status.is_wt_new() {
        out.untracked.insert(path);
    } else if status.is_index_new() {
        out.added.insert(path);
    } else if status.intersects(
        Status::INDEX_MODIFIED
            | Status::WT_MODIFIED
            | Status::INDEX_TYPECHANGE
            | Status::WT_TYPECHANGE
            | Status::INDEX_RENAMED
            | Status::WT_RENAMED
            | Status::CONFLICTED,
    ) {
        out.modified.insert(path);
    }
}

impl VersionStore for GitStore {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// libgit2 strips surrounding whitespace and punctuation from names and
    /// emails, so the recorded author is read back from a signature.
    fn canonical_actor(&self, actor: &Actor) -> Result<Actor> {
        let sig = signature(actor, DateTime::<Utc>::UNIX_EPOCH)?;
        Ok(Actor::new(
            String::from_utf8_lossy(sig.name_bytes()),
            String::from_utf8_lossy(sig.email_bytes()),
        ))
    }

    fn stage(&mut self, paths: &[String]) -> Result<()> {
        let repo = self.repo()?;
        let mut index = repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;
        Ok(())
    }

    fn unstage(&mut self, paths: &[String]) -> Result<()> {
        let repo = self.repo()?;
        let mut index = repo.index()?;
        for path in paths {
            index.remove_path(Path::new(path))?;
        }
        index.write()?;
        Ok(())
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let repo = self.repo()?;
        let index = repo.index()?;
        let head_tree = match head_commit(repo)? {
            Some(commit) => Some(commit.tree()?),
            None => None,
        };
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        Ok(diff.deltas().len() > 0)
    }

    fn reset_index(&mut self) -> Result<()> {
        let repo = self.repo()?;
        let mut index = repo.index()?;
        match head_commit(repo)? {
            Some(commit) => index.read_tree(&commit.tree()?)?,
            None => index.clear()?,
        }
        index.write()?;
        Ok(())
    }

    fn commit_new(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId> {
        let repo = self.repo()?;
        let sig = signature(author, timestamp)?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let parent = head_commit(repo)?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let message = history::encode_message(message, timestamp);
        let oid = repo.commit(Some("HEAD"), &sig, &sig, &message, &tree, &parents)?;
        Ok(RevisionId::new(oid.to_string()))
    }

    fn amend_head(
        &mut self,
        message: &str,
        author: &Actor,
        timestamp: DateTime<Utc>,
    ) -> Result<RevisionId> {
        let repo = self.repo()?;
        let head = head_commit(repo)?.ok_or(Error::NoHead)?;
        let sig = signature(author, timestamp)?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let message = history::encode_message(message, timestamp);
        let oid = head.amend(
            Some("HEAD"),
            Some(&sig),
            Some(&sig),
            None,
            Some(&message),
            Some(&tree),
        )?;
        Ok(RevisionId::new(oid.to_string()))
    }

    fn diff_working_tree(&self) -> Result<WorkingTreeStatus> {
        let repo = self.repo()?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .exclude_submodules(true);

        let mut status = WorkingTreeStatus::default();
        for entry in repo.statuses(Some(&mut opts))?.iter() {
            let Some(path) = entry.path() else {
                tracing::warn!("Skipping working tree entry with a non UTF-8 path");
                continue;
            };
            if VaultPath::is_metadata(path) {
                continue;
            }
            classify(path, entry.status(), &mut status);
        }

        Ok(status)
    }

    fn history(&self) -> Result<Vec<Revision>> {
        let repo = self.repo()?;
        match head_commit(repo)? {
            Some(head) => history::list_revisions(repo, &head),
            None => Ok(Vec::new()),
        }
    }

    fn head(&self) -> Result<Option<Revision>> {
        let repo = self.repo()?;
        Ok(head_commit(repo)?.map(|commit| history::revision_from_commit(&commit)))
    }

    fn revision_count(&self) -> Result<usize> {
        let repo = self.repo()?;
        match head_commit(repo)? {
            Some(head) => history::count_revisions(repo, &head),
            None => Ok(0),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.repo.take().is_some() {
            tracing::debug!(root = %self.root, "Released version store");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.repo.is_none()
    }
}
