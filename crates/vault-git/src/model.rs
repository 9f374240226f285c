//! Data model shared by every store implementation.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whoever is making a change: used for attribution and amend eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub email: String,
}

impl Actor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// An actor known only by a user name, which doubles as the email.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            email: name.clone(),
            name,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Opaque revision identifier (a commit hash for the git engine).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, for display.
    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(7).map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded snapshot of the configuration tree.
///
/// History is linear: every revision has at most one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: RevisionId,
    pub author: Actor,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub parent: Option<RevisionId>,
}

/// Differences between the working tree and the last recorded revision.
///
/// Computed fresh on every query. Paths are relative to the root and use
/// forward slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTreeStatus {
    /// Present in the index but not in the head revision
    pub added: BTreeSet<String>,
    /// Tracked and changed on disk or in the index
    pub modified: BTreeSet<String>,
    /// Tracked but gone from disk
    pub removed: BTreeSet<String>,
    /// On disk but never recorded
    pub untracked: BTreeSet<String>,
}

impl WorkingTreeStatus {
    /// No tracked differences at all (untracked paths are not considered).
    pub fn tracked_is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked_is_empty() && self.untracked.is_empty()
    }

    /// Drop untracked paths rejected by `keep`.
    pub fn retain_untracked(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.untracked.retain(|path| keep(path));
    }
}
