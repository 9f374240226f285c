//! Revision extraction from git commits.

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, Repository, Sort};

use crate::{Actor, Result, Revision, RevisionId};

/// Commit message trailer carrying the revision time in milliseconds.
///
/// Git signatures only hold whole seconds, which is too coarse for the amend
/// window.
pub const TIMESTAMP_TRAILER: &str = "Vault-Timestamp-Ms";

/// Full commit message for `message` recorded at `timestamp`.
pub fn encode_message(message: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}\n\n{}: {}\n",
        message.trim_end(),
        TIMESTAMP_TRAILER,
        timestamp.timestamp_millis()
    )
}

/// Split a commit message into the revision message and the millisecond
/// timestamp trailer, if present.
pub fn decode_message(raw: &str) -> (String, Option<DateTime<Utc>>) {
    let raw = raw.trim_end();
    let (body, last_line) = raw.rsplit_once('\n').unwrap_or(("", raw));
    let millis = last_line
        .strip_prefix(TIMESTAMP_TRAILER)
        .and_then(|rest| rest.strip_prefix(": "))
        .and_then(|value| value.trim().parse::<i64>().ok());

    match millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
        Some(timestamp) => (body.trim_end().to_string(), Some(timestamp)),
        None => (raw.to_string(), None),
    }
}

/// Convert a git commit into a [`Revision`].
///
/// Commits recorded by other tools carry no timestamp trailer and fall back
/// to the author time in whole seconds.
pub fn revision_from_commit(commit: &Commit<'_>) -> Revision {
    let author = commit.author();
    let (message, precise) = decode_message(commit.message().unwrap_or(""));
    let timestamp: DateTime<Utc> = precise.unwrap_or_else(|| {
        Utc.timestamp_opt(author.when().seconds(), 0)
            .single()
            .unwrap_or_default()
    });

    Revision {
        id: RevisionId::new(commit.id().to_string()),
        author: Actor::new(
            author.name().unwrap_or("Unknown"),
            author.email().unwrap_or(""),
        ),
        timestamp,
        message,
        parent: commit
            .parent_id(0)
            .ok()
            .map(|oid| RevisionId::new(oid.to_string())),
    }
}

/// List every revision reachable from `head`, oldest first.
pub fn list_revisions(repo: &Repository, head: &Commit<'_>) -> Result<Vec<Revision>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(head.id())?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;

    let mut revisions = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        revisions.push(revision_from_commit(&commit));
    }

    Ok(revisions)
}

/// Count revisions reachable from `head` without materializing them.
pub fn count_revisions(repo: &Repository, head: &Commit<'_>) -> Result<usize> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(head.id())?;

    let mut count = 0;
    for oid in revwalk {
        oid?;
        count += 1;
    }
    Ok(count)
}
