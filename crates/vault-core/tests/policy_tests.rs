//! Commit policy and lifecycle against the in-memory store

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use vault_core::{CommitOutcome, Error, VersioningManager, VersioningSettings};
use vault_fs::NormalizedPath;
use vault_git::Actor;
use vault_test_utils::{MemoryBackend, MemoryStore};

/// Manager over `backend` whose actor can be switched between commits.
fn manager_with_actor(
    backend: &MemoryBackend,
    actor: Arc<Mutex<Actor>>,
) -> VersioningManager<MemoryStore> {
    let opener_backend = backend.clone();
    VersioningManager::with_opener(
        NormalizedPath::new("/srv/config"),
        move || actor.lock().unwrap().clone(),
        VersioningSettings::default(),
        move |root: &NormalizedPath| opener_backend.open(root),
    )
}

fn manager(backend: &MemoryBackend) -> VersioningManager<MemoryStore> {
    manager_with_actor(backend, Arc::new(Mutex::new(Actor::named("user"))))
}

#[test]
fn test_other_actor_never_amends() {
    let backend = MemoryBackend::new();
    let actor = Arc::new(Mutex::new(Actor::named("alice")));
    let mut manager = manager_with_actor(&backend, actor.clone());
    manager.initialize().unwrap();

    backend.write_file("files/a.yml", "a");
    manager.commit("alice edit").unwrap();

    *actor.lock().unwrap() = Actor::named("bob");
    backend.write_file("files/a.yml", "b");
    let outcome = manager.commit("bob edit").unwrap();

    assert!(matches!(outcome, CommitOutcome::Appended(_)));
    let revisions = manager.revisions().unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[0].author.name, "alice");
    assert_eq!(revisions[1].author.name, "bob");
    assert_eq!(revisions[1].parent.as_ref(), Some(&revisions[0].id));
}

#[test]
fn test_amend_keeps_union_of_changes() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);
    manager.initialize().unwrap();

    backend.write_file("files/a.yml", "a");
    manager.commit("first").unwrap();
    backend.write_file("files/b.yml", "b");
    let outcome = manager.commit("second").unwrap();

    assert!(matches!(outcome, CommitOutcome::Amended(_)));
    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert!(manager.is_clean().unwrap());
    assert_eq!(manager.revisions().unwrap()[0].message, "second");
}

#[test]
fn test_amend_timeout_change_applies_to_next_commit() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);
    manager.initialize().unwrap();

    backend.write_file("files/a.yml", "1");
    manager.commit("one").unwrap();

    manager.set_amend_timeout(0);
    assert_eq!(manager.amend_timeout(), 0);
    backend.write_file("files/a.yml", "2");
    manager.commit("two").unwrap();
    assert_eq!(manager.get_commit_count().unwrap(), 2);

    manager.set_amend_timeout(60_000);
    backend.write_file("files/a.yml", "3");
    let outcome = manager.commit("three").unwrap();
    assert!(matches!(outcome, CommitOutcome::Amended(_)));
    assert_eq!(manager.get_commit_count().unwrap(), 2);
}

#[test]
fn test_failed_commit_leaves_nothing_staged() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);
    manager.initialize().unwrap();
    backend.write_file("files/a.yml", "a");

    backend.fail_writes(true);
    let err = manager.commit("doomed").unwrap_err();
    assert!(err.is_engine_failure());
    assert_eq!(manager.get_commit_count().unwrap(), 0);
    let status = manager.status().unwrap();
    assert!(status.added.is_empty());
    assert!(status.untracked.contains("files/a.yml"));

    backend.fail_writes(false);
    manager.commit("retry").unwrap();
    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert!(manager.is_clean().unwrap());
}

#[test]
fn test_failed_initialize_can_be_retried() {
    let backend = MemoryBackend::new();
    backend.write_file("agent_mappings.yaml", "");
    let mut manager = manager(&backend);

    backend.fail_writes(true);
    assert!(manager.initialize().unwrap_err().is_engine_failure());
    assert_eq!(manager.get_commit_count().unwrap(), 0);

    backend.fail_writes(false);
    assert!(manager.initialize().unwrap().is_some());
    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert_eq!(backend.opens(), 1);
}

#[test]
fn test_operations_before_initialize() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);

    assert_eq!(manager.get_commit_count().unwrap(), 0);
    assert!(manager.revisions().unwrap().is_empty());
    assert!(matches!(manager.is_clean(), Err(Error::NotInitialized { .. })));
    let err = manager.commit("too early").unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(backend.opens(), 0);
}

#[test]
fn test_destroy_without_initialize_releases_nothing() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);

    manager.destroy().unwrap();
    manager.destroy().unwrap();

    assert_eq!(backend.releases(), 0);
    assert!(manager.is_destroyed());
}

#[test]
fn test_destroy_releases_exactly_once() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);
    manager.initialize().unwrap();

    manager.destroy().unwrap();
    manager.destroy().unwrap();
    drop(manager);

    assert_eq!(backend.releases(), 1);
}

#[test]
fn test_drop_releases_store() {
    let backend = MemoryBackend::new();
    {
        let mut manager = manager(&backend);
        manager.initialize().unwrap();
    }
    assert_eq!(backend.releases(), 1);
}

#[test]
fn test_operations_after_destroy_fail() {
    let backend = MemoryBackend::new();
    let mut manager = manager(&backend);
    manager.initialize().unwrap();
    manager.destroy().unwrap();

    assert!(matches!(manager.initialize(), Err(Error::Destroyed { .. })));
    assert!(matches!(manager.commit("late"), Err(Error::Destroyed { .. })));
    assert!(matches!(manager.get_commit_count(), Err(Error::Destroyed { .. })));
    assert_eq!(backend.opens(), 1);
}

#[test]
fn test_open_then_commit_attributes_edit_to_actor() {
    let backend = MemoryBackend::new();
    backend.write_file("agent_mappings.yaml", "mappings: []");
    let mut manager = manager(&backend);

    manager.open().unwrap();
    manager.commit("first edit").unwrap();

    let revisions = manager.revisions().unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].author, Actor::named("user"));
    assert_eq!(revisions[0].message, "first edit");
}
