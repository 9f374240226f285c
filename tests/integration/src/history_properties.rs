//! Observable history properties against the real git engine.
//!
//! Each test drives a `VersioningManager` the way the configuration server
//! does and checks the result both through the manager and by reading the
//! repository with git2 directly.

use pretty_assertions::assert_eq;
use vault_core::{IgnorePolicy, VersioningManager};
use vault_fs::NormalizedPath;
use vault_git::{Actor, GitStore};
use vault_test_utils::TestTree;

fn manager(tree: &TestTree, user: &str) -> VersioningManager<GitStore> {
    let actor = Actor::named(user);
    VersioningManager::new(tree.normalized_root(), move || actor.clone())
        .with_ignore_policy(IgnorePolicy::new().ignore_name("ignored-file"))
}

/// Commits reachable from HEAD, checking each has at most one parent.
fn linear_history_len(root: &NormalizedPath) -> usize {
    let repo = git2::Repository::open(root.to_native()).unwrap();
    let mut count = 0;
    let mut commit = repo.head().unwrap().peel_to_commit().unwrap();
    loop {
        count += 1;
        assert!(commit.parent_count() <= 1, "merge commit in history");
        match commit.parent(0) {
            Ok(parent) => commit = parent,
            Err(_) => break,
        }
    }
    count
}

#[test]
fn test_initialize_creates_single_revision() {
    let tree = TestTree::new();
    tree.create_files(&["agent_mappings.yaml", "files/file.yml", "untracked-file"]);
    let mut manager = manager(&tree, "user");

    manager.initialize().unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert!(manager.is_clean().unwrap());
    assert_eq!(linear_history_len(&tree.normalized_root()), 1);
}

#[test]
fn test_initialize_twice_keeps_count() {
    let tree = TestTree::new();
    tree.create_files(&["agent_mappings.yaml", "files/file.yml"]);
    let mut manager = manager(&tree, "user");

    manager.initialize().unwrap();
    manager.initialize().unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 1);
}

#[test]
fn test_external_edit_between_initializations() {
    let tree = TestTree::new();
    tree.create_files(&["agent_mappings.yaml", "files/file.yml"]);
    let mut manager = manager(&tree, "user");
    manager.initialize().unwrap();

    tree.create_files(&["files/file.yml=edited elsewhere"]);
    assert!(!manager.is_clean().unwrap());
    manager.initialize().unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 2);
    assert!(manager.is_clean().unwrap());
    assert_eq!(linear_history_len(&tree.normalized_root()), 2);
}

#[test]
fn test_first_commit_without_initialize() {
    let tree = TestTree::new();
    tree.create_files(&["agent_mappings.yaml", "files/file.yml=a: 1"]);
    let mut manager = manager(&tree, "user");

    manager.open().unwrap();
    manager.commit("first").unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert_eq!(manager.revisions().unwrap()[0].author, Actor::named("user"));
}

#[test]
fn test_same_actor_amends_then_negative_window_appends() {
    let tree = TestTree::new();
    tree.create_files(&["files/file.yml=a: 1"]);
    let mut manager = manager(&tree, "user");
    manager.open().unwrap();

    manager.commit("first").unwrap();
    tree.create_files(&["files/file.yml=a: 2"]);
    manager.commit("second").unwrap();
    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert!(manager.is_clean().unwrap());

    manager.set_amend_timeout(-1);
    tree.create_files(&["files/file.yml=a: 3"]);
    manager.commit("third").unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 2);
    assert_eq!(linear_history_len(&tree.normalized_root()), 2);
}

#[test]
fn test_commit_without_changes_keeps_count() {
    let tree = TestTree::new();
    tree.create_files(&["files/file.yml=a: 1"]);
    let mut manager = manager(&tree, "user");
    manager.open().unwrap();

    manager.commit("first").unwrap();
    manager.commit("again").unwrap();

    assert_eq!(manager.get_commit_count().unwrap(), 1);
    assert!(manager.is_clean().unwrap());
    assert_eq!(manager.revisions().unwrap()[0].message, "first");
}

#[test]
fn test_only_ignored_untracked_file_is_clean() {
    let tree = TestTree::new();
    tree.create_files(&["files/file.yml"]);
    let mut manager = manager(&tree, "user");
    manager.initialize().unwrap();

    tree.create_files(&["ignored-file"]);
    assert!(manager.is_clean().unwrap());

    tree.create_files(&["other-file"]);
    assert!(!manager.is_clean().unwrap());
}

#[test]
fn test_destroy_is_idempotent_on_real_store() {
    let tree = TestTree::new();
    tree.create_files(&["files/file.yml"]);
    let mut manager = manager(&tree, "user");
    manager.initialize().unwrap();

    manager.destroy().unwrap();
    manager.destroy().unwrap();

    assert!(manager.is_destroyed());
    assert!(manager.get_commit_count().is_err());
}
