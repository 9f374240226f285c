//! Restart and settings scenarios spanning several manager instances.

use std::time::Duration;

use pretty_assertions::assert_eq;
use vault_core::{CommitOutcome, VersioningManager, VersioningSettings};
use vault_git::Actor;
use vault_test_utils::TestTree;

fn start(tree: &TestTree, user: &str) -> VersioningManager {
    let root = tree.normalized_root();
    let settings = VersioningSettings::load_or_default(&root).unwrap();
    let actor = Actor::named(user);
    let mut manager = VersioningManager::with_settings(root, move || actor.clone(), settings);
    manager.initialize().unwrap();
    manager
}

#[test]
fn test_history_survives_restart() {
    let tree = TestTree::new();
    tree.create_files(&["agent_mappings.yaml", "files/app.yml=a: 1"]);

    {
        let mut manager = start(&tree, "alice");
        tree.create_files(&["files/app.yml=a: 2"]);
        manager.commit("alice edit").unwrap();
    }

    // edit made while the server was down
    tree.create_files(&["files/app.yml=a: 3"]);

    let manager = start(&tree, "alice");
    let revisions = manager.revisions().unwrap();
    assert_eq!(revisions.len(), 3);
    assert_eq!(revisions[1].message, "alice edit");
    assert_eq!(revisions[2].author, VersioningSettings::default().system_author);
    assert!(manager.is_clean().unwrap());
}

#[test]
fn test_settings_file_controls_window_and_ignore() {
    let tree = TestTree::new();
    tree.create_files(&[
        "vault.toml=amend_timeout_ms = 0\n[ignore]\nprefixes = [\"scratch/\"]\n",
        "files/app.yml=a: 1",
    ]);
    let mut manager = start(&tree, "alice");
    assert_eq!(manager.amend_timeout(), 0);

    tree.create_files(&["scratch/notes.txt", "files/app.yml=a: 2"]);
    let first = manager.commit("one").unwrap();
    tree.create_files(&["files/app.yml=a: 3"]);
    let second = manager.commit("two").unwrap();

    assert!(matches!(first, CommitOutcome::Appended(_)));
    assert!(matches!(second, CommitOutcome::Appended(_)));
    assert_eq!(manager.get_commit_count().unwrap(), 3);
    assert!(manager.is_clean().unwrap());
}

#[test]
fn test_atomic_write_leftovers_are_ignored() {
    let tree = TestTree::new();
    tree.create_files(&["files/app.yml=a: 1"]);
    let mut manager = start(&tree, "alice");

    tree.create_files(&["files/.app.yml.4242.tmp=partial", "files/app.yml=a: 2"]);

    let status = manager.status().unwrap();
    assert!(status.untracked.is_empty());
    assert_eq!(status.modified.len(), 1);

    manager.commit("edit").unwrap();
    assert!(manager.is_clean().unwrap());
}

#[test]
fn test_amend_window_expiry_appends() {
    let tree = TestTree::new();
    tree.create_files(&["files/app.yml=a: 1"]);
    let mut manager = start(&tree, "alice");
    manager.set_amend_timeout(500);

    tree.create_files(&["files/app.yml=a: 2"]);
    manager.commit("one").unwrap();
    std::thread::sleep(Duration::from_millis(700));
    tree.create_files(&["files/app.yml=a: 3"]);
    let outcome = manager.commit("two").unwrap();

    assert!(matches!(outcome, CommitOutcome::Appended(_)));
    assert_eq!(manager.get_commit_count().unwrap(), 3);
}

#[test]
fn test_removed_file_is_recorded() {
    let tree = TestTree::new();
    tree.create_files(&["files/a.yml", "files/b.yml"]);
    let mut manager = start(&tree, "alice");

    tree.remove_file("files/b.yml");
    assert!(!manager.is_clean().unwrap());
    manager.commit("remove b").unwrap();

    assert!(manager.is_clean().unwrap());
    assert_eq!(manager.get_commit_count().unwrap(), 2);
}
