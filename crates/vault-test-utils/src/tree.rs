//! [`TestTree`] builder for configuration-root test scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vault_fs::{NormalizedPath, VaultPath};

/// A temporary configuration root with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use vault_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.create_files(&["agent_mappings.yaml", "files/app.yml=key: value"]);
/// tree.assert_file_exists("files/app.yml");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn normalized_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Create files from `path` or `path=content` entries.
    ///
    /// An entry without `=` writes an empty file. Existing files are
    /// overwritten, parent directories are created as needed.
    pub fn create_files(&self, entries: &[&str]) {
        for &entry in entries {
            let (rel, content) = entry.split_once('=').unwrap_or((entry, ""));
            let path = self.root().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content)
                .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        }
    }

    /// Delete the file at `rel`.
    pub fn remove_file(&self, rel: &str) {
        let path = self.root().join(rel);
        fs::remove_file(&path)
            .unwrap_or_else(|e| panic!("Could not remove {}: {e}", path.display()));
    }

    /// Whether the history metadata directory has been created.
    pub fn has_history(&self) -> bool {
        self.root().join(VaultPath::GitDir.as_str()).is_dir()
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
