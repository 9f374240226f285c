//! Reserved names inside a configuration root.
//!
//! Listed here so every crate agrees on the same strings.

use std::path::Path;

/// Well-known paths relative to a configuration root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultPath {
    /// The `.git` directory holding the revision history
    GitDir,
    /// Optional versioning settings file at the root
    Settings,
}

impl VaultPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::Settings => "vault.toml",
        }
    }

    /// Whether `relative` lies inside the history metadata directory.
    pub fn is_metadata(relative: &str) -> bool {
        let git_dir = Self::GitDir.as_str();
        relative == git_dir
            || relative
                .strip_prefix(git_dir)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl AsRef<Path> for VaultPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for VaultPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for VaultPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_detection() {
        assert!(VaultPath::is_metadata(".git"));
        assert!(VaultPath::is_metadata(".git/HEAD"));
        assert!(!VaultPath::is_metadata(".gitignore"));
        assert!(!VaultPath::is_metadata("files/.git-notes"));
    }
}
