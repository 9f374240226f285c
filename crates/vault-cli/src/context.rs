//! Configuration root context
//!
//! Resolves the root directory and settings shared by every command.

use std::path::{Path, PathBuf};

use vault_core::{VersioningManager, VersioningSettings};
use vault_fs::NormalizedPath;
use vault_git::{Actor, GitStore};

use crate::error::{CliError, Result};

/// Author used when neither flags nor environment name one.
const FALLBACK_AUTHOR: &str = "vault";

/// Root directory and settings for one invocation.
#[derive(Debug, Clone)]
pub struct VaultContext {
    pub root: NormalizedPath,
    pub settings: VersioningSettings,
}

impl VaultContext {
    /// Resolve `root` against the current directory and load settings from
    /// `config`, or from `<root>/vault.toml` when that exists.
    pub fn resolve(root: &Path, config: Option<&Path>) -> Result<Self> {
        let root = NormalizedPath::new(absolute(root)?);
        let settings = match config {
            Some(path) => {
                let path = NormalizedPath::new(absolute(path)?);
                if !path.exists() {
                    return Err(CliError::user(format!(
                        "settings file not found: {}",
                        path
                    )));
                }
                VersioningSettings::load(&path)?
            }
            None => VersioningSettings::load_or_default(&root)?,
        };
        tracing::debug!(root = %root, amend_timeout_ms = settings.amend_timeout_ms, "Resolved context");
        Ok(Self { root, settings })
    }

    /// Whether the root already carries a history.
    pub fn is_initialized(&self) -> bool {
        GitStore::exists(&self.root)
    }

    /// Git-backed manager acting as `actor`.
    pub fn manager(&self, actor: Actor) -> VersioningManager {
        VersioningManager::with_settings(
            self.root.clone(),
            move || actor.clone(),
            self.settings.clone(),
        )
    }

    /// Manager for commands that only read, attributed to the system author.
    pub fn reader(&self) -> VersioningManager {
        self.manager(self.settings.system_author.clone())
    }
}

/// Actor from explicit flags, falling back to `$VAULT_AUTHOR` and `$USER`.
pub fn resolve_actor(author: Option<&str>, email: Option<&str>) -> Actor {
    let name = author
        .map(str::to_string)
        .or_else(|| env_non_empty("VAULT_AUTHOR"))
        .or_else(|| env_non_empty("USER"))
        .unwrap_or_else(|| FALLBACK_AUTHOR.to_string());
    match email {
        Some(email) => Actor::new(name, email),
        None => Actor::named(name),
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_author_wins() {
        let actor = resolve_actor(Some("alice"), Some("alice@example.com"));
        assert_eq!(actor, Actor::new("alice", "alice@example.com"));
    }

    #[test]
    fn test_author_without_email_doubles_as_email() {
        let actor = resolve_actor(Some("bob"), None);
        assert_eq!(actor.email, "bob");
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let context = VaultContext::resolve(temp.path(), None).unwrap();
        assert_eq!(context.settings, VersioningSettings::default());
        assert!(!context.is_initialized());
    }

    #[test]
    fn test_missing_explicit_settings_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(VaultContext::resolve(temp.path(), Some(&missing)).is_err());
    }
}
