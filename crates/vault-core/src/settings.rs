//! Versioning settings
//!
//! Loaded from `vault.toml` (or any `.json`/`.yaml` file) in the
//! configuration root; every field is optional.
//!
//! ```toml
//! amend_timeout_ms = 600000
//!
//! [system_author]
//! name = "Configuration Server"
//! email = "configuration-server@localhost"
//!
//! [ignore]
//! names = ["ignored-file"]
//! prefixes = ["scratch/"]
//! suffixes = [".tmp"]
//! ```

use serde::{Deserialize, Serialize};
use vault_fs::{ConfigStore, NormalizedPath, VaultPath};
use vault_git::Actor;

use crate::{Error, Result};

/// Ten minutes: edits by one actor within this window collapse into one revision.
pub const DEFAULT_AMEND_TIMEOUT_MS: i64 = 10 * 60 * 1000;

/// Runtime configuration of a [`VersioningManager`](crate::VersioningManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningSettings {
    /// Amend window in milliseconds; zero or negative disables amending
    pub amend_timeout_ms: i64,

    /// Author of revisions the system records on its own
    pub system_author: Actor,

    pub ignore: IgnoreSettings,
}

impl Default for VersioningSettings {
    fn default() -> Self {
        Self {
            amend_timeout_ms: DEFAULT_AMEND_TIMEOUT_MS,
            system_author: Actor::new(
                "Configuration Server",
                "configuration-server@localhost",
            ),
            ignore: IgnoreSettings::default(),
        }
    }
}

/// Serializable form of an [`IgnorePolicy`](crate::IgnorePolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreSettings {
    /// Literal names matched against every path component
    pub names: Vec<String>,
    /// Relative path prefixes
    pub prefixes: Vec<String>,
    /// Path suffixes
    pub suffixes: Vec<String>,
}

impl Default for IgnoreSettings {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            prefixes: Vec::new(),
            // leftovers of interrupted atomic writes
            suffixes: vec![".tmp".to_string()],
        }
    }
}

impl VersioningSettings {
    /// Load settings from an explicit file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let settings: Self = ConfigStore::new().load(path)?;
        settings.validate()?;
        tracing::debug!(path = %path, "Loaded versioning settings");
        Ok(settings)
    }

    /// Reject settings the version store could not work with.
    pub fn validate(&self) -> Result<()> {
        let author = &self.system_author;
        if author.name.trim().is_empty() || author.email.trim().is_empty() {
            return Err(Error::Settings {
                message: "system_author needs a non-empty name and email".into(),
            });
        }
        let invalid = self
            .ignore
            .names
            .iter()
            .find(|n| n.is_empty() || n.contains('/'));
        if let Some(name) = invalid {
            return Err(Error::Settings {
                message: format!("ignore name '{name}' must be a single path component"),
            });
        }
        Ok(())
    }

    /// Load `vault.toml` from `root`, falling back to defaults when absent.
    pub fn load_or_default(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(VaultPath::Settings.as_str());
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: VersioningSettings = toml_like("amend_timeout_ms = -2000");
        assert_eq!(settings.amend_timeout_ms, -2000);
        assert_eq!(settings.system_author, VersioningSettings::default().system_author);
        assert_eq!(settings.ignore.suffixes, vec![".tmp".to_string()]);
    }

    #[test]
    fn test_invalid_ignore_name_is_rejected() {
        let mut settings = VersioningSettings::default();
        settings.ignore.names.push("files/app.yml".into());

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }

    fn toml_like(content: &str) -> VersioningSettings {
        let temp = tempfile::TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("vault.toml");
        std::fs::write(path.to_native(), content).unwrap();
        VersioningSettings::load(&path).unwrap()
    }
}
