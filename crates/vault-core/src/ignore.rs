//! Ignore policy for untracked working-tree content.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use vault_fs::VaultPath;

use crate::settings::IgnoreSettings;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides which untracked paths are never recorded and never make the tree
/// dirty.
///
/// A path is ignored when any of its components equals a configured name,
/// when it starts with a configured prefix, ends with a configured suffix, or
/// matches a custom predicate. The history metadata directory is always
/// ignored. Paths are relative to the root with forward slashes.
#[derive(Clone, Default)]
pub struct IgnorePolicy {
    names: BTreeSet<String>,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    predicate: Option<Predicate>,
}

impl IgnorePolicy {
    /// A policy that ignores nothing but the history metadata.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &IgnoreSettings) -> Self {
        Self {
            names: settings.names.iter().cloned().collect(),
            prefixes: settings.prefixes.clone(),
            suffixes: settings.suffixes.clone(),
            predicate: None,
        }
    }

    pub fn ignore_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn ignore_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn ignore_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Additionally ignore every path accepted by `predicate`.
    pub fn ignore_matching(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn is_ignored(&self, relative: &str) -> bool {
        if VaultPath::is_metadata(relative) {
            return true;
        }
        if relative
            .split('/')
            .any(|component| self.names.contains(component))
        {
            return true;
        }
        if self.prefixes.iter().any(|p| relative.starts_with(p.as_str()))
            || self.suffixes.iter().any(|s| relative.ends_with(s.as_str()))
        {
            return true;
        }
        self.predicate.as_ref().is_some_and(|matches| matches(relative))
    }
}

impl fmt::Debug for IgnorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnorePolicy")
            .field("names", &self.names)
            .field("prefixes", &self.prefixes)
            .field("suffixes", &self.suffixes)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_is_always_ignored() {
        let policy = IgnorePolicy::new();
        assert!(policy.is_ignored(".git/index"));
        assert!(!policy.is_ignored("files/app.yml"));
    }

    #[test]
    fn test_name_matches_any_component() {
        let policy = IgnorePolicy::new().ignore_name("ignored-file");

        assert!(policy.is_ignored("ignored-file"));
        assert!(policy.is_ignored("files/ignored-file"));
        assert!(policy.is_ignored("ignored-file/inner.yml"));
        assert!(!policy.is_ignored("untracked-file"));
        assert!(!policy.is_ignored("files/ignored-file.yml"));
    }

    #[test]
    fn test_prefix_suffix_and_predicate() {
        let policy = IgnorePolicy::new()
            .ignore_prefix("scratch/")
            .ignore_suffix(".swp")
            .ignore_matching(|p| p.contains("~"));

        assert!(policy.is_ignored("scratch/notes.yml"));
        assert!(policy.is_ignored("files/.app.yml.swp"));
        assert!(policy.is_ignored("files/app.yml~"));
        assert!(!policy.is_ignored("files/app.yml"));
    }
}
