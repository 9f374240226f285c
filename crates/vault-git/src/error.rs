//! Error types for vault-git

use std::path::PathBuf;

/// Result type for vault-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vault-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] vault_fs::Error),

    #[error("Configuration root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Cannot amend: the history has no revisions yet")]
    NoHead,

    #[error("Invalid author '{name} <{email}>': {message}")]
    InvalidSignature {
        name: String,
        email: String,
        message: String,
    },

    #[error("Version store has already been closed")]
    Closed,
}

impl Error {
    /// Whether the failure comes from the underlying store being unusable
    /// (unreadable, unwritable or corrupted) rather than from misuse.
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            Self::Git(_) | Self::Fs(_) | Self::NotADirectory { .. } | Self::InvalidSignature { .. }
        )
    }
}
