//! Error types for vault-core

use std::path::PathBuf;

/// Result type for vault-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vault-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The history for this root has not been initialized yet
    #[error("Configuration history at {root} is not initialized")]
    NotInitialized { root: PathBuf },

    /// The manager has already released its version store
    #[error("Configuration history at {root} has been shut down")]
    Destroyed { root: PathBuf },

    /// Invalid versioning settings
    #[error("Invalid versioning settings: {message}")]
    Settings { message: String },

    /// Version store error from vault-git
    #[error(transparent)]
    Store(#[from] vault_git::Error),

    /// Filesystem error from vault-fs
    #[error(transparent)]
    Fs(#[from] vault_fs::Error),
}

impl Error {
    /// The underlying store is unreadable, unwritable or corrupted.
    pub fn is_engine_failure(&self) -> bool {
        match self {
            Self::Store(e) => e.is_engine_failure(),
            Self::Fs(_) => true,
            _ => false,
        }
    }

    /// The manager was used in a state that does not allow the operation.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized { .. }
                | Self::Destroyed { .. }
                | Self::Store(vault_git::Error::Closed)
                | Self::Store(vault_git::Error::NoHead)
        )
    }
}
