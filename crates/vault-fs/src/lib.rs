//! Filesystem primitives for Configuration Vault
//!
//! Provides normalized paths, the reserved names inside a configuration root
//! and format-agnostic settings loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod path;

pub use config::ConfigStore;
pub use constants::VaultPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
