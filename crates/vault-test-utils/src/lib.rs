//! Shared test utilities for the Configuration Vault workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] temporary configuration roots
//! - [`memory`]: [`MemoryStore`], an in-memory fake version store

pub mod memory;
pub mod tree;

pub use memory::{MemoryBackend, MemoryStore};
pub use tree::TestTree;
