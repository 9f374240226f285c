//! Revision store abstraction for Configuration Vault
//!
//! [`VersionStore`] is the narrow capability the versioning logic needs from a
//! version-control engine. [`GitStore`] implements it on top of libgit2.

pub mod error;
pub mod git_store;
pub mod history;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use git_store::GitStore;
pub use model::{Actor, Revision, RevisionId, WorkingTreeStatus};
pub use store::VersionStore;
