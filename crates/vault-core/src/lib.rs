//! Versioning core for Configuration Vault
//!
//! Every change to a configuration root (the agent mappings manifest and the
//! configuration files folder) is recorded as a revision in a linear history:
//!
//! - **Bootstrap and reconciliation**: [`VersioningManager::initialize`]
//!   creates the history on first start and records edits made behind the
//!   server's back on later starts
//! - **Commit policy**: [`VersioningManager::commit`] appends a revision, or
//!   amends the previous one when the same actor edits again within the
//!   amend window
//! - **Clean state**: [`VersioningManager::is_clean`] compares disk with the
//!   last revision under an [`IgnorePolicy`]
//! - **Lifecycle**: [`VersioningManager::destroy`] releases the store once
//!
//! # Architecture
//!
//! ```text
//!                 API layer / vault CLI
//!                          |
//!                     vault-core
//!                     /        \
//!              vault-git      vault-fs
//!           (VersionStore)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vault_core::{Result, VersioningManager};
//! use vault_git::Actor;
//!
//! fn example() -> Result<()> {
//!     let mut manager = VersioningManager::new("/srv/config", || Actor::named("admin"));
//!     manager.initialize()?;
//!     // ... files are edited through the file accessor ...
//!     manager.commit("Update agent mappings")?;
//!     manager.destroy()
//! }
//! ```

pub mod error;
pub mod identity;
pub mod ignore;
pub mod settings;
pub mod versioning;

pub use error::{Error, Result};
pub use identity::{FixedIdentity, IdentityProvider};
pub use ignore::IgnorePolicy;
pub use settings::{DEFAULT_AMEND_TIMEOUT_MS, IgnoreSettings, VersioningSettings};
pub use versioning::{
    AmendWindow, CommitAction, CommitOutcome, StageSummary, VersioningManager, decide,
};
