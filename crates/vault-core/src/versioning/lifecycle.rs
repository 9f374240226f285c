//! Release of the version store

use vault_git::VersionStore;

use super::VersioningManager;
use crate::Result;

impl<S: VersionStore> VersioningManager<S> {
    /// Release the version store.
    ///
    /// The store is released at most once however often this is called, and
    /// a manager that was never initialized has nothing to release. Any later
    /// operation fails with [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;

        match self.store.take() {
            Some(mut store) => {
                store.close()?;
                tracing::debug!(root = %self.root, "Released configuration history");
            }
            None => {
                tracing::debug!(root = %self.root, "No configuration history to release");
            }
        }
        Ok(())
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl<S: VersionStore> Drop for VersioningManager<S> {
    fn drop(&mut self) {
        if let Err(e) = self.destroy() {
            tracing::warn!(root = %self.root, error = %e, "Failed to release configuration history");
        }
    }
}
