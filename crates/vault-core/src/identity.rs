//! Resolution of the acting identity.

use vault_git::Actor;

/// Resolves who is making the current change.
///
/// Invoked on every commit rather than once at construction, so the identity
/// can follow the current request. Any `Fn() -> Actor` closure qualifies.
pub trait IdentityProvider: Send + Sync {
    fn current_actor(&self) -> Actor;
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Actor + Send + Sync,
{
    fn current_actor(&self) -> Actor {
        self()
    }
}

/// Provider that always answers with the same actor.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub Actor);

impl IdentityProvider for FixedIdentity {
    fn current_actor(&self) -> Actor {
        self.0.clone()
    }
}
