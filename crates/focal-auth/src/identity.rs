//! On-demand identity loading.
//!
//! The access guard only proves a token's signature and freshness;
//! handlers that need the full profile exchange the verified subject id
//! for the durable record here. Every call is a fresh store read — no
//! cache — because plan and storage fields change underneath us via
//! billing webhooks and must never be served stale to enforcement
//! logic.

use focal_core::error::FocalError;
use focal_core::models::user::User;
use focal_core::store::UserStore;
use tracing::warn;
use uuid::Uuid;

/// Read-through loader from verified subject id to user record.
///
/// Generic over the store implementation so the auth layer has no
/// dependency on the database crate.
pub struct IdentityService<U: UserStore> {
    store: U,
}

impl<U: UserStore> IdentityService<U> {
    pub fn new(store: U) -> Self {
        Self { store }
    }

    /// Load the user referenced by a previously verified token.
    ///
    /// `None` means "treat as unauthenticated": either the row is gone
    /// (account deleted after issuance, before expiry) or the store
    /// read failed unexpectedly. Store failures are logged but fail
    /// closed — an outage must never widen access.
    pub async fn load(&self, user_id: Uuid) -> Option<User> {
        match self.store.get_by_id(user_id).await {
            Ok(user) => Some(user),
            Err(FocalError::NotFound { .. }) => None,
            Err(err) => {
                warn!(%user_id, error = %err, "identity load failed, treating as not found");
                None
            }
        }
    }
}
