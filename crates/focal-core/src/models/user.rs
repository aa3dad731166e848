//! User identity read model.
//!
//! The session/tenant core only ever reads this projection. Writes
//! (profile edits, billing webhook updates, account deletion) happen in
//! other request handlers that own their own write paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the account was created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuthProvider {
    Email,
    Google,
}

/// Subscription plan tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Plan {
    Free,
    Pro,
    Studio,
}

/// Billing-provider subscription state, kept current by webhook handlers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
}

/// A photographer account.
///
/// `password_hash` is `None` for OAuth-only accounts. Storage counters
/// and billing references are maintained elsewhere; this core treats
/// them as opaque read-model fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub provider: AuthProvider,
    pub password_hash: Option<String>,
    pub plan: Plan,
    pub subscription_status: SubscriptionStatus,
    pub storage_used_bytes: u64,
    pub storage_limit_bytes: u64,
    pub billing_customer_id: Option<String>,
    pub billing_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new account (email registration or first
/// OAuth login).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
    /// Raw password (hashed with Argon2id before storage). `None` for
    /// OAuth accounts.
    pub password: Option<String>,
    pub provider: AuthProvider,
    pub avatar_url: Option<String>,
}
