//! Authentication configuration.

use focal_core::error::{FocalError, FocalResult};

/// Seven days, the session lifetime the cookie contract promises.
pub const DEFAULT_SESSION_LIFETIME_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration for session token issuance and verification.
///
/// Constructed once at startup and passed to the codec and guard at
/// construction time — never read from ad hoc global lookups, so tests
/// can supply fixtures without touching process environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for session token signing (HS256). Shared by every
    /// component that mints or verifies tokens.
    pub session_secret: String,
    /// Session token lifetime in seconds (default: 604 800 = 7 days).
    pub session_lifetime_secs: u64,
    /// Mark the session cookie `Secure` (set in production, off for
    /// local plain-HTTP development).
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Build a config with the default 7-day lifetime.
    ///
    /// Fails with [`FocalError::Configuration`] when the secret is
    /// empty — serving traffic with an unverifiable secret would make
    /// every session forgeable, so startup must abort instead.
    pub fn new(session_secret: impl Into<String>, cookie_secure: bool) -> FocalResult<Self> {
        let session_secret = session_secret.into();
        if session_secret.is_empty() {
            return Err(FocalError::Configuration(
                "session signing secret is not set".into(),
            ));
        }
        Ok(Self {
            session_secret,
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
            cookie_secure,
        })
    }
}
