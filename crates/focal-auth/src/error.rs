//! Authentication error types.

use focal_core::error::FocalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl AuthError {
    /// Whether this is a routine "no session" outcome rather than an
    /// application error. Expired and malformed tokens are treated
    /// identically to an absent cookie and are never logged as errors.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::TokenExpired | AuthError::TokenInvalid(_)
        )
    }
}

impl From<AuthError> for FocalError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => FocalError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => FocalError::Crypto(msg),
        }
    }
}
