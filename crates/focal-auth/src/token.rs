//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the single process-wide session
//! secret. Every component that mints a token (login, registration,
//! OAuth completion) goes through [`issue_session_token`] so the codec
//! and secret can never diverge from what the access guard verifies.
//!
//! Claims are integrity-protected, not encrypted — nothing confidential
//! is carried. A verified token proves signature + freshness only; the
//! referenced user may no longer exist (see [`crate::identity`]).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
///
/// The payload shape is exact: tokens whose decoded payload carries
/// unknown fields are rejected rather than silently accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Subject email at issuance time.
    pub email: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    /// Parse the subject claim back into a user id.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject claim: {e}")))
    }
}

/// Issue a signed session token for the given subject.
///
/// Expiry is absolute: now + the configured session lifetime (7 days by
/// default). The signature is deterministic given secret + claims; only
/// the timestamps vary between calls.
pub fn issue_session_token(
    user_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + config.session_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.session_secret.as_bytes());
    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Verify a session token's signature and expiry and return its claims.
///
/// Expected failures (bad signature, malformed payload, past expiry)
/// come back as typed [`AuthError`] values — callers redirect to login,
/// they do not crash. Expiry is exact; no clock leeway is granted.
pub fn verify_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.session_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("unit-test-session-secret", false).unwrap()
    }

    #[test]
    fn roundtrip_preserves_subject_and_email() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_session_token(user_id, "alice@example.com", &config).unwrap();
        let claims = verify_session_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        // Hand-encode claims whose expiry is already in the past.
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            email: "alice@example.com".into(),
            iat: Utc::now().timestamp() - 700_000,
            exp: Utc::now().timestamp() - 100,
        };
        let key = EncodingKey::from_secret(config.session_secret.as_bytes());
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let err = verify_session_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let other = AuthConfig::new("a-completely-different-secret", false).unwrap();

        let token = issue_session_token(Uuid::new_v4(), "alice@example.com", &config).unwrap();
        let err = verify_session_token(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = issue_session_token(Uuid::new_v4(), "alice@example.com", &config).unwrap();

        let tampered = format!("{token}x");
        assert!(verify_session_token(&tampered, &config).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        let err = verify_session_token("not-a-token-at-all", &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn unknown_claims_are_rejected() {
        let config = test_config();

        #[derive(Serialize)]
        struct FatClaims {
            sub: String,
            email: String,
            iat: i64,
            exp: i64,
            role: String,
        }
        let claims = FatClaims {
            sub: Uuid::new_v4().to_string(),
            email: "alice@example.com".into(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
            role: "admin".into(),
        };
        let key = EncodingKey::from_secret(config.session_secret.as_bytes());
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let err = verify_session_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }
}
