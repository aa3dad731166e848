//! Access guard — public-path classification and session enforcement.
//!
//! The single enforcement point for the whole application: every
//! protected-path addition goes through this allow-list, so redirect
//! logic cannot fork into parallel implementations.

use focal_auth::config::AuthConfig;
use focal_auth::token::verify_session_token;
use tracing::{debug, warn};

/// Route prefixes reachable without a session: login, registration,
/// password reset, OAuth entry points, public gallery viewing plus its
/// read API, and the health endpoint. The bare root `/` is public by
/// exact match.
pub const DEFAULT_PUBLIC_PREFIXES: &[&str] = &[
    "/healthz",
    "/login",
    "/register",
    "/password-reset",
    "/auth/google",
    "/auth/callback",
    "/g",
    "/sites",
    "/api/sites",
    "/api/auth/login",
    "/api/auth/register",
];

/// Where unauthenticated protected-path requests are sent.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// The configurable set of public path prefixes.
#[derive(Debug, Clone)]
pub struct PublicPaths {
    prefixes: Vec<String>,
}

impl PublicPaths {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_PUBLIC_PREFIXES.iter().copied())
    }

    /// Prefix matching is segment-aware: `/g` covers `/g/my-gallery`
    /// but not `/galleries`.
    pub fn is_public(&self, path: &str) -> bool {
        if path == "/" {
            return true;
        }
        self.prefixes.iter().any(|prefix| {
            path == prefix
                || (path.starts_with(prefix.as_str())
                    && path.as_bytes().get(prefix.len()) == Some(&b'/'))
        })
    }
}

/// Outcome of guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through unchanged. The guard attaches no
    /// identity — handlers that need the profile load it lazily.
    Allow,
    /// Protected path without a usable session.
    RedirectToLogin,
}

/// Classifies paths and enforces token presence/validity on protected
/// ones.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    config: AuthConfig,
    public: PublicPaths,
    login_path: String,
}

impl AccessGuard {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            public: PublicPaths::defaults(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }

    pub fn with_public_paths(mut self, public: PublicPaths) -> Self {
        self.public = public;
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Evaluate one resolved (post tenant-rewrite) request.
    ///
    /// An invalid or expired token behaves exactly like an absent one:
    /// the same redirect, nothing distinguishing the two to the client,
    /// and nothing logged above debug — token expiry is routine
    /// traffic, not an application error.
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> GuardDecision {
        if self.public.is_public(path) {
            return GuardDecision::Allow;
        }

        let Some(token) = token else {
            return GuardDecision::RedirectToLogin;
        };

        match verify_session_token(token, &self.config) {
            Ok(_) => GuardDecision::Allow,
            Err(err) => {
                // Expired/malformed tokens are routine traffic; only
                // genuine codec failures deserve attention.
                if err.is_routine() {
                    debug!(%path, error = %err, "rejecting session token");
                } else {
                    warn!(%path, error = %err, "session verification failed");
                }
                GuardDecision::RedirectToLogin
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focal_auth::token::issue_session_token;
    use uuid::Uuid;

    fn guard() -> AccessGuard {
        AccessGuard::new(AuthConfig::new("unit-test-session-secret", false).unwrap())
    }

    fn valid_token() -> String {
        let config = AuthConfig::new("unit-test-session-secret", false).unwrap();
        issue_session_token(Uuid::new_v4(), "anna@example.com", &config).unwrap()
    }

    #[test]
    fn root_is_public() {
        assert!(PublicPaths::defaults().is_public("/"));
    }

    #[test]
    fn prefix_match_is_segment_aware() {
        let public = PublicPaths::defaults();
        assert!(public.is_public("/g"));
        assert!(public.is_public("/g/my-gallery"));
        assert!(!public.is_public("/galleries"));
    }

    #[test]
    fn public_path_allows_without_cookie() {
        assert_eq!(guard().evaluate("/login", None), GuardDecision::Allow);
    }

    #[test]
    fn public_path_allows_with_garbage_cookie() {
        assert_eq!(
            guard().evaluate("/g/my-gallery", Some("garbage")),
            GuardDecision::Allow
        );
    }

    #[test]
    fn protected_path_without_token_redirects() {
        assert_eq!(
            guard().evaluate("/dashboard", None),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn protected_path_with_invalid_token_redirects() {
        // Same outcome as the absent-token case — no information leak
        // distinguishing "expired" from "absent".
        assert_eq!(
            guard().evaluate("/dashboard", Some("not.a.token")),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn protected_path_with_wrong_secret_redirects() {
        let other = AuthConfig::new("some-other-secret", false).unwrap();
        let forged = issue_session_token(Uuid::new_v4(), "anna@example.com", &other).unwrap();
        assert_eq!(
            guard().evaluate("/dashboard", Some(&forged)),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn protected_path_with_valid_token_allows() {
        let token = valid_token();
        assert_eq!(
            guard().evaluate("/dashboard", Some(&token)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn custom_allow_list_replaces_defaults() {
        let guard = guard().with_public_paths(PublicPaths::new(["/open"]));
        assert_eq!(guard.evaluate("/open/thing", None), GuardDecision::Allow);
        assert_eq!(
            guard.evaluate("/login", None),
            GuardDecision::RedirectToLogin
        );
    }
}
