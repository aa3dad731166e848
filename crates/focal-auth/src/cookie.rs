//! Session cookie contract.
//!
//! One HTTP-only cookie named `token`, `SameSite=Lax`, `Secure` in
//! production, `Max-Age` equal to the session lifetime. Logout clears
//! it by issuing a replacement with `Max-Age=0` — the token itself
//! stays valid until natural expiry (no server-side revocation).

use cookie::time::Duration;
use cookie::{Cookie, SameSite};

use crate::config::AuthConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Build the `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(token: String, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.session_lifetime_secs as i64))
        .build()
}

/// Build the `Set-Cookie` value that clears the session cookie at logout.
pub fn clear_session_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Extract the session token from a raw `Cookie` request header, if
/// present. Unparseable fragments are skipped rather than failing the
/// request.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse(header.to_owned())
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_owned())
}
