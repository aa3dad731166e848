//! Focal Auth — session token issuance/verification, the session
//! cookie contract, password verification, and on-demand identity
//! loading.

pub mod config;
pub mod cookie;
pub mod error;
pub mod identity;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use identity::IdentityService;
pub use token::SessionClaims;
