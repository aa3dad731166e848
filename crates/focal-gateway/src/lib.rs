//! Focal Gateway — per-request tenant resolution and session
//! enforcement.
//!
//! Every inbound request passes through two stages, in order: the
//! tenant resolver (host-based internal rewrite) and then the access
//! guard (public-path classification + token verification). Tenant
//! resolution runs first because public tenant galleries are
//! intentionally reachable without a session.

pub mod guard;
pub mod middleware;
pub mod tenant;

pub use guard::{AccessGuard, GuardDecision, PublicPaths};
pub use middleware::{Gateway, enforce_session, resolve_tenant};
pub use tenant::{RouteAction, TenantResolver};
