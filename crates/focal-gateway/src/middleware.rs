//! Axum middleware adapters for the resolver and guard.
//!
//! Wire both with [`axum::middleware::from_fn_with_state`]; the tenant
//! rewrite layer must sit outermost so it runs before session
//! enforcement:
//!
//! ```ignore
//! let gateway = Arc::new(Gateway { resolver, guard });
//! let app = Router::new()
//!     .layer(from_fn_with_state(gateway.clone(), enforce_session))
//!     .layer(from_fn_with_state(gateway, resolve_tenant));
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::http::uri::{PathAndQuery, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use focal_auth::cookie::token_from_cookie_header;
use tracing::trace;

use crate::guard::{AccessGuard, GuardDecision};
use crate::tenant::{RouteAction, TenantResolver};

/// Shared per-process gateway state.
#[derive(Debug, Clone)]
pub struct Gateway {
    pub resolver: TenantResolver,
    pub guard: AccessGuard,
}

/// Host-based tenant rewrite. Runs before authorization.
pub async fn resolve_tenant(
    State(gateway): State<Arc<Gateway>>,
    mut req: Request,
    next: Next,
) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .or_else(|| req.uri().host().map(str::to_owned));

    if let Some(host) = host {
        let path = req.uri().path().to_owned();
        let query = req.uri().query().map(str::to_owned);

        match gateway.resolver.resolve(&host, &path, query.as_deref()) {
            RouteAction::Passthrough => {}
            RouteAction::TenantHome { subdomain } => {
                trace!(%host, %subdomain, "rewriting tenant root to gallery listing");
                rewrite_uri(&mut req, &format!("/sites/{subdomain}"));
            }
            RouteAction::TenantPath {
                subdomain,
                path_and_query,
            } => {
                trace!(%host, %subdomain, target = %path_and_query, "tagging tenant path");
                rewrite_uri(&mut req, &path_and_query);
            }
        }
    }

    next.run(req).await
}

/// Session enforcement on the resolved request. Protected paths
/// without a verifiable token get a silent redirect to the login entry
/// point; everything else passes through unchanged.
pub async fn enforce_session(
    State(gateway): State<Arc<Gateway>>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(token_from_cookie_header);

    match gateway.guard.evaluate(req.uri().path(), token.as_deref()) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::RedirectToLogin => {
            Redirect::to(gateway.guard.login_path()).into_response()
        }
    }
}

/// Swap the request's path and query in place. A rewrite target that
/// fails to parse leaves the original URI untouched.
fn rewrite_uri(req: &mut Request, path_and_query: &str) {
    let Ok(pq) = path_and_query.parse::<PathAndQuery>() else {
        return;
    };
    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = Some(pq);
    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
}
