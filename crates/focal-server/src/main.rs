//! Focal Server — application entry point.
//!
//! Request pipeline: tenant resolution (host-based rewrite) runs
//! first, then session enforcement, then the route handlers.

mod config;
mod error;
mod routes;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use focal_core::error::{FocalError, FocalResult};
use focal_db::{DbManager, SurrealUserStore, run_migrations};
use focal_gateway::{AccessGuard, Gateway, TenantResolver, enforce_session, resolve_tenant};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("focal=info".parse().unwrap()))
        .json()
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Focal server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> FocalResult<()> {
    let config = ServerConfig::from_env()?;

    let manager = DbManager::connect(&config.db)
        .await
        .map_err(|e| FocalError::Database(e.to_string()))?;
    run_migrations(manager.client()).await?;

    let state = AppState {
        auth: config.auth.clone(),
        users: SurrealUserStore::new(manager.client().clone()),
    };

    let gateway = Arc::new(Gateway {
        resolver: TenantResolver::new(config.base_domain.clone()),
        guard: AccessGuard::new(config.auth.clone()),
    });

    let app = routes::router(state)
        .layer(from_fn_with_state(gateway.clone(), enforce_session))
        .layer(from_fn_with_state(gateway, resolve_tenant));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| FocalError::Internal(format!("bind {}: {e}", config.bind_addr)))?;

    tracing::info!(
        addr = %config.bind_addr,
        base_domain = %config.base_domain,
        "Focal server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| FocalError::Internal(e.to_string()))
}
