//! Auth entry-point handlers.
//!
//! These are the only routes that mint or clear session tokens; they
//! share the codec and secret with the access guard, so a token minted
//! here always verifies there.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use focal_auth::config::AuthConfig;
use focal_auth::cookie::{clear_session_cookie, session_cookie, token_from_cookie_header};
use focal_auth::identity::IdentityService;
use focal_auth::password::verify_password;
use focal_auth::token::{issue_session_token, verify_session_token};
use focal_core::error::FocalError;
use focal_core::models::user::{AuthProvider, CreateUser, Plan, SubscriptionStatus, User};
use focal_core::store::UserStore;
use focal_db::SurrealUserStore;
use serde::{Deserialize, Serialize};
use surrealdb::engine::remote::ws::Client;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthConfig,
    pub users: SurrealUserStore<Client>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .with_state(state)
}

/// Public profile projection returned by the auth endpoints. The
/// password hash and billing references stay server-side.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub provider: AuthProvider,
    pub plan: Plan,
    pub subscription_status: SubscriptionStatus,
    pub storage_used_bytes: u64,
    pub storage_limit_bytes: u64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            provider: user.provider,
            plan: user.plan,
            subscription_status: user.subscription_status,
            storage_used_bytes: user.storage_used_bytes,
            storage_limit_bytes: user.storage_limit_bytes,
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Email + password login. A bad email and a bad password produce the
/// same 401 — no account-existence oracle.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .get_by_email(&body.email)
        .await
        .map_err(|_| ApiError::unauthorized())?;

    // OAuth-only accounts have no password to check.
    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(ApiError::unauthorized)?;

    let valid = verify_password(&body.password, hash)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::unauthorized());
    }

    let token = issue_session_token(user.id, &user.email, &state.auth)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let cookie = session_cookie(token, &state.auth);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(UserResponse::from(user)),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Email registration: create the account and log it in immediately
/// with the same codec the login flow uses.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !body.email.contains('@') {
        return Err(FocalError::Validation {
            message: "invalid email address".into(),
        }
        .into());
    }
    if body.password.len() < 8 {
        return Err(FocalError::Validation {
            message: "password must be at least 8 characters".into(),
        }
        .into());
    }

    let user = state
        .users
        .create(CreateUser {
            email: body.email,
            display_name: body.display_name,
            password: Some(body.password),
            provider: AuthProvider::Email,
            avatar_url: None,
        })
        .await?;

    let token = issue_session_token(user.id, &user.email, &state.auth)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let cookie = session_cookie(token, &state.auth);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(UserResponse::from(user)),
    ))
}

/// Logout clears the cookie client-side. The token itself stays valid
/// until natural expiry — there is no server-side revocation.
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(&state.auth);
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cookie.to_string())],
    )
}

/// Current-user projection: verified token → fresh identity read.
/// A verified token whose subject row is gone is unauthenticated, not
/// a server error.
async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let token = headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(token_from_cookie_header)
        .ok_or_else(ApiError::unauthorized)?;

    let claims =
        verify_session_token(&token, &state.auth).map_err(|_| ApiError::unauthorized())?;
    let user_id = claims.user_id().map_err(|_| ApiError::unauthorized())?;

    let identity = IdentityService::new(state.users.clone());
    let user = identity.load(user_id).await.ok_or_else(ApiError::unauthorized)?;

    Ok(Json(UserResponse::from(user)))
}
