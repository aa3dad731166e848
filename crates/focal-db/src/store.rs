//! SurrealDB implementation of [`UserStore`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash.
//!
//! [`UserStore`]: focal_core::store::UserStore

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use focal_core::error::FocalResult;
use focal_core::models::user::{AuthProvider, CreateUser, Plan, SubscriptionStatus, User};
use focal_core::store::UserStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    provider: String,
    password_hash: Option<String>,
    plan: String,
    subscription_status: String,
    storage_used_bytes: u64,
    storage_limit_bytes: u64,
    billing_customer_id: Option<String>,
    billing_subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    provider: String,
    password_hash: Option<String>,
    plan: String,
    subscription_status: String,
    storage_used_bytes: u64,
    storage_limit_bytes: u64,
    billing_customer_id: Option<String>,
    billing_subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_provider(s: &str) -> Result<AuthProvider, DbError> {
    match s {
        "Email" => Ok(AuthProvider::Email),
        "Google" => Ok(AuthProvider::Google),
        other => Err(DbError::Query(format!("unknown auth provider: {other}"))),
    }
}

fn provider_to_string(p: AuthProvider) -> &'static str {
    match p {
        AuthProvider::Email => "Email",
        AuthProvider::Google => "Google",
    }
}

fn parse_plan(s: &str) -> Result<Plan, DbError> {
    match s {
        "Free" => Ok(Plan::Free),
        "Pro" => Ok(Plan::Pro),
        "Studio" => Ok(Plan::Studio),
        other => Err(DbError::Query(format!("unknown plan: {other}"))),
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DbError> {
    match s {
        "Active" => Ok(SubscriptionStatus::Active),
        "Trialing" => Ok(SubscriptionStatus::Trialing),
        "PastDue" => Ok(SubscriptionStatus::PastDue),
        "Canceled" => Ok(SubscriptionStatus::Canceled),
        other => Err(DbError::Query(format!(
            "unknown subscription status: {other}"
        ))),
    }
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            provider: parse_provider(&self.provider)?,
            password_hash: self.password_hash,
            plan: parse_plan(&self.plan)?,
            subscription_status: parse_status(&self.subscription_status)?,
            storage_used_bytes: self.storage_used_bytes,
            storage_limit_bytes: self.storage_limit_bytes,
            billing_customer_id: self.billing_customer_id,
            billing_subscription_id: self.billing_subscription_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        Ok(User {
            id,
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            provider: parse_provider(&self.provider)?,
            password_hash: self.password_hash,
            plan: parse_plan(&self.plan)?,
            subscription_status: parse_status(&self.subscription_status)?,
            storage_used_bytes: self.storage_used_bytes,
            storage_limit_bytes: self.storage_limit_bytes,
            billing_customer_id: self.billing_customer_id,
            billing_subscription_id: self.billing_subscription_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn hash_password(password: &str) -> Result<String, DbError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DbError::Crypto(format!("password hash: {e}")))
}

/// SurrealDB implementation of the user store.
#[derive(Clone)]
pub struct SurrealUserStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserStore for SurrealUserStore<C> {
    async fn create(&self, input: CreateUser) -> FocalResult<User> {
        // Pre-check the unique email; the index is the backstop.
        let existing = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE email = $email")
            .bind(("email", input.email.clone()))
            .await
            .map_err(DbError::from)?
            .take::<Vec<UserRowWithId>>(0)
            .map_err(DbError::from)?;
        if !existing.is_empty() {
            return Err(DbError::AlreadyExists {
                entity: "user".into(),
            }
            .into());
        }

        let password_hash = input
            .password
            .as_deref()
            .map(hash_password)
            .transpose()
            .map_err(DbError::from)?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, \
                 display_name = $display_name, \
                 avatar_url = $avatar_url, \
                 provider = $provider, \
                 password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("display_name", input.display_name))
            .bind(("avatar_url", input.avatar_url))
            .bind(("provider", provider_to_string(input.provider)))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        row.into_user(id).map_err(Into::into)
    }

    async fn get_by_id(&self, id: Uuid) -> FocalResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        row.into_user(id).map_err(Into::into)
    }

    async fn get_by_email(&self, email: &str) -> FocalResult<User> {
        let email_owned = email.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE email = $email")
            .bind(("email", email_owned.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("email={email_owned}"),
        })?;

        row.try_into_user().map_err(Into::into)
    }
}
