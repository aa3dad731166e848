//! Integration tests for the identity loader against in-memory
//! SurrealDB.

use focal_auth::config::AuthConfig;
use focal_auth::identity::IdentityService;
use focal_auth::token::{issue_session_token, verify_session_token};
use focal_core::models::user::{AuthProvider, CreateUser};
use focal_core::store::UserStore;
use focal_db::SurrealUserStore;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealUserStore<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    focal_db::run_migrations(&db).await.unwrap();
    SurrealUserStore::new(db)
}

#[tokio::test]
async fn verified_subject_loads_profile() {
    let store = setup().await;
    let user = store
        .create(CreateUser {
            email: "anna@example.com".into(),
            display_name: "Anna".into(),
            password: Some("correct-horse-battery".into()),
            provider: AuthProvider::Email,
            avatar_url: None,
        })
        .await
        .unwrap();

    let config = AuthConfig::new("identity-test-secret", false).unwrap();
    let token = issue_session_token(user.id, &user.email, &config).unwrap();
    let claims = verify_session_token(&token, &config).unwrap();

    let identity = IdentityService::new(store);
    let loaded = identity.load(claims.user_id().unwrap()).await.unwrap();
    assert_eq!(loaded.id, user.id);
    assert_eq!(loaded.email, "anna@example.com");
}

#[tokio::test]
async fn deleted_subject_loads_as_none() {
    // A token stays verifiable for its full lifetime even after the
    // account is gone; the loader is where that resolves to
    // "unauthenticated".
    let store = setup().await;
    let config = AuthConfig::new("identity-test-secret", false).unwrap();

    let orphan_id = Uuid::new_v4();
    let token = issue_session_token(orphan_id, "ghost@example.com", &config).unwrap();
    let claims = verify_session_token(&token, &config).unwrap();

    let identity = IdentityService::new(store);
    assert!(identity.load(claims.user_id().unwrap()).await.is_none());
}

#[tokio::test]
async fn every_load_is_a_fresh_read() {
    let store = setup().await;
    let user = store
        .create(CreateUser {
            email: "anna@example.com".into(),
            display_name: "Anna".into(),
            password: None,
            provider: AuthProvider::Google,
            avatar_url: None,
        })
        .await
        .unwrap();

    let identity = IdentityService::new(store);
    assert!(identity.load(user.id).await.is_some());
    assert!(identity.load(user.id).await.is_some());
}
