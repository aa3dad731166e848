//! Focal Database — SurrealDB connection management, schema
//! migrations, and the [`UserStore`] implementation.
//!
//! [`UserStore`]: focal_core::store::UserStore

mod connection;
mod error;
mod schema;
mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
pub use store::SurrealUserStore;
