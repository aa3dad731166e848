//! Database-specific error types and conversions.

use focal_core::error::FocalError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl From<DbError> for FocalError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => FocalError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => FocalError::AlreadyExists { entity },
            DbError::Crypto(msg) => FocalError::Crypto(msg),
            other => FocalError::Database(other.to_string()),
        }
    }
}
