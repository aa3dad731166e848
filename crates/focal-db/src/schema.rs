//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables use SCHEMAFULL mode for data integrity. UUIDs are stored as
//! strings. Enums are stored as strings with ASSERT constraints.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "users",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — user accounts
// -----------------------------------------------------------------------

// Free plan starts with 2 GiB of storage.
const SCHEMA_V1: &str = "\
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD display_name ON TABLE user TYPE string;
DEFINE FIELD avatar_url ON TABLE user TYPE option<string>;
DEFINE FIELD provider ON TABLE user TYPE string \
    ASSERT $value IN ['Email', 'Google'];
DEFINE FIELD password_hash ON TABLE user TYPE option<string>;
DEFINE FIELD plan ON TABLE user TYPE string \
    ASSERT $value IN ['Free', 'Pro', 'Studio'] DEFAULT 'Free';
DEFINE FIELD subscription_status ON TABLE user TYPE string \
    ASSERT $value IN ['Active', 'Trialing', 'PastDue', 'Canceled'] \
    DEFAULT 'Active';
DEFINE FIELD storage_used_bytes ON TABLE user TYPE int DEFAULT 0;
DEFINE FIELD storage_limit_bytes ON TABLE user TYPE int \
    DEFAULT 2147483648;
DEFINE FIELD billing_customer_id ON TABLE user TYPE option<string>;
DEFINE FIELD billing_subscription_id ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
";

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;
        }
    }

    Ok(())
}
