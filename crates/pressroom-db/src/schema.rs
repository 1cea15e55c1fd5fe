//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

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
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Tenants (global scope)
-- =======================================================================
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD domain ON TABLE tenant TYPE string;
DEFINE FIELD tier ON TABLE tenant TYPE string \
    ASSERT $value IN ['Free', 'Starter', 'Pro', 'Enterprise'];
DEFINE FIELD settings ON TABLE tenant TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD created_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_tenant_domain ON TABLE tenant COLUMNS domain UNIQUE;

-- =======================================================================
-- Members (tenant scope)
-- =======================================================================
DEFINE TABLE member SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE member TYPE string;
DEFINE FIELD user_uid ON TABLE member TYPE string;
DEFINE FIELD name ON TABLE member TYPE string;
DEFINE FIELD email ON TABLE member TYPE string;
DEFINE FIELD role ON TABLE member TYPE string \
    ASSERT $value IN ['Viewer', 'Editor', 'Admin', 'SuperAdmin'];
DEFINE FIELD created_at ON TABLE member TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_member_tenant_uid ON TABLE member \
    COLUMNS tenant_id, user_uid UNIQUE;

-- =======================================================================
-- Blogs (tenant scope)
-- =======================================================================
DEFINE TABLE blog SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE blog TYPE string;
DEFINE FIELD title ON TABLE blog TYPE string;
DEFINE FIELD slug ON TABLE blog TYPE string;
DEFINE FIELD blocks ON TABLE blog TYPE array;
DEFINE FIELD blocks.* ON TABLE blog TYPE object FLEXIBLE;
DEFINE FIELD author ON TABLE blog TYPE object;
DEFINE FIELD author.name ON TABLE blog TYPE string;
DEFINE FIELD author.email ON TABLE blog TYPE string;
DEFINE FIELD author.uid ON TABLE blog TYPE string;
DEFINE FIELD featured_image ON TABLE blog TYPE option<object> FLEXIBLE;
DEFINE FIELD excerpt ON TABLE blog TYPE string;
DEFINE FIELD status ON TABLE blog TYPE string \
    ASSERT $value IN ['Draft', 'Published'];
DEFINE FIELD revision ON TABLE blog TYPE int DEFAULT 0;
DEFINE FIELD created_at ON TABLE blog TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE blog TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_blog_tenant_slug ON TABLE blog \
    COLUMNS tenant_id, slug UNIQUE;
DEFINE INDEX idx_blog_tenant_created ON TABLE blog \
    COLUMNS tenant_id, created_at;

-- =======================================================================
-- Graph Edge Tables (relations)
-- =======================================================================

-- Tenant -> Blog ownership
DEFINE TABLE has_blog TYPE RELATION SCHEMAFULL;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
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

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
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

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn schema_v1_defines_all_tables() {
        for table in ["tenant", "member", "blog", "has_blog"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} ")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
