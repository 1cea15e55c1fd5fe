//! Database-specific error types and conversions.

use pressroom_core::error::PressroomError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Value conversion failed: {0}")]
    Convert(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Revision conflict: {entity} {id} expected revision {expected}")]
    RevisionConflict {
        entity: String,
        id: String,
        expected: u64,
    },
}

impl From<DbError> for PressroomError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => PressroomError::NotFound { entity, id },
            DbError::RevisionConflict {
                entity,
                id,
                expected,
            } => PressroomError::RevisionConflict {
                entity,
                id,
                expected,
            },
            other => PressroomError::Database(other.to_string()),
        }
    }
}
