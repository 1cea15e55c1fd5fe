//! Error types for the Pressroom system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PressroomError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Revision conflict on {entity} {id}: expected revision {expected}")]
    RevisionConflict {
        entity: String,
        id: String,
        expected: u64,
    },

    #[error("Membership required: {reason}")]
    MembershipDenied { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Tenant context missing or invalid")]
    TenantContext,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PressroomResult<T> = Result<T, PressroomError>;
