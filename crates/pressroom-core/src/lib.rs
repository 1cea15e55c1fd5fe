//! Pressroom Core — domain models, repository traits, and the pure
//! content rules (slugs, excerpts, list queries) shared across crates.

pub mod content;
pub mod context;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod slug;

pub use context::TenantContext;
pub use error::{PressroomError, PressroomResult};
