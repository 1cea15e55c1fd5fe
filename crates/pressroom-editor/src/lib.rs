//! Pressroom Editor — editor session state machine, auto-save, and
//! blog/tenant orchestration services.

pub mod autosave;
pub mod config;
pub mod error;
pub mod service;
pub mod session;

pub use autosave::spawn_autosave;
pub use config::EditorConfig;
pub use error::EditorError;
pub use service::{BlogService, BulkDeleteReport, NewPost, TenantService};
pub use session::{AutosaveOutcome, Draft, EditorSession, EditorState};
