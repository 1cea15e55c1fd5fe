//! Editor error types.

use pressroom_core::error::PressroomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("title is required")]
    MissingTitle,

    #[error("author is required")]
    MissingAuthor,

    #[error("a post needs at least one content block")]
    NoBlocks,

    #[error("invalid block: {0}")]
    InvalidBlock(String),

    #[error("block index {0} is out of range")]
    BlockIndex(usize),

    #[error("editor is not in an editable state")]
    NotEditable,
}

impl From<EditorError> for PressroomError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::NotEditable => PressroomError::Internal(err.to_string()),
            other => PressroomError::Validation {
                message: other.to_string(),
            },
        }
    }
}
