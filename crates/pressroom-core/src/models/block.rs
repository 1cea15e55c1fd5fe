//! Content block model.

use serde::{Deserialize, Serialize};

/// A typed unit of blog content, composed in sequence to form a post.
///
/// Order within the blog is significant and user-controlled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Rich HTML content.
    Text { html: String },
    /// Hosted image with alt text.
    Image { url: String, alt: String },
    /// Embedded video; the URL must point at a known provider.
    Video { url: String },
}

impl Block {
    /// Returns the inner HTML if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Text { html } => Some(html),
            _ => None,
        }
    }
}
