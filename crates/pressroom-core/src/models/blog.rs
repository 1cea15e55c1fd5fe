//! Blog domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::block::Block;

/// Publication status of a post.
///
/// Auto-save always persists `Draft`; explicit save persists the status
/// chosen in the editor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlogStatus {
    Draft,
    Published,
}

/// Author snapshot embedded in a blog at save time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
    /// External identity of the author (auth-provider uid).
    pub uid: String,
}

/// Featured image with alt text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeaturedImage {
    pub url: String,
    pub alt: String,
}

/// A blog post, owned by exactly one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    /// URL-safe identifier derived from the title. Only rewritten on
    /// explicit save, so it can lag behind the title preview.
    pub slug: String,
    /// Ordered content blocks.
    pub blocks: Vec<Block>,
    pub author: Author,
    pub featured_image: Option<FeaturedImage>,
    /// First text block stripped of tags, truncated to 160 characters.
    pub excerpt: String,
    pub status: BlogStatus,
    /// Optimistic-concurrency token; every successful update increments
    /// it, and every update must present the value it read.
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new post.
///
/// Slug and excerpt are derived from the title and blocks at the
/// storage boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlog {
    pub tenant_id: Uuid,
    pub title: String,
    pub blocks: Vec<Block>,
    pub author: Author,
    pub featured_image: Option<FeaturedImage>,
    pub status: BlogStatus,
}

/// Fields that can be updated on an existing post.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBlog {
    pub title: Option<String>,
    /// Omitted by auto-save; explicit save sets it from the title.
    pub slug: Option<String>,
    pub blocks: Option<Vec<Block>>,
    pub author: Option<Author>,
    /// `Some(Some(v))` = set, `Some(None)` = clear, `None` = no change.
    pub featured_image: Option<Option<FeaturedImage>>,
    pub excerpt: Option<String>,
    pub status: Option<BlogStatus>,
}
