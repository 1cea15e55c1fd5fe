//! Editor session state machine.
//!
//! The loading/editing/saving flags of a typical admin UI are modeled
//! as an explicit tagged state. Mutations are only legal while Editing;
//! explicit save and auto-save both persist through the same
//! revision-checked update, so neither path can silently overwrite the
//! other out of order.

use pressroom_core::TenantContext;
use pressroom_core::content::{derive_excerpt, validate_block};
use pressroom_core::error::PressroomResult;
use pressroom_core::models::blog::{Author, Blog, BlogStatus, FeaturedImage, UpdateBlog};
use pressroom_core::models::block::Block;
use pressroom_core::repository::BlogRepository;
use pressroom_core::slug::generate_slug;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::EditorError;

/// Validate the required fields of a post.
///
/// Shared by explicit save, auto-save gating, and post creation.
pub fn validate_post(title: &str, author: &Author, blocks: &[Block]) -> Result<(), EditorError> {
    if title.trim().is_empty() {
        return Err(EditorError::MissingTitle);
    }
    if author.name.trim().is_empty() {
        return Err(EditorError::MissingAuthor);
    }
    if blocks.is_empty() {
        return Err(EditorError::NoBlocks);
    }
    for block in blocks {
        validate_block(block).map_err(|e| EditorError::InvalidBlock(e.to_string()))?;
    }
    Ok(())
}

/// Working copy of a blog inside an open editor.
#[derive(Debug, Clone)]
pub struct Draft {
    pub id: Uuid,
    pub title: String,
    pub author: Author,
    pub blocks: Vec<Block>,
    pub featured_image: Option<FeaturedImage>,
    pub status: BlogStatus,
    /// Slug as currently persisted; only rewritten by explicit save.
    pub stored_slug: String,
    /// Revision of the last snapshot read or written.
    pub revision: u64,
}

impl Draft {
    fn from_blog(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            blocks: blog.blocks,
            featured_image: blog.featured_image,
            status: blog.status,
            stored_slug: blog.slug,
            revision: blog.revision,
        }
    }
}

/// Editor lifecycle state.
#[derive(Debug, Clone)]
pub enum EditorState {
    /// Document fetch in progress.
    Loading,
    /// Document loaded; mutations allowed.
    Editing { draft: Draft },
    /// Explicit save in flight; mutations rejected.
    Saving { draft: Draft },
    /// Load failed (missing document or store error).
    Failed { message: String },
}

/// Outcome of one auto-save tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// Nothing to do: clean, invalid, or not editing.
    Skipped,
    Saved,
    /// Write failed; recorded and retried no sooner than the next tick.
    Failed(String),
}

/// An open editor over one post.
///
/// Generic over the repository implementation so the editor layer has
/// no dependency on the database crate.
pub struct EditorSession<B: BlogRepository> {
    repo: B,
    ctx: TenantContext,
    state: EditorState,
    dirty: bool,
    autosave_error: Option<String>,
}

impl<B: BlogRepository> EditorSession<B> {
    /// Open the editor for an existing post.
    ///
    /// Fetches the document and lands in `Editing`, or in `Failed` when
    /// the post is missing or the store errors.
    pub async fn open(repo: B, ctx: TenantContext, id: Uuid) -> Self {
        let mut session = Self {
            repo,
            ctx,
            state: EditorState::Loading,
            dirty: false,
            autosave_error: None,
        };

        match session.repo.get_by_id(ctx.tenant_id(), id).await {
            Ok(blog) => {
                debug!(blog_id = %id, "editor opened");
                session.state = EditorState::Editing {
                    draft: Draft::from_blog(blog),
                };
            }
            Err(e) => {
                warn!(blog_id = %id, error = %e, "editor failed to load post");
                session.state = EditorState::Failed {
                    message: e.to_string(),
                };
            }
        }

        session
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditorState::Editing { draft } | EditorState::Saving { draft } => Some(draft),
            _ => None,
        }
    }

    /// Unsaved changes since the last successful persist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Error from the most recent auto-save attempt, if any.
    pub fn autosave_error(&self) -> Option<&str> {
        self.autosave_error.as_deref()
    }

    /// Whether the current draft would pass save validation.
    pub fn is_valid(&self) -> bool {
        self.draft()
            .is_some_and(|d| validate_post(&d.title, &d.author, &d.blocks).is_ok())
    }

    /// Slug the current title would produce on explicit save.
    pub fn preview_slug(&self) -> Option<String> {
        self.draft().map(|d| generate_slug(&d.title))
    }

    /// True when the previewed slug differs from the persisted one.
    ///
    /// Surfaced as a warning in the editor; never auto-corrected.
    pub fn slug_diverged(&self) -> bool {
        self.draft()
            .is_some_and(|d| generate_slug(&d.title) != d.stored_slug)
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, EditorError> {
        match &mut self.state {
            EditorState::Editing { draft } => Ok(draft),
            _ => Err(EditorError::NotEditable),
        }
    }

    // -------------------------------------------------------------------
    // Mutations (Editing only; each marks the session dirty)
    // -------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditorError> {
        self.draft_mut()?.title = title.into();
        self.dirty = true;
        Ok(())
    }

    pub fn set_author(&mut self, author: Author) -> Result<(), EditorError> {
        self.draft_mut()?.author = author;
        self.dirty = true;
        Ok(())
    }

    pub fn set_status(&mut self, status: BlogStatus) -> Result<(), EditorError> {
        self.draft_mut()?.status = status;
        self.dirty = true;
        Ok(())
    }

    pub fn set_featured_image(
        &mut self,
        image: Option<FeaturedImage>,
    ) -> Result<(), EditorError> {
        self.draft_mut()?.featured_image = image;
        self.dirty = true;
        Ok(())
    }

    pub fn push_block(&mut self, block: Block) -> Result<(), EditorError> {
        self.draft_mut()?.blocks.push(block);
        self.dirty = true;
        Ok(())
    }

    pub fn insert_block(&mut self, index: usize, block: Block) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        if index > draft.blocks.len() {
            return Err(EditorError::BlockIndex(index));
        }
        draft.blocks.insert(index, block);
        self.dirty = true;
        Ok(())
    }

    pub fn update_block(&mut self, index: usize, block: Block) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        let slot = draft
            .blocks
            .get_mut(index)
            .ok_or(EditorError::BlockIndex(index))?;
        *slot = block;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_block(&mut self, index: usize) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        if index >= draft.blocks.len() {
            return Err(EditorError::BlockIndex(index));
        }
        draft.blocks.remove(index);
        self.dirty = true;
        Ok(())
    }

    /// Reorder a block; order within the post is user-controlled.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        if from >= draft.blocks.len() {
            return Err(EditorError::BlockIndex(from));
        }
        if to >= draft.blocks.len() {
            return Err(EditorError::BlockIndex(to));
        }
        let block = draft.blocks.remove(from);
        draft.blocks.insert(to, block);
        self.dirty = true;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------

    /// Explicit save.
    ///
    /// Validates the draft, then persists everything including a slug
    /// recomputed from the title and the chosen status. Validation and
    /// store failures both land back in `Editing` with the error
    /// returned for inline display.
    pub async fn save(&mut self) -> PressroomResult<Blog> {
        let draft = match std::mem::replace(&mut self.state, EditorState::Loading) {
            EditorState::Editing { draft } => draft,
            other => {
                self.state = other;
                return Err(EditorError::NotEditable.into());
            }
        };

        if let Err(e) = validate_post(&draft.title, &draft.author, &draft.blocks) {
            self.state = EditorState::Editing { draft };
            return Err(e.into());
        }

        let update = UpdateBlog {
            title: Some(draft.title.clone()),
            slug: Some(generate_slug(&draft.title)),
            blocks: Some(draft.blocks.clone()),
            author: Some(draft.author.clone()),
            featured_image: Some(draft.featured_image.clone()),
            excerpt: Some(derive_excerpt(&draft.blocks)),
            status: Some(draft.status),
        };

        let id = draft.id;
        let revision = draft.revision;
        self.state = EditorState::Saving {
            draft: draft.clone(),
        };

        match self
            .repo
            .update(self.ctx.tenant_id(), id, update, revision)
            .await
        {
            Ok(blog) => {
                let mut draft = draft;
                draft.revision = blog.revision;
                draft.stored_slug = blog.slug.clone();
                self.dirty = false;
                self.autosave_error = None;
                self.state = EditorState::Editing { draft };
                info!(blog_id = %id, revision = blog.revision, "post saved");
                Ok(blog)
            }
            Err(e) => {
                warn!(blog_id = %id, error = %e, "save failed");
                self.state = EditorState::Editing { draft };
                Err(e)
            }
        }
    }

    /// One auto-save tick: best-effort draft snapshot.
    ///
    /// Fires only while Editing, dirty, and valid. Persists with
    /// `Draft` status and leaves the stored slug untouched. A failure
    /// is recorded and not retried before the next tick.
    pub async fn autosave_tick(&mut self) -> AutosaveOutcome {
        let draft = match &self.state {
            EditorState::Editing { draft } => draft.clone(),
            _ => return AutosaveOutcome::Skipped,
        };

        if !self.dirty || validate_post(&draft.title, &draft.author, &draft.blocks).is_err() {
            return AutosaveOutcome::Skipped;
        }

        let update = UpdateBlog {
            title: Some(draft.title.clone()),
            slug: None,
            blocks: Some(draft.blocks.clone()),
            author: Some(draft.author.clone()),
            featured_image: Some(draft.featured_image.clone()),
            excerpt: Some(derive_excerpt(&draft.blocks)),
            status: Some(BlogStatus::Draft),
        };

        match self
            .repo
            .update(self.ctx.tenant_id(), draft.id, update, draft.revision)
            .await
        {
            Ok(blog) => {
                if let Ok(current) = self.draft_mut() {
                    current.revision = blog.revision;
                }
                self.dirty = false;
                self.autosave_error = None;
                debug!(blog_id = %draft.id, revision = blog.revision, "auto-saved draft");
                AutosaveOutcome::Saved
            }
            Err(e) => {
                warn!(blog_id = %draft.id, error = %e, "auto-save failed");
                let message = e.to_string();
                self.autosave_error = Some(message.clone());
                AutosaveOutcome::Failed(message)
            }
        }
    }
}
