//! Integration tests for the editor session state machine using
//! in-memory SurrealDB.

use pressroom_core::TenantContext;
use pressroom_core::error::PressroomError;
use pressroom_core::models::blog::{Author, BlogStatus, CreateBlog, UpdateBlog};
use pressroom_core::models::block::Block;
use pressroom_core::models::tenant::{CreateTenant, SubscriptionTier};
use pressroom_core::repository::{BlogRepository, TenantRepository};
use pressroom_db::repository::{SurrealBlogRepository, SurrealTenantRepository};
use pressroom_editor::{AutosaveOutcome, EditorError, EditorSession, EditorState};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: in-memory DB with one tenant and one post.
async fn setup() -> (SurrealBlogRepository<Db>, TenantContext, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pressroom_db::run_migrations(&db).await.unwrap();

    let tenant = SurrealTenantRepository::new(db.clone())
        .create(CreateTenant {
            name: "Editorial".into(),
            domain: "editorial.example.com".into(),
            tier: SubscriptionTier::Pro,
            settings: None,
        })
        .await
        .unwrap();
    let ctx = TenantContext::new(tenant.id);

    let repo = SurrealBlogRepository::new(db);
    let blog = repo
        .create(CreateBlog {
            tenant_id: tenant.id,
            title: "Original Title".into(),
            blocks: vec![Block::Text {
                html: "<p>Original body</p>".into(),
            }],
            author: author(),
            featured_image: None,
            status: BlogStatus::Draft,
        })
        .await
        .unwrap();

    (repo, ctx, blog.id)
}

fn author() -> Author {
    Author {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        uid: "uid-alice".into(),
    }
}

#[tokio::test]
async fn open_missing_post_lands_in_failed() {
    let (repo, ctx, _) = setup().await;

    let session = EditorSession::open(repo, ctx, Uuid::new_v4()).await;
    assert!(matches!(session.state(), EditorState::Failed { .. }));
    assert!(session.draft().is_none());
}

#[tokio::test]
async fn mutations_are_rejected_outside_editing() {
    let (repo, ctx, _) = setup().await;

    let mut session = EditorSession::open(repo, ctx, Uuid::new_v4()).await;
    let result = session.set_title("Nope");
    assert!(matches!(result, Err(EditorError::NotEditable)));
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn edit_and_save_round_trip() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo.clone(), ctx, blog_id).await;
    assert!(matches!(session.state(), EditorState::Editing { .. }));
    assert!(!session.is_dirty());

    session.set_title("Renamed Post").unwrap();
    session
        .push_block(Block::Text {
            html: "<p>More body</p>".into(),
        })
        .unwrap();
    assert!(session.is_dirty());

    let saved = session.save().await.unwrap();
    assert_eq!(saved.title, "Renamed Post");
    assert_eq!(saved.slug, "renamed-post");
    assert_eq!(saved.revision, 1);
    assert!(!session.is_dirty());
    assert!(matches!(session.state(), EditorState::Editing { .. }));

    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.blocks.len(), 2);
    assert_eq!(stored.slug, "renamed-post");
}

#[tokio::test]
async fn validation_failure_returns_to_editing_without_writing() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo.clone(), ctx, blog_id).await;
    session.set_title("   ").unwrap();

    let result = session.save().await;
    assert!(matches!(result, Err(PressroomError::Validation { .. })));
    assert!(matches!(session.state(), EditorState::Editing { .. }));
    assert!(session.is_dirty());

    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.title, "Original Title");
    assert_eq!(stored.revision, 0);
}

#[tokio::test]
async fn slug_preview_diverges_until_explicit_save() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo.clone(), ctx, blog_id).await;
    assert!(!session.slug_diverged());

    session.set_title("Fresh Angle on Things").unwrap();
    assert_eq!(
        session.preview_slug().as_deref(),
        Some("fresh-angle-on-things")
    );
    assert!(session.slug_diverged());

    // Auto-save persists content but never the slug.
    assert_eq!(session.autosave_tick().await, AutosaveOutcome::Saved);
    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.title, "Fresh Angle on Things");
    assert_eq!(stored.slug, "original-title");
    assert!(session.slug_diverged());

    // Explicit save rewrites it.
    session.set_title("Fresh Angle on Things".to_string()).unwrap();
    session.save().await.unwrap();
    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.slug, "fresh-angle-on-things");
    assert!(!session.slug_diverged());
}

#[tokio::test]
async fn autosave_skips_clean_and_invalid_drafts() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo, ctx, blog_id).await;

    // Clean session: nothing to save.
    assert_eq!(session.autosave_tick().await, AutosaveOutcome::Skipped);

    // Dirty but invalid: still skipped.
    session.remove_block(0).unwrap();
    assert!(session.is_dirty());
    assert!(!session.is_valid());
    assert_eq!(session.autosave_tick().await, AutosaveOutcome::Skipped);
    assert!(session.is_dirty());
}

#[tokio::test]
async fn autosave_always_persists_draft_status() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo.clone(), ctx, blog_id).await;
    session.set_status(BlogStatus::Published).unwrap();

    assert_eq!(session.autosave_tick().await, AutosaveOutcome::Saved);
    assert!(!session.is_dirty());

    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.status, BlogStatus::Draft);

    // The chosen status lands on explicit save.
    session.set_status(BlogStatus::Published).unwrap();
    session.save().await.unwrap();
    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.status, BlogStatus::Published);
}

#[tokio::test]
async fn autosave_failure_is_recorded_and_state_survives() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo.clone(), ctx, blog_id).await;
    session.set_title("Local Edit").unwrap();

    // Another writer bumps the revision underneath the session.
    repo.update(
        ctx.tenant_id(),
        blog_id,
        UpdateBlog {
            title: Some("External Edit".into()),
            ..Default::default()
        },
        0,
    )
    .await
    .unwrap();

    let outcome = session.autosave_tick().await;
    assert!(matches!(outcome, AutosaveOutcome::Failed(_)));
    assert!(session.autosave_error().is_some());
    assert!(session.is_dirty());
    assert!(matches!(session.state(), EditorState::Editing { .. }));

    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.title, "External Edit");
}

#[tokio::test]
async fn stale_session_save_is_rejected() {
    let (repo, ctx, blog_id) = setup().await;

    let mut first = EditorSession::open(repo.clone(), ctx, blog_id).await;
    let mut second = EditorSession::open(repo.clone(), ctx, blog_id).await;

    first.set_title("First Writer").unwrap();
    first.save().await.unwrap();

    second.set_title("Second Writer").unwrap();
    let result = second.save().await;
    assert!(matches!(
        result,
        Err(PressroomError::RevisionConflict { .. })
    ));
    assert!(matches!(second.state(), EditorState::Editing { .. }));
    assert!(second.is_dirty());

    let stored = repo.get_by_id(ctx.tenant_id(), blog_id).await.unwrap();
    assert_eq!(stored.title, "First Writer");
}

#[tokio::test]
async fn block_operations_respect_bounds() {
    let (repo, ctx, blog_id) = setup().await;

    let mut session = EditorSession::open(repo, ctx, blog_id).await;

    session
        .push_block(Block::Image {
            url: "https://cdn.example.com/pic.png".into(),
            alt: "pic".into(),
        })
        .unwrap();
    session
        .insert_block(
            0,
            Block::Text {
                html: "<p>Intro</p>".into(),
            },
        )
        .unwrap();
    // Now: [Intro, Original body, Image]
    session.move_block(2, 0).unwrap();
    // Now: [Image, Intro, Original body]
    session
        .update_block(
            1,
            Block::Text {
                html: "<p>Rewritten intro</p>".into(),
            },
        )
        .unwrap();
    session.remove_block(2).unwrap();

    let draft = session.draft().unwrap();
    assert_eq!(draft.blocks.len(), 2);
    assert!(matches!(draft.blocks[0], Block::Image { .. }));
    assert_eq!(
        draft.blocks[1].as_text(),
        Some("<p>Rewritten intro</p>")
    );

    assert!(matches!(
        session.update_block(9, Block::Video { url: "x".into() }),
        Err(EditorError::BlockIndex(9))
    ));
    assert!(matches!(
        session.remove_block(2),
        Err(EditorError::BlockIndex(2))
    ));
    assert!(matches!(
        session.move_block(0, 5),
        Err(EditorError::BlockIndex(5))
    ));
}
