//! Integration tests for the Blog repository implementation using
//! in-memory SurrealDB.

use pressroom_core::error::PressroomError;
use pressroom_core::models::blog::{Author, BlogStatus, CreateBlog, FeaturedImage, UpdateBlog};
use pressroom_core::models::block::Block;
use pressroom_core::models::tenant::{CreateTenant, SubscriptionTier};
use pressroom_core::repository::{BlogRepository, Pagination, TenantRepository};
use pressroom_db::repository::{SurrealBlogRepository, SurrealTenantRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, create a tenant.
async fn setup() -> (
    SurrealBlogRepository<surrealdb::engine::local::Db>,
    Uuid, // tenant_id
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pressroom_db::run_migrations(&db).await.unwrap();

    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let tenant = tenant_repo
        .create(CreateTenant {
            name: "Test Tenant".into(),
            domain: "test.example.com".into(),
            tier: SubscriptionTier::Free,
            settings: None,
        })
        .await
        .unwrap();

    (SurrealBlogRepository::new(db), tenant.id)
}

fn author() -> Author {
    Author {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        uid: "uid-alice".into(),
    }
}

fn post(tenant_id: Uuid, title: &str) -> CreateBlog {
    CreateBlog {
        tenant_id,
        title: title.into(),
        blocks: vec![Block::Text {
            html: format!("<p>Body of {title}</p>"),
        }],
        author: author(),
        featured_image: None,
        status: BlogStatus::Draft,
    }
}

#[tokio::test]
async fn create_derives_slug_and_excerpt() {
    let (repo, tenant_id) = setup().await;

    let blog = repo
        .create(CreateBlog {
            tenant_id,
            title: "Hello, World!".into(),
            blocks: vec![
                Block::Image {
                    url: "https://cdn.example.com/cover.png".into(),
                    alt: "cover".into(),
                },
                Block::Text {
                    html: "<p>First <b>paragraph</b> of the post</p>".into(),
                },
            ],
            author: author(),
            featured_image: Some(FeaturedImage {
                url: "https://cdn.example.com/featured.png".into(),
                alt: "featured".into(),
            }),
            status: BlogStatus::Published,
        })
        .await
        .unwrap();

    assert_eq!(blog.tenant_id, tenant_id);
    assert_eq!(blog.slug, "hello-world");
    assert_eq!(blog.excerpt, "First paragraph of the post");
    assert_eq!(blog.status, BlogStatus::Published);
    assert_eq!(blog.revision, 0);
    assert_eq!(blog.blocks.len(), 2);
    assert!(blog.featured_image.is_some());
}

#[tokio::test]
async fn get_by_id_and_slug() {
    let (repo, tenant_id) = setup().await;

    let blog = repo.create(post(tenant_id, "Findable Post")).await.unwrap();

    let by_id = repo.get_by_id(tenant_id, blog.id).await.unwrap();
    assert_eq!(by_id.id, blog.id);
    assert_eq!(by_id.blocks, blog.blocks);

    let by_slug = repo.get_by_slug(tenant_id, "findable-post").await.unwrap();
    assert_eq!(by_slug.id, blog.id);
}

#[tokio::test]
async fn blogs_are_tenant_scoped() {
    let (repo, tenant_id) = setup().await;

    let blog = repo.create(post(tenant_id, "Private Post")).await.unwrap();

    // A different tenant id must not see the post.
    let other_tenant = Uuid::new_v4();
    assert!(repo.get_by_id(other_tenant, blog.id).await.is_err());
    assert!(repo.delete(other_tenant, blog.id).await.is_err());

    let list = repo.list(other_tenant, Pagination::default()).await.unwrap();
    assert_eq!(list.total, 0);
}

#[tokio::test]
async fn update_increments_revision() {
    let (repo, tenant_id) = setup().await;

    let blog = repo.create(post(tenant_id, "Original Title")).await.unwrap();

    let updated = repo
        .update(
            tenant_id,
            blog.id,
            UpdateBlog {
                title: Some("New Title".into()),
                slug: Some("new-title".into()),
                ..Default::default()
            },
            blog.revision,
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.slug, "new-title");
    assert_eq!(updated.revision, blog.revision + 1);
    assert!(updated.updated_at >= blog.updated_at);
}

#[tokio::test]
async fn stale_revision_is_rejected_without_writing() {
    let (repo, tenant_id) = setup().await;

    let blog = repo.create(post(tenant_id, "Contended Post")).await.unwrap();

    // First writer wins.
    repo.update(
        tenant_id,
        blog.id,
        UpdateBlog {
            title: Some("First Writer".into()),
            ..Default::default()
        },
        blog.revision,
    )
    .await
    .unwrap();

    // Second writer still holds the old revision and must fail.
    let result = repo
        .update(
            tenant_id,
            blog.id,
            UpdateBlog {
                title: Some("Second Writer".into()),
                ..Default::default()
            },
            blog.revision,
        )
        .await;

    match result {
        Err(PressroomError::RevisionConflict { expected, .. }) => {
            assert_eq!(expected, blog.revision);
        }
        other => panic!("expected revision conflict, got {other:?}"),
    }

    let current = repo.get_by_id(tenant_id, blog.id).await.unwrap();
    assert_eq!(current.title, "First Writer");
    assert_eq!(current.revision, blog.revision + 1);
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    let (repo, tenant_id) = setup().await;

    let result = repo
        .update(
            tenant_id,
            Uuid::new_v4(),
            UpdateBlog {
                title: Some("Ghost".into()),
                ..Default::default()
            },
            0,
        )
        .await;

    assert!(matches!(result, Err(PressroomError::NotFound { .. })));
}

#[tokio::test]
async fn clear_featured_image() {
    let (repo, tenant_id) = setup().await;

    let mut input = post(tenant_id, "With Image");
    input.featured_image = Some(FeaturedImage {
        url: "https://cdn.example.com/x.png".into(),
        alt: "x".into(),
    });
    let blog = repo.create(input).await.unwrap();
    assert!(blog.featured_image.is_some());

    let updated = repo
        .update(
            tenant_id,
            blog.id,
            UpdateBlog {
                featured_image: Some(None),
                ..Default::default()
            },
            blog.revision,
        )
        .await
        .unwrap();

    assert!(updated.featured_image.is_none());
}

#[tokio::test]
async fn delete_blog() {
    let (repo, tenant_id) = setup().await;

    let blog = repo.create(post(tenant_id, "Ephemeral")).await.unwrap();

    repo.delete(tenant_id, blog.id).await.unwrap();
    assert!(repo.get_by_id(tenant_id, blog.id).await.is_err());
}

#[tokio::test]
async fn delete_missing_blog_is_an_error() {
    let (repo, tenant_id) = setup().await;

    let result = repo.delete(tenant_id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(PressroomError::NotFound { .. })));
}

#[tokio::test]
async fn duplicate_slug_within_tenant_rejected() {
    let (repo, tenant_id) = setup().await;

    repo.create(post(tenant_id, "Same Title")).await.unwrap();
    let result = repo.create(post(tenant_id, "Same Title")).await;
    assert!(result.is_err(), "duplicate slug within a tenant should fail");
}

#[tokio::test]
async fn list_blogs_with_pagination() {
    let (repo, tenant_id) = setup().await;

    for i in 0..5 {
        repo.create(post(tenant_id, &format!("Post {i}"))).await.unwrap();
    }

    let page1 = repo
        .list(
            tenant_id,
            Pagination {
                offset: 0,
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 3);
    assert_eq!(page1.total, 5);

    let page2 = repo
        .list(
            tenant_id,
            Pagination {
                offset: 3,
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 2);
}
