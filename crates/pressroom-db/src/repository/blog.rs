//! SurrealDB implementation of [`BlogRepository`].
//!
//! Slug and excerpt derivation happen here, at the storage boundary,
//! so the stored invariants hold regardless of which caller writes.
//! Updates carry an expected revision; a mismatch never writes.

use chrono::{DateTime, Utc};
use pressroom_core::content::derive_excerpt;
use pressroom_core::error::PressroomResult;
use pressroom_core::models::blog::{
    Author, Blog, BlogStatus, CreateBlog, FeaturedImage, UpdateBlog,
};
use pressroom_core::models::block::Block;
use pressroom_core::repository::{BlogRepository, PaginatedResult, Pagination};
use pressroom_core::slug::generate_slug;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct BlogRow {
    tenant_id: String,
    title: String,
    slug: String,
    blocks: serde_json::Value,
    author: serde_json::Value,
    featured_image: Option<serde_json::Value>,
    excerpt: String,
    status: String,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct BlogRowWithId {
    record_id: String,
    tenant_id: String,
    title: String,
    slug: String,
    blocks: serde_json::Value,
    author: serde_json::Value,
    featured_image: Option<serde_json::Value>,
    excerpt: String,
    status: String,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_status(s: &str) -> Result<BlogStatus, DbError> {
    match s {
        "Draft" => Ok(BlogStatus::Draft),
        "Published" => Ok(BlogStatus::Published),
        other => Err(DbError::Convert(format!("unknown blog status: {other}"))),
    }
}

fn status_to_string(status: BlogStatus) -> &'static str {
    match status {
        BlogStatus::Draft => "Draft",
        BlogStatus::Published => "Published",
    }
}

fn parse_blocks(value: serde_json::Value) -> Result<Vec<Block>, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Convert(format!("invalid blocks: {e}")))
}

fn parse_author(value: serde_json::Value) -> Result<Author, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Convert(format!("invalid author: {e}")))
}

fn parse_featured_image(
    value: Option<serde_json::Value>,
) -> Result<Option<FeaturedImage>, DbError> {
    match value {
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| DbError::Convert(format!("invalid featured image: {e}"))),
        None => Ok(None),
    }
}

fn to_json<T: serde::Serialize>(value: &T, what: &str) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(value).map_err(|e| DbError::Convert(format!("invalid {what}: {e}")))
}

impl BlogRow {
    fn into_blog(self, id: Uuid) -> Result<Blog, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Convert(format!("invalid tenant UUID: {e}")))?;
        Ok(Blog {
            id,
            tenant_id,
            title: self.title,
            slug: self.slug,
            blocks: parse_blocks(self.blocks)?,
            author: parse_author(self.author)?,
            featured_image: parse_featured_image(self.featured_image)?,
            excerpt: self.excerpt,
            status: parse_status(&self.status)?,
            revision: self.revision,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl BlogRowWithId {
    fn try_into_blog(self) -> Result<Blog, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Convert(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Convert(format!("invalid tenant UUID: {e}")))?;
        Ok(Blog {
            id,
            tenant_id,
            title: self.title,
            slug: self.slug,
            blocks: parse_blocks(self.blocks)?,
            author: parse_author(self.author)?,
            featured_image: parse_featured_image(self.featured_image)?,
            excerpt: self.excerpt,
            status: parse_status(&self.status)?,
            revision: self.revision,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Blog repository.
#[derive(Clone)]
pub struct SurrealBlogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBlogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BlogRepository for SurrealBlogRepository<C> {
    async fn create(&self, input: CreateBlog) -> PressroomResult<Blog> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let tenant_id_str = input.tenant_id.to_string();

        let slug = generate_slug(&input.title);
        let excerpt = derive_excerpt(&input.blocks);
        let blocks = to_json(&input.blocks, "blocks")?;
        let author = to_json(&input.author, "author")?;
        let featured_image = input
            .featured_image
            .as_ref()
            .map(|img| to_json(img, "featured image"))
            .transpose()?;

        // Create the post and relate it to its tenant in one query.
        // RELATE requires literal record-id syntax, so we embed UUIDs
        // directly in the RELATE portion (they are safe — UUID format).
        let query = format!(
            "CREATE type::record('blog', $id) SET \
             tenant_id = $tenant_id, \
             title = $title, slug = $slug, \
             blocks = $blocks, author = $author, \
             featured_image = $featured_image, \
             excerpt = $excerpt, status = $status, \
             revision = 0; \
             RELATE tenant:`{tenant_id_str}` \
             -> has_blog -> blog:`{id_str}`;"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id_str))
            .bind(("title", input.title))
            .bind(("slug", slug))
            .bind(("blocks", blocks))
            .bind(("author", author))
            .bind(("featured_image", featured_image))
            .bind(("excerpt", excerpt))
            .bind(("status", status_to_string(input.status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        // Statement 0 is the CREATE, statement 1 is the RELATE.
        let rows: Vec<BlogRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "blog".into(),
            id: id_str,
        })?;

        Ok(row.into_blog(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> PressroomResult<Blog> {
        let id_str = id.to_string();
        let tenant_id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('blog', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BlogRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "blog".into(),
            id: id_str,
        })?;

        Ok(row.into_blog(id)?)
    }

    async fn get_by_slug(&self, tenant_id: Uuid, slug: &str) -> PressroomResult<Blog> {
        let tenant_id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM blog \
                 WHERE tenant_id = $tenant_id AND slug = $slug",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BlogRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "blog".into(),
            id: format!("slug={slug}"),
        })?;

        Ok(row.try_into_blog()?)
    }

    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBlog,
        expected_revision: u64,
    ) -> PressroomResult<Blog> {
        let id_str = id.to_string();
        let tenant_id_str = tenant_id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.slug.is_some() {
            sets.push("slug = $slug");
        }
        if input.blocks.is_some() {
            sets.push("blocks = $blocks");
        }
        if input.author.is_some() {
            sets.push("author = $author");
        }
        if input.featured_image.is_some() {
            sets.push("featured_image = $featured_image");
        }
        if input.excerpt.is_some() {
            sets.push("excerpt = $excerpt");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("revision += 1");
        sets.push("updated_at = time::now()");

        // The revision predicate makes this a compare-and-swap: a stale
        // writer matches no rows and nothing is written.
        let query = format!(
            "UPDATE type::record('blog', $id) SET {} \
             WHERE tenant_id = $tenant_id \
             AND revision = $expected_revision",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id_str))
            .bind(("expected_revision", expected_revision));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(slug) = input.slug {
            builder = builder.bind(("slug", slug));
        }
        if let Some(ref blocks) = input.blocks {
            builder = builder.bind(("blocks", to_json(blocks, "blocks")?));
        }
        if let Some(ref author) = input.author {
            builder = builder.bind(("author", to_json(author, "author")?));
        }
        if let Some(ref featured_image) = input.featured_image {
            // Option<Option<_>>: Some(Some(v)) = set, Some(None) = clear.
            let value = featured_image
                .as_ref()
                .map(|img| to_json(img, "featured image"))
                .transpose()?;
            builder = builder.bind(("featured_image", value));
        }
        if let Some(excerpt) = input.excerpt {
            builder = builder.bind(("excerpt", excerpt));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<BlogRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_blog(id)?),
            None => {
                // Disambiguate: missing record vs stale revision.
                self.get_by_id(tenant_id, id).await?;
                Err(DbError::RevisionConflict {
                    entity: "blog".into(),
                    id: id_str,
                    expected: expected_revision,
                }
                .into())
            }
        }
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> PressroomResult<()> {
        let id_str = id.to_string();
        let tenant_id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE type::record('blog', $id) \
                 WHERE tenant_id = $tenant_id \
                 RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BlogRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "blog".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> PressroomResult<PaginatedResult<Blog>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM blog \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        // Newest first; the in-memory view re-sorts as requested.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM blog \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BlogRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_blog())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
