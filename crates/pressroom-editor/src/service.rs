//! Blog and tenant orchestration services.
//!
//! Services compose the repository traits with the pure query and
//! validation logic. They hold no storage details, so tests can run
//! them against any repository implementation.

use futures::future::join_all;
use pressroom_core::TenantContext;
use pressroom_core::error::{PressroomError, PressroomResult};
use pressroom_core::models::blog::{Author, Blog, BlogStatus, CreateBlog, FeaturedImage};
use pressroom_core::models::block::Block;
use pressroom_core::models::member::{CreateMember, MemberRole, TenantUser};
use pressroom_core::models::tenant::{CreateTenant, Tenant};
use pressroom_core::query::{BlogQuery, apply_query};
use pressroom_core::repository::{
    BlogRepository, MemberRepository, PaginatedResult, Pagination, TenantRepository,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EditorConfig;
use crate::session::validate_post;

/// Input for creating a post through the service.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub blocks: Vec<Block>,
    pub author: Author,
    pub featured_image: Option<FeaturedImage>,
    pub status: BlogStatus,
}

/// Per-item outcome of a bulk delete.
///
/// One failing id never aborts the rest and never masks the ids that
/// did delete.
#[derive(Debug, Clone)]
pub struct BulkDeleteReport {
    pub deleted: Vec<Uuid>,
    pub failed: Vec<(Uuid, String)>,
}

impl BulkDeleteReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Blog operations outside an open editor session.
pub struct BlogService<B: BlogRepository> {
    repo: B,
    config: EditorConfig,
}

impl<B: BlogRepository> BlogService<B> {
    pub fn new(repo: B, config: EditorConfig) -> Self {
        Self { repo, config }
    }

    /// Create a post after validating the same fields explicit save
    /// validates. Slug and excerpt are derived in the repository.
    pub async fn create(&self, ctx: TenantContext, input: NewPost) -> PressroomResult<Blog> {
        validate_post(&input.title, &input.author, &input.blocks)?;

        let blog = self
            .repo
            .create(CreateBlog {
                tenant_id: ctx.tenant_id(),
                title: input.title,
                blocks: input.blocks,
                author: input.author,
                featured_image: input.featured_image,
                status: input.status,
            })
            .await?;
        info!(blog_id = %blog.id, tenant_id = %ctx.tenant_id(), "post created");
        Ok(blog)
    }

    pub async fn get(&self, ctx: TenantContext, id: Uuid) -> PressroomResult<Blog> {
        self.repo.get_by_id(ctx.tenant_id(), id).await
    }

    pub async fn get_by_slug(&self, ctx: TenantContext, slug: &str) -> PressroomResult<Blog> {
        self.repo.get_by_slug(ctx.tenant_id(), slug).await
    }

    /// One page of posts in storage order (newest first).
    pub async fn fetch_page(
        &self,
        ctx: TenantContext,
        offset: u64,
    ) -> PressroomResult<PaginatedResult<Blog>> {
        self.repo
            .list(
                ctx.tenant_id(),
                Pagination {
                    offset,
                    limit: self.config.list_page_size,
                },
            )
            .await
    }

    /// Admin list view: first page filtered, searched, and sorted.
    pub async fn list(&self, ctx: TenantContext, query: &BlogQuery) -> PressroomResult<Vec<Blog>> {
        let page = self.fetch_page(ctx, 0).await?;
        Ok(apply_query(&page.items, query, chrono::Utc::now()))
    }

    /// Delete one post. Missing ids are an error, not a silent no-op.
    pub async fn delete(&self, ctx: TenantContext, id: Uuid) -> PressroomResult<()> {
        self.repo.delete(ctx.tenant_id(), id).await?;
        info!(blog_id = %id, tenant_id = %ctx.tenant_id(), "post deleted");
        Ok(())
    }

    /// Delete a batch of posts, reporting each id individually.
    pub async fn bulk_delete(&self, ctx: TenantContext, ids: &[Uuid]) -> BulkDeleteReport {
        let tenant_id = ctx.tenant_id();
        let results = join_all(
            ids.iter()
                .map(|id| async move { (*id, self.repo.delete(tenant_id, *id).await) }),
        )
        .await;

        let mut report = BulkDeleteReport {
            deleted: Vec::new(),
            failed: Vec::new(),
        };
        for (id, result) in results {
            match result {
                Ok(()) => report.deleted.push(id),
                Err(e) => report.failed.push((id, e.to_string())),
            }
        }

        if !report.all_succeeded() {
            warn!(
                deleted = report.deleted.len(),
                failed = report.failed.len(),
                "bulk delete completed with failures"
            );
        }
        report
    }
}

/// Tenant and membership operations.
pub struct TenantService<T: TenantRepository, M: MemberRepository> {
    tenants: T,
    members: M,
}

impl<T: TenantRepository, M: MemberRepository> TenantService<T, M> {
    pub fn new(tenants: T, members: M) -> Self {
        Self { tenants, members }
    }

    pub async fn create_tenant(&self, input: CreateTenant) -> PressroomResult<Tenant> {
        let tenant = self.tenants.create(input).await?;
        info!(tenant_id = %tenant.id, domain = %tenant.domain, "tenant created");
        Ok(tenant)
    }

    pub async fn list_tenants(
        &self,
        pagination: Pagination,
    ) -> PressroomResult<PaginatedResult<Tenant>> {
        self.tenants.list(pagination).await
    }

    pub async fn get_tenant(&self, id: Uuid) -> PressroomResult<Tenant> {
        self.tenants.get_by_id(id).await
    }

    pub async fn resolve_domain(&self, domain: &str) -> PressroomResult<Tenant> {
        self.tenants.get_by_domain(domain).await
    }

    /// Switch an existing context to another tenant.
    ///
    /// The target must exist; the old context is consumed so a stale
    /// handle cannot leak across the switch.
    pub async fn switch(
        &self,
        ctx: TenantContext,
        tenant_id: Uuid,
    ) -> PressroomResult<TenantContext> {
        self.tenants.get_by_id(tenant_id).await?;
        info!(from = %ctx.tenant_id(), to = %tenant_id, "tenant switched");
        Ok(ctx.switch(tenant_id))
    }

    pub async fn add_member(
        &self,
        ctx: TenantContext,
        input: CreateMember,
    ) -> PressroomResult<TenantUser> {
        if input.tenant_id != ctx.tenant_id() {
            return Err(PressroomError::TenantContext);
        }
        self.members.add(input).await
    }

    pub async fn remove_member(&self, ctx: TenantContext, user_uid: &str) -> PressroomResult<()> {
        self.members.remove(ctx.tenant_id(), user_uid).await
    }

    pub async fn members(
        &self,
        ctx: TenantContext,
        pagination: Pagination,
    ) -> PressroomResult<PaginatedResult<TenantUser>> {
        self.members.list(ctx.tenant_id(), pagination).await
    }

    /// Check that a user holds at least `min_role` in the context's
    /// tenant. Non-members and under-privileged members are both
    /// rejected with a membership error.
    pub async fn require_role(
        &self,
        ctx: TenantContext,
        user_uid: &str,
        min_role: MemberRole,
    ) -> PressroomResult<TenantUser> {
        let member = match self.members.get(ctx.tenant_id(), user_uid).await {
            Ok(member) => member,
            Err(PressroomError::NotFound { .. }) => {
                return Err(PressroomError::MembershipDenied {
                    reason: format!("user {user_uid} is not a member of this tenant"),
                });
            }
            Err(e) => return Err(e),
        };

        if member.role < min_role {
            return Err(PressroomError::MembershipDenied {
                reason: format!(
                    "role {:?} does not satisfy required role {:?}",
                    member.role, min_role
                ),
            });
        }
        Ok(member)
    }
}
