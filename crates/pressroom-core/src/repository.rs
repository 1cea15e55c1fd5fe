//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! require a `tenant_id` parameter to enforce data isolation.

use uuid::Uuid;

use crate::error::PressroomResult;
use crate::models::{
    blog::{Blog, CreateBlog, UpdateBlog},
    member::{CreateMember, MemberRole, TenantUser},
    tenant::{CreateTenant, Tenant, UpdateTenant},
};

/// Pagination parameters for list queries.
///
/// The default limit matches the admin list page size.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Tenants (global scope)
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = PressroomResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = PressroomResult<Tenant>> + Send;
    fn get_by_domain(&self, domain: &str)
    -> impl Future<Output = PressroomResult<Tenant>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = PressroomResult<Tenant>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = PressroomResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PressroomResult<PaginatedResult<Tenant>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait MemberRepository: Send + Sync {
    fn add(&self, input: CreateMember) -> impl Future<Output = PressroomResult<TenantUser>> + Send;
    fn get(
        &self,
        tenant_id: Uuid,
        user_uid: &str,
    ) -> impl Future<Output = PressroomResult<TenantUser>> + Send;
    fn update_role(
        &self,
        tenant_id: Uuid,
        user_uid: &str,
        role: MemberRole,
    ) -> impl Future<Output = PressroomResult<TenantUser>> + Send;
    fn remove(
        &self,
        tenant_id: Uuid,
        user_uid: &str,
    ) -> impl Future<Output = PressroomResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PressroomResult<PaginatedResult<TenantUser>>> + Send;
}

pub trait BlogRepository: Send + Sync {
    /// Create a post. Slug and excerpt are derived from the input at the
    /// storage boundary so the invariants hold for every caller.
    fn create(&self, input: CreateBlog) -> impl Future<Output = PressroomResult<Blog>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = PressroomResult<Blog>> + Send;
    fn get_by_slug(
        &self,
        tenant_id: Uuid,
        slug: &str,
    ) -> impl Future<Output = PressroomResult<Blog>> + Send;
    /// Update with optimistic concurrency: `expected_revision` must match
    /// the stored revision or the update fails with a revision conflict.
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBlog,
        expected_revision: u64,
    ) -> impl Future<Output = PressroomResult<Blog>> + Send;
    /// Hard delete. Deleting a missing id is an error so callers never
    /// report success for a no-op.
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = PressroomResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PressroomResult<PaginatedResult<Blog>>> + Send;
}
