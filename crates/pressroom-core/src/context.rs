//! Explicit tenant context.
//!
//! The active tenant is plain data handed to every scoped operation;
//! there is no process-wide "current tenant". Switching tenants produces
//! a new context and callers refetch their data against it.

use uuid::Uuid;

/// Handle identifying the tenant all scoped reads and writes apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: Uuid,
}

impl TenantContext {
    pub fn new(tenant_id: Uuid) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Switch to a different tenant.
    ///
    /// Consumes the old context so stale handles cannot linger past the
    /// switch. Membership checks happen in the service layer, not here.
    pub fn switch(self, tenant_id: Uuid) -> Self {
        Self { tenant_id }
    }
}
