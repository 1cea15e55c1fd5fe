//! Tenant membership model.
//!
//! A membership binds an external user identity to a tenant with a role.
//! No user may act on a tenant without a membership record; enforcement
//! lives in the service layer, not in this data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member role, ordered by privilege: `Viewer < Editor < Admin <
/// SuperAdmin`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberRole {
    Viewer,
    Editor,
    Admin,
    SuperAdmin,
}

/// A user's membership in a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUser {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// External identity of the member (auth-provider uid).
    pub user_uid: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}

/// Fields required to add a member to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMember {
    pub tenant_id: Uuid,
    pub user_uid: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
}
