//! Tenant domain model.
//!
//! Tenants provide full data isolation: every blog and membership is
//! scoped to exactly one tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription tier controlling plan limits for a tenant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionTier {
    Free,
    Starter,
    Pro,
    Enterprise,
}

/// Per-tenant site settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TenantSettings {
    /// Site name shown in the admin panel and on public pages.
    #[serde(default)]
    pub site_name: String,
    /// Default author name pre-filled for new posts.
    #[serde(default)]
    pub default_author: String,
}

/// A tenant is an isolated customer namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Primary domain the tenant's site is served from (unique).
    pub domain: String,
    pub tier: SubscriptionTier,
    pub settings: TenantSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub domain: String,
    pub tier: SubscriptionTier,
    pub settings: Option<TenantSettings>,
}

/// Fields that can be updated on an existing tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTenant {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub tier: Option<SubscriptionTier>,
    pub settings: Option<TenantSettings>,
}
