//! SurrealDB implementation of [`TenantRepository`].

use chrono::{DateTime, Utc};
use pressroom_core::error::PressroomResult;
use pressroom_core::models::tenant::{
    CreateTenant, SubscriptionTier, Tenant, TenantSettings, UpdateTenant,
};
use pressroom_core::repository::{PaginatedResult, Pagination, TenantRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    domain: String,
    tier: String,
    settings: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    name: String,
    domain: String,
    tier: String,
    settings: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_tier(s: &str) -> Result<SubscriptionTier, DbError> {
    match s {
        "Free" => Ok(SubscriptionTier::Free),
        "Starter" => Ok(SubscriptionTier::Starter),
        "Pro" => Ok(SubscriptionTier::Pro),
        "Enterprise" => Ok(SubscriptionTier::Enterprise),
        other => Err(DbError::Convert(format!(
            "unknown subscription tier: {other}"
        ))),
    }
}

fn tier_to_string(tier: SubscriptionTier) -> &'static str {
    match tier {
        SubscriptionTier::Free => "Free",
        SubscriptionTier::Starter => "Starter",
        SubscriptionTier::Pro => "Pro",
        SubscriptionTier::Enterprise => "Enterprise",
    }
}

fn parse_settings(value: serde_json::Value) -> Result<TenantSettings, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Convert(format!("invalid settings: {e}")))
}

impl TenantRow {
    fn into_tenant(self, id: Uuid) -> Result<Tenant, DbError> {
        Ok(Tenant {
            id,
            name: self.name,
            domain: self.domain,
            tier: parse_tier(&self.tier)?,
            settings: parse_settings(self.settings)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Convert(format!("invalid UUID: {e}")))?;
        Ok(Tenant {
            id,
            name: self.name,
            domain: self.domain,
            tier: parse_tier(&self.tier)?,
            settings: parse_settings(self.settings)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Tenant repository.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, input: CreateTenant) -> PressroomResult<Tenant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let settings = input.settings.unwrap_or_default();
        let settings_value = serde_json::to_value(&settings)
            .map_err(|e| DbError::Convert(format!("invalid settings: {e}")))?;

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 name = $name, domain = $domain, \
                 tier = $tier, settings = $settings",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("domain", input.domain))
            .bind(("tier", tier_to_string(input.tier).to_string()))
            .bind(("settings", settings_value))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> PressroomResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_domain(&self, domain: &str) -> PressroomResult<Tenant> {
        let domain_owned = domain.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant \
                 WHERE domain = $domain",
            )
            .bind(("domain", domain_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: format!("domain={domain}"),
        })?;

        Ok(row.try_into_tenant()?)
    }

    async fn update(&self, id: Uuid, input: UpdateTenant) -> PressroomResult<Tenant> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.domain.is_some() {
            sets.push("domain = $domain");
        }
        if input.tier.is_some() {
            sets.push("tier = $tier");
        }
        if input.settings.is_some() {
            sets.push("settings = $settings");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('tenant', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(domain) = input.domain {
            builder = builder.bind(("domain", domain));
        }
        if let Some(tier) = input.tier {
            builder = builder.bind(("tier", tier_to_string(tier).to_string()));
        }
        if let Some(settings) = input.settings {
            let settings_value = serde_json::to_value(&settings)
                .map_err(|e| DbError::Convert(format!("invalid settings: {e}")))?;
            builder = builder.bind(("settings", settings_value));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn delete(&self, id: Uuid) -> PressroomResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('tenant', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "tenant".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> PressroomResult<PaginatedResult<Tenant>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM tenant GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_tenant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
