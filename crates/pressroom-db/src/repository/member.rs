//! SurrealDB implementation of [`MemberRepository`].

use chrono::{DateTime, Utc};
use pressroom_core::error::PressroomResult;
use pressroom_core::models::member::{CreateMember, MemberRole, TenantUser};
use pressroom_core::repository::{MemberRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct MemberRow {
    tenant_id: String,
    user_uid: String,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct MemberRowWithId {
    record_id: String,
    tenant_id: String,
    user_uid: String,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_role(s: &str) -> Result<MemberRole, DbError> {
    match s {
        "Viewer" => Ok(MemberRole::Viewer),
        "Editor" => Ok(MemberRole::Editor),
        "Admin" => Ok(MemberRole::Admin),
        "SuperAdmin" => Ok(MemberRole::SuperAdmin),
        other => Err(DbError::Convert(format!("unknown member role: {other}"))),
    }
}

fn role_to_string(role: MemberRole) -> &'static str {
    match role {
        MemberRole::Viewer => "Viewer",
        MemberRole::Editor => "Editor",
        MemberRole::Admin => "Admin",
        MemberRole::SuperAdmin => "SuperAdmin",
    }
}

impl MemberRow {
    fn into_member(self, id: Uuid) -> Result<TenantUser, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Convert(format!("invalid tenant UUID: {e}")))?;
        Ok(TenantUser {
            id,
            tenant_id,
            user_uid: self.user_uid,
            name: self.name,
            email: self.email,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

impl MemberRowWithId {
    fn try_into_member(self) -> Result<TenantUser, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Convert(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Convert(format!("invalid tenant UUID: {e}")))?;
        Ok(TenantUser {
            id,
            tenant_id,
            user_uid: self.user_uid,
            name: self.name,
            email: self.email,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Member repository.
#[derive(Clone)]
pub struct SurrealMemberRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMemberRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MemberRepository for SurrealMemberRepository<C> {
    async fn add(&self, input: CreateMember) -> PressroomResult<TenantUser> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let tenant_id_str = input.tenant_id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('member', $id) SET \
                 tenant_id = $tenant_id, \
                 user_uid = $user_uid, \
                 name = $name, email = $email, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id_str))
            .bind(("user_uid", input.user_uid))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role", role_to_string(input.role).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<MemberRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "member".into(),
            id: id_str,
        })?;

        Ok(row.into_member(id)?)
    }

    async fn get(&self, tenant_id: Uuid, user_uid: &str) -> PressroomResult<TenantUser> {
        let tenant_id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM member \
                 WHERE tenant_id = $tenant_id AND user_uid = $user_uid",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("user_uid", user_uid.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MemberRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "member".into(),
            id: format!("user_uid={user_uid}"),
        })?;

        Ok(row.try_into_member()?)
    }

    async fn update_role(
        &self,
        tenant_id: Uuid,
        user_uid: &str,
        role: MemberRole,
    ) -> PressroomResult<TenantUser> {
        let tenant_id_str = tenant_id.to_string();

        let result = self
            .db
            .query(
                "UPDATE member SET role = $role \
                 WHERE tenant_id = $tenant_id AND user_uid = $user_uid",
            )
            .bind(("role", role_to_string(role).to_string()))
            .bind(("tenant_id", tenant_id_str))
            .bind(("user_uid", user_uid.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<MemberRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "member".into(),
                id: format!("user_uid={user_uid}"),
            }
            .into());
        }

        self.get(tenant_id, user_uid).await
    }

    async fn remove(&self, tenant_id: Uuid, user_uid: &str) -> PressroomResult<()> {
        let tenant_id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE FROM member \
                 WHERE tenant_id = $tenant_id AND user_uid = $user_uid \
                 RETURN BEFORE",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("user_uid", user_uid.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MemberRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "member".into(),
                id: format!("user_uid={user_uid}"),
            }
            .into());
        }

        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> PressroomResult<PaginatedResult<TenantUser>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM member \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM member \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MemberRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_member())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
