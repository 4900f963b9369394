// ============================================================================
// MBH Infrastructure - PostgreSQL Admin Repository
// File: crates/mbh-infrastructure/src/database/postgres/admin_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use mbh_core::domain::{Admin, DashboardStats, ProfileUpdate};
use mbh_core::error::DomainError;
use mbh_core::repositories::AdminRepository;
use mbh_shared::EntityId;

use crate::database::sql::db_error;

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &'static str, context: &'static str) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(context))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AdminRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: row.role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn find_active_by_login(&self, login: &str) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, full_name, role,
                   is_active, created_at, updated_at
            FROM admins
            WHERE (username = $1 OR email = $1) AND is_active = TRUE
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding admin by login"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, full_name, role,
                   is_active, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding admin by id"))?;

        Ok(row.map(Into::into))
    }

    async fn update_profile(&self, id: EntityId, profile: &ProfileUpdate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET full_name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating admin profile"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(&self, id: EntityId, password_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating admin password"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError> {
        let total_landlords = self
            .count(
                "SELECT COUNT(*) FROM landlords WHERE is_active = TRUE",
                "counting landlords",
            )
            .await?;
        let total_tenants = self
            .count(
                "SELECT COUNT(*) FROM tenants WHERE is_active = TRUE",
                "counting tenants",
            )
            .await?;
        let total_houses = self
            .count(
                "SELECT COUNT(*) FROM boarding_houses WHERE is_active = TRUE AND is_verified = TRUE",
                "counting boarding houses",
            )
            .await?;
        let pending_verifications = self
            .count(
                "SELECT COUNT(*) FROM landlords WHERE verification_status = 'pending'",
                "counting pending verifications",
            )
            .await?;

        let monthly_revenue: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM payments
            WHERE status = 'completed'
              AND DATE_TRUNC('month', payment_date) = DATE_TRUNC('month', NOW())
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("summing monthly revenue"))?;

        debug!(total_landlords, total_tenants, total_houses, "Dashboard stats loaded");

        Ok(DashboardStats {
            total_landlords,
            total_tenants,
            total_houses,
            pending_verifications,
            monthly_revenue,
        })
    }
}
