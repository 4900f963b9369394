// ============================================================================
// MBH Infrastructure - PostgreSQL Activity Log Repository
// File: crates/mbh-infrastructure/src/database/postgres/activity_log_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mbh_core::domain::{ActivityLog, NewActivity, UserType};
use mbh_core::error::DomainError;
use mbh_core::repositories::ActivityLogRepository;

use crate::database::sql::db_error;

pub struct PgActivityLogRepository {
    pool: PgPool,
}

impl PgActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityLogRow {
    pub id: i64,
    pub user_type: String,
    pub user_id: i64,
    pub action: String,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

impl From<ActivityLogRow> for ActivityLog {
    fn from(row: ActivityLogRow) -> Self {
        ActivityLog {
            id: row.id,
            user_type: UserType::from_str(&row.user_type).unwrap_or(UserType::Admin),
            user_id: row.user_id,
            action: row.action,
            description: row.description,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at,
            user_name: row.user_name,
        }
    }
}

#[async_trait]
impl ActivityLogRepository for PgActivityLogRepository {
    async fn record(&self, entry: &NewActivity) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (user_type, user_id, action, description, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.user_type.as_str())
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.description)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&self.pool)
        .await
        .map_err(db_error("recording activity"))?;

        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ActivityLog>, DomainError> {
        let rows: Vec<ActivityLogRow> = sqlx::query_as(
            r#"
            SELECT al.id, al.user_type, al.user_id, al.action, al.description,
                   al.ip_address, al.user_agent, al.created_at,
                   CASE al.user_type
                       WHEN 'admin' THEN a.full_name
                       WHEN 'landlord' THEN l.full_name
                       WHEN 'tenant' THEN t.full_name
                   END AS user_name
            FROM activity_logs al
            LEFT JOIN admins a ON al.user_type = 'admin' AND al.user_id = a.id
            LEFT JOIN landlords l ON al.user_type = 'landlord' AND al.user_id = l.id
            LEFT JOIN tenants t ON al.user_type = 'tenant' AND al.user_id = t.id
            ORDER BY al.created_at DESC, al.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading recent activity"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
