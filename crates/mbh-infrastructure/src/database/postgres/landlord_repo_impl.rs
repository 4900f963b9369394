// ============================================================================
// MBH Infrastructure - PostgreSQL Landlord Repository
// File: crates/mbh-infrastructure/src/database/postgres/landlord_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use mbh_core::domain::{
    Landlord, LandlordPaymentStatus, LandlordSummary, LandlordUpdate, NewLandlord,
    SubscriptionPlan, VerificationChange, VerificationStatus,
};
use mbh_core::error::DomainError;
use mbh_core::query::{LandlordFilter, PageRequest, Predicates};
use mbh_core::repositories::LandlordRepository;
use mbh_shared::EntityId;

use crate::database::sql::{db_error, push_where};

const LANDLORD_COLUMNS: &str = "l.id, l.full_name, l.email, l.phone, l.address, \
     l.verification_status, l.payment_status, l.subscription_plan, \
     l.subscription_expires_at, l.is_active, l.created_at, l.updated_at";

const HOUSE_COUNTS: &str = "COUNT(bh.id) AS total_houses, \
     COUNT(bh.id) FILTER (WHERE bh.is_verified = TRUE) AS verified_houses";

pub struct PgLandlordRepository {
    pool: PgPool,
}

impl PgLandlordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct LandlordRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub verification_status: String,
    pub payment_status: String,
    pub subscription_plan: Option<String>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct LandlordSummaryRow {
    #[sqlx(flatten)]
    pub landlord: LandlordRow,
    pub total_houses: i64,
    pub verified_houses: i64,
}

impl From<LandlordRow> for Landlord {
    fn from(row: LandlordRow) -> Self {
        Landlord {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            verification_status: VerificationStatus::from_str(&row.verification_status)
                .unwrap_or_default(),
            payment_status: LandlordPaymentStatus::from_str(&row.payment_status).unwrap_or_default(),
            subscription_plan: row
                .subscription_plan
                .as_deref()
                .and_then(SubscriptionPlan::from_str),
            subscription_expires_at: row.subscription_expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<LandlordSummaryRow> for LandlordSummary {
    fn from(row: LandlordSummaryRow) -> Self {
        LandlordSummary {
            landlord: row.landlord.into(),
            total_houses: row.total_houses,
            verified_houses: row.verified_houses,
        }
    }
}

#[async_trait]
impl LandlordRepository for PgLandlordRepository {
    async fn list(&self, filter: &LandlordFilter, page: PageRequest) -> Result<Vec<LandlordSummary>, DomainError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {}, {} FROM landlords l \
             LEFT JOIN boarding_houses bh ON l.id = bh.landlord_id",
            LANDLORD_COLUMNS, HOUSE_COUNTS
        ));
        push_where(&mut qb, &filter.conditions());
        qb.push(" GROUP BY l.id ORDER BY l.created_at DESC, l.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        debug!(sql = qb.sql(), "Listing landlords");

        let rows: Vec<LandlordSummaryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing landlords"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &LandlordFilter) -> Result<i64, DomainError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM landlords l");
        push_where(&mut qb, &filter.conditions());

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting landlords"))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<LandlordSummary>, DomainError> {
        let sql = format!(
            "SELECT {}, {} FROM landlords l \
             LEFT JOIN boarding_houses bh ON l.id = bh.landlord_id \
             WHERE l.id = $1 GROUP BY l.id",
            LANDLORD_COLUMNS, HOUSE_COUNTS
        );
        let row: Option<LandlordSummaryRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding landlord by id"))?;

        Ok(row.map(Into::into))
    }

    async fn update_verification(&self, id: EntityId, change: &VerificationChange) -> Result<bool, DomainError> {
        let result = match change {
            VerificationChange::Verify { plan, expires_at } => {
                sqlx::query(
                    r#"
                    UPDATE landlords
                    SET verification_status = $2,
                        subscription_plan = $3,
                        subscription_expires_at = $4,
                        updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(change.status().as_str())
                .bind(plan.map(|p| p.as_str()))
                .bind(*expires_at)
                .execute(&self.pool)
                .await
            }
            VerificationChange::Reject => {
                sqlx::query(
                    r#"
                    UPDATE landlords
                    SET verification_status = $2, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(change.status().as_str())
                .execute(&self.pool)
                .await
            }
        }
        .map_err(db_error("updating landlord verification"))?;

        info!(landlord_id = id, status = change.status().as_str(), rows = result.rows_affected(), "Landlord verification updated");
        Ok(result.rows_affected() > 0)
    }

    async fn update_payment_status(&self, id: EntityId, status: LandlordPaymentStatus) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE landlords
            SET payment_status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("updating landlord payment status"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_active(&self, id: EntityId, is_active: bool) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE landlords
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("setting landlord active flag"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn overdue(&self) -> Result<Vec<Landlord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM landlords l \
             WHERE l.payment_status = 'overdue' \
                OR (l.subscription_expires_at < NOW() AND l.payment_status <> 'paid') \
             ORDER BY l.subscription_expires_at ASC NULLS LAST",
            LANDLORD_COLUMNS
        );
        let rows: Vec<LandlordRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing overdue landlords"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, landlord: &NewLandlord) -> Result<EntityId, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO landlords (full_name, email, phone, password_hash, address, verification_status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING id
            "#,
        )
        .bind(&landlord.full_name)
        .bind(&landlord.email)
        .bind(&landlord.phone)
        .bind(&landlord.password_hash)
        .bind(&landlord.address)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating landlord"))?;

        info!(landlord_id = id, "Landlord created");
        Ok(id)
    }

    async fn update(&self, id: EntityId, landlord: &LandlordUpdate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE landlords
            SET full_name = $2, email = $3, phone = $4, address = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&landlord.full_name)
        .bind(&landlord.email)
        .bind(&landlord.phone)
        .bind(&landlord.address)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating landlord"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError> {
        self.set_active(id, false).await
    }
}
