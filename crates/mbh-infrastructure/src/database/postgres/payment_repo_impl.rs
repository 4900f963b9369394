// ============================================================================
// MBH Infrastructure - PostgreSQL Payment Repository
// File: crates/mbh-infrastructure/src/database/postgres/payment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use mbh_core::domain::{
    HousePayment, MonthlyRevenue, NewPayment, Payment, PaymentDetails, PaymentListing,
    PaymentStats, PaymentStatus, StatsPeriod,
};
use mbh_core::error::DomainError;
use mbh_core::query::{PageRequest, PaymentFilter, Predicates};
use mbh_core::repositories::PaymentRepository;
use mbh_shared::EntityId;

use crate::database::sql::{db_error, push_where};

const PAYMENT_COLUMNS: &str = "p.id, p.tenant_id, p.landlord_id, p.boarding_house_id, \
     p.amount, p.payment_type, p.payment_method, p.status, p.payment_date, \
     p.due_date, p.reference_number, p.notes, p.created_at, p.updated_at";

const PARTY_JOINS: &str = "INNER JOIN tenants t ON p.tenant_id = t.id \
     INNER JOIN landlords l ON p.landlord_id = l.id \
     INNER JOIN boarding_houses bh ON p.boarding_house_id = bh.id";

const LISTING_COLUMNS: &str = "t.full_name AS tenant_name, l.full_name AS landlord_name, \
     bh.house_name, bh.house_code";

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct PaymentRow {
    pub id: i64,
    pub tenant_id: i64,
    pub landlord_id: i64,
    pub boarding_house_id: i64,
    pub amount: Decimal,
    pub payment_type: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub payment_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct PaymentListingRow {
    #[sqlx(flatten)]
    pub payment: PaymentRow,
    pub tenant_name: String,
    pub landlord_name: String,
    pub house_name: String,
    pub house_code: String,
}

#[derive(Debug, FromRow)]
struct PaymentDetailsRow {
    #[sqlx(flatten)]
    pub payment: PaymentRow,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: Option<String>,
    pub landlord_name: String,
    pub landlord_email: String,
    pub landlord_phone: Option<String>,
    pub house_name: String,
    pub house_code: String,
    pub address: String,
}

#[derive(Debug, FromRow)]
struct HousePaymentRow {
    #[sqlx(flatten)]
    pub payment: PaymentRow,
    pub tenant_name: String,
}

#[derive(Debug, FromRow)]
struct MonthlyRevenueRow {
    pub month: String,
    pub revenue: Decimal,
    pub payment_count: i64,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            tenant_id: row.tenant_id,
            landlord_id: row.landlord_id,
            boarding_house_id: row.boarding_house_id,
            amount: row.amount,
            payment_type: row.payment_type,
            payment_method: row.payment_method,
            status: PaymentStatus::from_str(&row.status).unwrap_or_default(),
            payment_date: row.payment_date,
            due_date: row.due_date,
            reference_number: row.reference_number,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PaymentListingRow> for PaymentListing {
    fn from(row: PaymentListingRow) -> Self {
        PaymentListing {
            payment: row.payment.into(),
            tenant_name: row.tenant_name,
            landlord_name: row.landlord_name,
            house_name: row.house_name,
            house_code: row.house_code,
        }
    }
}

impl From<PaymentDetailsRow> for PaymentDetails {
    fn from(row: PaymentDetailsRow) -> Self {
        PaymentDetails {
            payment: row.payment.into(),
            tenant_name: row.tenant_name,
            tenant_email: row.tenant_email,
            tenant_phone: row.tenant_phone,
            landlord_name: row.landlord_name,
            landlord_email: row.landlord_email,
            landlord_phone: row.landlord_phone,
            house_name: row.house_name,
            house_code: row.house_code,
            address: row.address,
        }
    }
}

impl From<HousePaymentRow> for HousePayment {
    fn from(row: HousePaymentRow) -> Self {
        HousePayment {
            payment: row.payment.into(),
            tenant_name: row.tenant_name,
        }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn list(&self, filter: &PaymentFilter, page: PageRequest) -> Result<Vec<PaymentListing>, DomainError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {}, {} FROM payments p {}",
            PAYMENT_COLUMNS, LISTING_COLUMNS, PARTY_JOINS
        ));
        push_where(&mut qb, &filter.conditions());
        qb.push(" ORDER BY p.payment_date DESC, p.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        debug!(sql = qb.sql(), "Listing payments");

        let rows: Vec<PaymentListingRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing payments"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PaymentFilter) -> Result<i64, DomainError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM payments p {}", PARTY_JOINS));
        push_where(&mut qb, &filter.conditions());

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting payments"))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<PaymentDetails>, DomainError> {
        let sql = format!(
            "SELECT {}, \
                t.full_name AS tenant_name, t.email AS tenant_email, t.phone AS tenant_phone, \
                l.full_name AS landlord_name, l.email AS landlord_email, l.phone AS landlord_phone, \
                bh.house_name, bh.house_code, bh.address \
             FROM payments p {} \
             WHERE p.id = $1",
            PAYMENT_COLUMNS, PARTY_JOINS
        );
        let row: Option<PaymentDetailsRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding payment by id"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, payment: &NewPayment) -> Result<EntityId, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO payments (
                tenant_id, landlord_id, boarding_house_id, amount, payment_type,
                payment_method, status, due_date, reference_number, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(payment.tenant_id)
        .bind(payment.landlord_id)
        .bind(payment.boarding_house_id)
        .bind(payment.amount)
        .bind(&payment.payment_type)
        .bind(&payment.payment_method)
        .bind(payment.status.as_str())
        .bind(payment.due_date)
        .bind(&payment.reference_number)
        .bind(&payment.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating payment"))?;

        info!(payment_id = id, "Payment created");
        Ok(id)
    }

    async fn update_status(&self, id: EntityId, status: PaymentStatus, notes: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2,
                notes = CASE
                    WHEN $3::TEXT <> '' THEN CONCAT_WS(' ', NULLIF(notes, ''), $3::TEXT)
                    ELSE notes
                END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating payment status"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, period: StatsPeriod) -> Result<PaymentStats, DomainError> {
        let (total_revenue, total_payments): (Decimal, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0), COUNT(*)
            FROM payments
            WHERE status = 'completed'
              AND DATE_TRUNC($1, payment_date) = DATE_TRUNC($1, NOW())
            "#,
        )
        .bind(period.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("summing completed payments"))?;

        let pending_payments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("counting pending payments"))?;

        let failed_payments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE status = 'failed'")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("counting failed payments"))?;

        Ok(PaymentStats {
            total_revenue,
            total_payments,
            pending_payments,
            failed_payments,
        })
    }

    async fn monthly_revenue(&self, months: i32) -> Result<Vec<MonthlyRevenue>, DomainError> {
        let rows: Vec<MonthlyRevenueRow> = sqlx::query_as(
            r#"
            SELECT TO_CHAR(payment_date, 'YYYY-MM') AS month,
                   COALESCE(SUM(amount), 0) AS revenue,
                   COUNT(*) AS payment_count
            FROM payments
            WHERE status = 'completed'
              AND payment_date >= NOW() - MAKE_INTERVAL(months => $1)
            GROUP BY TO_CHAR(payment_date, 'YYYY-MM')
            ORDER BY month
            "#,
        )
        .bind(months)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading monthly revenue"))?;

        Ok(rows
            .into_iter()
            .map(|row| MonthlyRevenue {
                month: row.month,
                revenue: row.revenue,
                payment_count: row.payment_count,
            })
            .collect())
    }

    async fn overdue(&self) -> Result<Vec<PaymentListing>, DomainError> {
        let sql = format!(
            "SELECT {}, {} FROM payments p {} \
             WHERE p.status = 'pending' AND p.due_date < CURRENT_DATE \
             ORDER BY p.due_date ASC",
            PAYMENT_COLUMNS, LISTING_COLUMNS, PARTY_JOINS
        );
        let rows: Vec<PaymentListingRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing overdue payments"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn by_boarding_house(&self, house_id: EntityId, limit: i64) -> Result<Vec<HousePayment>, DomainError> {
        let sql = format!(
            "SELECT {}, t.full_name AS tenant_name \
             FROM payments p \
             INNER JOIN tenants t ON p.tenant_id = t.id \
             WHERE p.boarding_house_id = $1 \
             ORDER BY p.payment_date DESC \
             LIMIT $2",
            PAYMENT_COLUMNS
        );
        let rows: Vec<HousePaymentRow> = sqlx::query_as(&sql)
            .bind(house_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing house payments"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting payment"))?;

        info!(payment_id = id, deleted = result.rows_affected(), "Payment deleted");
        Ok(result.rows_affected() > 0)
    }
}
