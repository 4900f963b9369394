//! Payment repository trait (port)

use async_trait::async_trait;
use mbh_shared::EntityId;

use crate::domain::{
    HousePayment, MonthlyRevenue, NewPayment, PaymentDetails, PaymentListing, PaymentStats,
    PaymentStatus, StatsPeriod,
};
use crate::error::DomainError;
use crate::query::{PageRequest, PaymentFilter};

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list(&self, filter: &PaymentFilter, page: PageRequest) -> Result<Vec<PaymentListing>, DomainError>;
    async fn count(&self, filter: &PaymentFilter) -> Result<i64, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<PaymentDetails>, DomainError>;
    async fn create(&self, payment: &NewPayment) -> Result<EntityId, DomainError>;
    /// Non-empty notes are appended to the existing notes.
    async fn update_status(&self, id: EntityId, status: PaymentStatus, notes: &str) -> Result<bool, DomainError>;
    async fn stats(&self, period: StatsPeriod) -> Result<PaymentStats, DomainError>;
    async fn monthly_revenue(&self, months: i32) -> Result<Vec<MonthlyRevenue>, DomainError>;
    /// Pending payments past their due date, earliest first.
    async fn overdue(&self) -> Result<Vec<PaymentListing>, DomainError>;
    async fn by_boarding_house(&self, house_id: EntityId, limit: i64) -> Result<Vec<HousePayment>, DomainError>;
    /// Hard delete.
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
