//! Landlord repository trait (port)

use async_trait::async_trait;
use mbh_shared::EntityId;

use crate::domain::{
    Landlord, LandlordPaymentStatus, LandlordSummary, LandlordUpdate, NewLandlord,
    VerificationChange,
};
use crate::error::DomainError;
use crate::query::{LandlordFilter, PageRequest};

/// Update methods return `false` when no row matched.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait LandlordRepository: Send + Sync {
    async fn list(&self, filter: &LandlordFilter, page: PageRequest) -> Result<Vec<LandlordSummary>, DomainError>;
    async fn count(&self, filter: &LandlordFilter) -> Result<i64, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<LandlordSummary>, DomainError>;
    async fn update_verification(&self, id: EntityId, change: &VerificationChange) -> Result<bool, DomainError>;
    async fn update_payment_status(&self, id: EntityId, status: LandlordPaymentStatus) -> Result<bool, DomainError>;
    async fn set_active(&self, id: EntityId, is_active: bool) -> Result<bool, DomainError>;
    /// Overdue, or expired and not paid. Soonest expiry first.
    async fn overdue(&self) -> Result<Vec<Landlord>, DomainError>;
    async fn create(&self, landlord: &NewLandlord) -> Result<EntityId, DomainError>;
    async fn update(&self, id: EntityId, landlord: &LandlordUpdate) -> Result<bool, DomainError>;
    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
