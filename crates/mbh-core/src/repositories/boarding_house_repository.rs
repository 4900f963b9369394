//! Boarding house repository trait (port)

use async_trait::async_trait;
use mbh_shared::EntityId;

use crate::domain::{
    BoardingHouse, BoardingHouseStats, BoardingHouseUpdate, HouseListing, NewBoardingHouse,
};
use crate::error::DomainError;
use crate::query::{LocatorFilter, NearbyQuery};

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BoardingHouseRepository: Send + Sync {
    /// Publicly listed houses matching the locator filter.
    async fn verified_listings(&self, filter: &LocatorFilter) -> Result<Vec<HouseListing>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<HouseListing>, DomainError>;
    /// Active houses of one landlord, newest first.
    async fn by_landlord(&self, landlord_id: EntityId) -> Result<Vec<BoardingHouse>, DomainError>;
    async fn create(&self, house: &NewBoardingHouse) -> Result<EntityId, DomainError>;
    async fn update(&self, id: EntityId, house: &BoardingHouseUpdate) -> Result<bool, DomainError>;
    async fn set_verified(&self, id: EntityId, is_verified: bool) -> Result<bool, DomainError>;
    async fn set_active(&self, id: EntityId, is_active: bool) -> Result<bool, DomainError>;
    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError>;
    /// Publicly listed houses within the radius, nearest first.
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<HouseListing>, DomainError>;
    async fn stats(&self) -> Result<BoardingHouseStats, DomainError>;
}
