// ============================================================================
// MBH Core - Boarding House Service
// File: crates/mbh-core/src/services/boarding_house_service.rs
// ============================================================================
//! Locator queries, house verification and export

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use mbh_shared::EntityId;

use super::export::CsvExport;
use super::record_activity;
use crate::domain::{activity_actions, Actor, BoardingHouseStats, HouseListing};
use crate::error::DomainError;
use crate::query::{LocatorFilter, NearbyQuery};
use crate::repositories::{ActivityLogRepository, BoardingHouseRepository};

pub struct BoardingHouseService {
    houses: Arc<dyn BoardingHouseRepository>,
    activity: Arc<dyn ActivityLogRepository>,
}

impl BoardingHouseService {
    pub fn new(houses: Arc<dyn BoardingHouseRepository>, activity: Arc<dyn ActivityLogRepository>) -> Self {
        Self { houses, activity }
    }

    pub async fn verified_houses(&self, filter: &LocatorFilter) -> Result<Vec<HouseListing>, DomainError> {
        self.houses.verified_listings(filter).await
    }

    pub async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<HouseListing>, DomainError> {
        self.houses.nearby(query).await
    }

    pub async fn details(&self, id: EntityId) -> Result<HouseListing, DomainError> {
        self.houses
            .find_by_id(id)
            .await?
            .ok_or(DomainError::BoardingHouseNotFound)
    }

    pub async fn verify(&self, actor: &Actor, id: EntityId) -> Result<(), DomainError> {
        if !self.houses.set_verified(id, true).await? {
            return Err(DomainError::ActionFailed("Failed to verify boarding house"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::VERIFY_HOUSE,
                format!("Verified boarding house ID: {}", id),
            ),
        )
        .await;
        info!(house_id = id, admin_id = actor.admin_id, "Boarding house verified");
        Ok(())
    }

    pub async fn unverify(&self, actor: &Actor, id: EntityId) -> Result<(), DomainError> {
        if !self.houses.set_verified(id, false).await? {
            return Err(DomainError::ActionFailed("Failed to unverify boarding house"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::UNVERIFY_HOUSE,
                format!("Unverified boarding house ID: {}", id),
            ),
        )
        .await;
        info!(house_id = id, admin_id = actor.admin_id, "Boarding house unverified");
        Ok(())
    }

    pub async fn stats(&self) -> Result<BoardingHouseStats, DomainError> {
        self.houses.stats().await
    }

    /// Every publicly listed house, unfiltered.
    pub async fn export_verified(&self, today: NaiveDate) -> Result<CsvExport, DomainError> {
        let houses = self.houses.verified_listings(&LocatorFilter::default()).await?;
        let export = CsvExport::verified_houses(&houses, today)?;
        info!(rows = houses.len(), filename = %export.filename, "Verified houses exported");
        Ok(export)
    }
}
