// ============================================================================
// MBH Core - Landlord Service
// File: crates/mbh-core/src/services/landlord_service.rs
// ============================================================================
//! Landlord listing, verification and suspension

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use mbh_shared::EntityId;

use super::record_activity;
use crate::domain::{
    activity_actions, Actor, BoardingHouse, LandlordPaymentStatus, LandlordSummary,
    VerificationChange,
};
use crate::error::DomainError;
use crate::query::{LandlordFilter, PageRequest, PaginationInfo};
use crate::repositories::{ActivityLogRepository, BoardingHouseRepository, LandlordRepository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordDetails {
    pub landlord: LandlordSummary,
    pub boarding_houses: Vec<BoardingHouse>,
}

pub struct LandlordService {
    landlords: Arc<dyn LandlordRepository>,
    houses: Arc<dyn BoardingHouseRepository>,
    activity: Arc<dyn ActivityLogRepository>,
}

impl LandlordService {
    pub fn new(
        landlords: Arc<dyn LandlordRepository>,
        houses: Arc<dyn BoardingHouseRepository>,
        activity: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            landlords,
            houses,
            activity,
        }
    }

    pub async fn list(
        &self,
        filter: &LandlordFilter,
        page: PageRequest,
    ) -> Result<(Vec<LandlordSummary>, PaginationInfo), DomainError> {
        let landlords = self.landlords.list(filter, page).await?;
        let total = self.landlords.count(filter).await?;
        Ok((landlords, PaginationInfo::new(total, page)))
    }

    pub async fn details(&self, id: EntityId) -> Result<LandlordDetails, DomainError> {
        let landlord = self
            .landlords
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LandlordNotFound)?;
        let boarding_houses = self.houses.by_landlord(id).await?;

        Ok(LandlordDetails {
            landlord,
            boarding_houses,
        })
    }

    /// Verify and start a subscription. `plan` is recorded as given.
    pub async fn verify(&self, actor: &Actor, id: EntityId, plan: &str) -> Result<(), DomainError> {
        let change = VerificationChange::verify(plan, Utc::now());
        if !self.landlords.update_verification(id, &change).await? {
            return Err(DomainError::ActionFailed("Failed to verify landlord"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::VERIFY_LANDLORD,
                format!("Verified landlord ID: {} with {} plan", id, plan),
            ),
        )
        .await;
        info!(landlord_id = id, plan, admin_id = actor.admin_id, "Landlord verified");
        Ok(())
    }

    pub async fn reject(&self, actor: &Actor, id: EntityId) -> Result<(), DomainError> {
        if !self
            .landlords
            .update_verification(id, &VerificationChange::Reject)
            .await?
        {
            return Err(DomainError::ActionFailed("Failed to reject landlord"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::REJECT_LANDLORD,
                format!("Rejected landlord ID: {}", id),
            ),
        )
        .await;
        info!(landlord_id = id, admin_id = actor.admin_id, "Landlord rejected");
        Ok(())
    }

    pub async fn suspend(&self, actor: &Actor, id: EntityId) -> Result<(), DomainError> {
        if !self.landlords.set_active(id, false).await? {
            return Err(DomainError::ActionFailed("Failed to suspend landlord"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::SUSPEND_LANDLORD,
                format!("Suspended landlord ID: {}", id),
            ),
        )
        .await;
        info!(landlord_id = id, admin_id = actor.admin_id, "Landlord suspended");
        Ok(())
    }

    pub async fn activate(&self, actor: &Actor, id: EntityId) -> Result<(), DomainError> {
        if !self.landlords.set_active(id, true).await? {
            return Err(DomainError::ActionFailed("Failed to activate landlord"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::ACTIVATE_LANDLORD,
                format!("Activated landlord ID: {}", id),
            ),
        )
        .await;
        info!(landlord_id = id, admin_id = actor.admin_id, "Landlord activated");
        Ok(())
    }

    pub async fn update_payment_status(
        &self,
        id: EntityId,
        status: LandlordPaymentStatus,
    ) -> Result<(), DomainError> {
        if !self.landlords.update_payment_status(id, status).await? {
            return Err(DomainError::ActionFailed("Failed to update landlord payment status"));
        }
        info!(landlord_id = id, status = status.as_str(), "Landlord payment status updated");
        Ok(())
    }
}
