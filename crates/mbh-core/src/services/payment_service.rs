// ============================================================================
// MBH Core - Payment Service
// File: crates/mbh-core/src/services/payment_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::info;

use mbh_shared::EntityId;

use super::record_activity;
use crate::domain::{activity_actions, Actor, PaymentDetails, PaymentListing, PaymentStats, PaymentStatus, StatsPeriod};
use crate::error::DomainError;
use crate::query::{PageRequest, PaginationInfo, PaymentFilter};
use crate::repositories::{ActivityLogRepository, PaymentRepository};

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    activity: Arc<dyn ActivityLogRepository>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentRepository>, activity: Arc<dyn ActivityLogRepository>) -> Self {
        Self { payments, activity }
    }

    pub async fn list(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> Result<(Vec<PaymentListing>, PaginationInfo), DomainError> {
        let payments = self.payments.list(filter, page).await?;
        let total = self.payments.count(filter).await?;
        Ok((payments, PaginationInfo::new(total, page)))
    }

    pub async fn details(&self, id: EntityId) -> Result<PaymentDetails, DomainError> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PaymentNotFound)
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        id: EntityId,
        status: PaymentStatus,
        notes: &str,
    ) -> Result<(), DomainError> {
        if !self.payments.update_status(id, status, notes.trim()).await? {
            return Err(DomainError::ActionFailed("Failed to update payment status"));
        }

        record_activity(
            self.activity.as_ref(),
            actor.activity(
                activity_actions::UPDATE_PAYMENT,
                format!("Updated payment ID: {} to {}", id, status.as_str()),
            ),
        )
        .await;
        info!(payment_id = id, status = status.as_str(), admin_id = actor.admin_id, "Payment status updated");
        Ok(())
    }

    pub async fn stats(&self, period: StatsPeriod) -> Result<PaymentStats, DomainError> {
        self.payments.stats(period).await
    }
}
