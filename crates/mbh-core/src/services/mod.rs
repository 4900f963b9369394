//! Application services: one per admin use-case area.

pub mod auth_service;
pub mod boarding_house_service;
pub mod dashboard_service;
pub mod export;
pub mod landlord_service;
pub mod payment_service;

pub use auth_service::AuthService;
pub use boarding_house_service::BoardingHouseService;
pub use dashboard_service::DashboardService;
pub use export::CsvExport;
pub use landlord_service::{LandlordDetails, LandlordService};
pub use payment_service::PaymentService;

use tracing::warn;

use crate::domain::NewActivity;
use crate::repositories::ActivityLogRepository;

/// Audit failures are logged and never fail the action being audited.
pub(crate) async fn record_activity(repo: &dyn ActivityLogRepository, entry: NewActivity) {
    if let Err(e) = repo.record(&entry).await {
        warn!(action = %entry.action, user_id = entry.user_id, "Failed to record activity: {}", e);
    }
}
