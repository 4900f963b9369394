use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use mbh_core::repositories::{
    ActivityLogRepository, AdminRepository, BoardingHouseRepository, LandlordRepository,
    PaymentRepository,
};
use mbh_core::services::{
    AuthService, BoardingHouseService, DashboardService, LandlordService, PaymentService,
};
use mbh_security::SessionStore;
use mbh_shared::config::{AppConfig, DashboardSettings};

use crate::views::Views;

/// Controller layer, one service per admin area.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub dashboard: Arc<DashboardService>,
    pub landlords: Arc<LandlordService>,
    pub payments: Arc<PaymentService>,
    pub houses: Arc<BoardingHouseService>,
}

impl Services {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        landlords: Arc<dyn LandlordRepository>,
        houses: Arc<dyn BoardingHouseRepository>,
        payments: Arc<dyn PaymentRepository>,
        activity: Arc<dyn ActivityLogRepository>,
        dashboard: &DashboardSettings,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(admins.clone(), activity.clone())),
            dashboard: Arc::new(
                DashboardService::new(admins, activity.clone(), landlords.clone(), payments.clone())
                    .with_windows(dashboard.recent_activity_limit, dashboard.revenue_months),
            ),
            landlords: Arc::new(LandlordService::new(landlords, houses.clone(), activity.clone())),
            payments: Arc::new(PaymentService::new(payments, activity.clone())),
            houses: Arc::new(BoardingHouseService::new(houses, activity)),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: AppConfig,
    pub services: Services,
    pub sessions: Arc<SessionStore>,
    pub views: Arc<Views>,
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<Views> {
    fn from_ref(state: &AppState) -> Self {
        state.views.clone()
    }
}
