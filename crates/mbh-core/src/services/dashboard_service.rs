//! Dashboard aggregation

use std::sync::Arc;

use tracing::debug;

use mbh_shared::constants::{RECENT_ACTIVITY_LIMIT, REVENUE_CHART_MONTHS};

use crate::domain::DashboardData;
use crate::error::DomainError;
use crate::repositories::{
    ActivityLogRepository, AdminRepository, LandlordRepository, PaymentRepository,
};

pub struct DashboardService {
    admins: Arc<dyn AdminRepository>,
    activity: Arc<dyn ActivityLogRepository>,
    landlords: Arc<dyn LandlordRepository>,
    payments: Arc<dyn PaymentRepository>,
    recent_activity_limit: i64,
    revenue_months: i32,
}

impl DashboardService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        activity: Arc<dyn ActivityLogRepository>,
        landlords: Arc<dyn LandlordRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            admins,
            activity,
            landlords,
            payments,
            recent_activity_limit: RECENT_ACTIVITY_LIMIT,
            revenue_months: REVENUE_CHART_MONTHS,
        }
    }

    pub fn with_windows(mut self, recent_activity_limit: i64, revenue_months: i32) -> Self {
        self.recent_activity_limit = recent_activity_limit.max(1);
        self.revenue_months = revenue_months.max(1);
        self
    }

    /// Every aggregate is recomputed from source rows on each call.
    pub async fn dashboard_data(&self) -> Result<DashboardData, DomainError> {
        let stats = self.admins.dashboard_stats().await?;
        let recent_activity = self.activity.recent(self.recent_activity_limit).await?;
        let monthly_revenue = self.payments.monthly_revenue(self.revenue_months).await?;
        let overdue_landlords = self.landlords.overdue().await?;
        let overdue_payments = self.payments.overdue().await?;

        debug!(
            recent = recent_activity.len(),
            overdue_landlords = overdue_landlords.len(),
            overdue_payments = overdue_payments.len(),
            "Dashboard data assembled"
        );

        Ok(DashboardData {
            stats,
            recent_activity,
            monthly_revenue,
            overdue_landlords,
            overdue_payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DashboardStats, MonthlyRevenue};
    use crate::repositories::{
        MockActivityLogRepository, MockAdminRepository, MockLandlordRepository,
        MockPaymentRepository,
    };
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_dashboard_uses_configured_windows() {
        let mut admins = MockAdminRepository::new();
        admins.expect_dashboard_stats().returning(|| {
            Ok(DashboardStats {
                total_landlords: 4,
                total_tenants: 20,
                total_houses: 3,
                pending_verifications: 1,
                monthly_revenue: Decimal::from(12500),
            })
        });

        let mut activity = MockActivityLogRepository::new();
        activity
            .expect_recent()
            .with(eq(5))
            .returning(|_| Ok(vec![]));

        let mut landlords = MockLandlordRepository::new();
        landlords.expect_overdue().returning(|| Ok(vec![]));

        let mut payments = MockPaymentRepository::new();
        payments
            .expect_monthly_revenue()
            .with(eq(6))
            .returning(|_| {
                Ok(vec![MonthlyRevenue {
                    month: "2024-05".into(),
                    revenue: Decimal::from(12500),
                    payment_count: 5,
                }])
            });
        payments.expect_overdue().returning(|| Ok(vec![]));

        let service = DashboardService::new(
            Arc::new(admins),
            Arc::new(activity),
            Arc::new(landlords),
            Arc::new(payments),
        )
        .with_windows(5, 6);

        let data = service.dashboard_data().await.unwrap();
        assert_eq!(data.stats.total_landlords, 4);
        assert_eq!(data.monthly_revenue.len(), 1);
        assert!(data.overdue_payments.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_propagates_database_error() {
        let mut admins = MockAdminRepository::new();
        admins
            .expect_dashboard_stats()
            .returning(|| Err(DomainError::DatabaseError("connection refused".into())));

        let service = DashboardService::new(
            Arc::new(admins),
            Arc::new(MockActivityLogRepository::new()),
            Arc::new(MockLandlordRepository::new()),
            Arc::new(MockPaymentRepository::new()),
        );

        let err = service.dashboard_data().await.unwrap_err();
        assert!(err.is_server_error());
    }
}
