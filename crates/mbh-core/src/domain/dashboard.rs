//! Dashboard aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActivityLog, Landlord, MonthlyRevenue, PaymentListing};

/// Headline counters, recomputed on every load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_landlords: i64,
    pub total_tenants: i64,
    pub total_houses: i64,
    pub pending_verifications: i64,
    pub monthly_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityLog>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub overdue_landlords: Vec<Landlord>,
    pub overdue_payments: Vec<PaymentListing>,
}
