// ============================================================================
// MBH Core - Payment Entity
// File: crates/mbh-core/src/domain/payment.rs
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub tenant_id: i64,
    pub landlord_id: i64,
    pub boarding_house_id: i64,
    pub amount: Decimal,
    pub payment_type: String,
    pub payment_method: Option<String>,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payment row for listings, with the names of the parties involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListing {
    #[serde(flatten)]
    pub payment: Payment,
    pub tenant_name: String,
    pub landlord_name: String,
    pub house_name: String,
    pub house_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(flatten)]
    pub payment: Payment,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: Option<String>,
    pub landlord_name: String,
    pub landlord_email: String,
    pub landlord_phone: Option<String>,
    pub house_name: String,
    pub house_code: String,
    pub address: String,
}

/// A payment received for one boarding house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePayment {
    #[serde(flatten)]
    pub payment: Payment,
    pub tenant_name: String,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("amount").with_message("Amount must be positive".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPayment {
    pub tenant_id: i64,
    pub landlord_id: i64,
    pub boarding_house_id: i64,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    #[validate(length(min = 1, max = 50))]
    pub payment_type: String,

    #[validate(length(max = 50))]
    pub payment_method: Option<String>,

    pub status: PaymentStatus,
    pub due_date: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub reference_number: Option<String>,

    pub notes: Option<String>,
}

/// Reporting window for payment statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatsPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl StatsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
            StatsPeriod::Year => "year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "week" => Some(StatsPeriod::Week),
            "month" => Some(StatsPeriod::Month),
            "year" => Some(StatsPeriod::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub total_revenue: Decimal,
    pub total_payments: i64,
    pub pending_payments: i64,
    pub failed_payments: i64,
}

/// One point of the revenue chart; `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
    pub payment_count: i64,
}
