// ============================================================================
// MBH Core - Landlord Entity
// File: crates/mbh-core/src/domain/landlord.rs
// Description: Landlord entity with verification and subscription management
// ============================================================================

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use mbh_shared::utils::is_valid_phone;

/// Verification status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

/// Subscription billing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LandlordPaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Overdue,
}

impl LandlordPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandlordPaymentStatus::Paid => "paid",
            LandlordPaymentStatus::Unpaid => "unpaid",
            LandlordPaymentStatus::Overdue => "overdue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(LandlordPaymentStatus::Paid),
            "unpaid" => Some(LandlordPaymentStatus::Unpaid),
            "overdue" => Some(LandlordPaymentStatus::Overdue),
            _ => None,
        }
    }
}

/// Subscription plan enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(SubscriptionPlan::Basic),
            "premium" => Some(SubscriptionPlan::Premium),
            "enterprise" => Some(SubscriptionPlan::Enterprise),
            _ => None,
        }
    }

    /// Length of one subscription term in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            SubscriptionPlan::Basic => 1,
            SubscriptionPlan::Premium => 3,
            SubscriptionPlan::Enterprise => 12,
        }
    }

    pub fn expiry_from(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        start.checked_add_months(Months::new(self.months()))
    }
}

/// Landlord entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landlord {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub verification_status: VerificationStatus,
    pub payment_status: LandlordPaymentStatus,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Landlord {
    pub fn is_subscription_expired(&self, now: DateTime<Utc>) -> bool {
        self.subscription_expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Houses of this landlord may appear in the public locator.
    pub fn can_list_publicly(&self) -> bool {
        self.is_active
            && self.verification_status == VerificationStatus::Verified
            && self.payment_status == LandlordPaymentStatus::Paid
    }
}

/// Landlord row with aggregated house counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordSummary {
    #[serde(flatten)]
    pub landlord: Landlord,
    pub total_houses: i64,
    pub verified_houses: i64,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

/// Registration payload; new landlords start out pending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLandlord {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LandlordUpdate {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,
}

/// A single verification transition, applied as one update.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationChange {
    Verify {
        plan: Option<SubscriptionPlan>,
        expires_at: Option<DateTime<Utc>>,
    },
    Reject,
}

impl VerificationChange {
    /// An unrecognized plan verifies the landlord without a plan or expiry.
    pub fn verify(plan: &str, now: DateTime<Utc>) -> Self {
        let plan = SubscriptionPlan::from_str(plan);
        VerificationChange::Verify {
            plan,
            expires_at: plan.and_then(|p| p.expiry_from(now)),
        }
    }

    pub fn status(&self) -> VerificationStatus {
        match self {
            VerificationChange::Verify { .. } => VerificationStatus::Verified,
            VerificationChange::Reject => VerificationStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_plan_expiry_months() {
        let now = at(2024, 1, 15);
        assert_eq!(SubscriptionPlan::Basic.expiry_from(now), Some(at(2024, 2, 15)));
        assert_eq!(SubscriptionPlan::Premium.expiry_from(now), Some(at(2024, 4, 15)));
        assert_eq!(SubscriptionPlan::Enterprise.expiry_from(now), Some(at(2025, 1, 15)));
    }

    #[test]
    fn test_plan_expiry_clamps_to_month_end() {
        let now = at(2024, 1, 31);
        assert_eq!(SubscriptionPlan::Basic.expiry_from(now), Some(at(2024, 2, 29)));
    }

    #[test]
    fn test_verify_with_known_plan() {
        let now = at(2024, 3, 1);
        let change = VerificationChange::verify("premium", now);
        assert_eq!(
            change,
            VerificationChange::Verify {
                plan: Some(SubscriptionPlan::Premium),
                expires_at: Some(at(2024, 6, 1)),
            }
        );
        assert_eq!(change.status(), VerificationStatus::Verified);
    }

    #[test]
    fn test_verify_with_unknown_plan_has_no_expiry() {
        let change = VerificationChange::verify("platinum", at(2024, 3, 1));
        assert_eq!(
            change,
            VerificationChange::Verify {
                plan: None,
                expires_at: None
            }
        );
    }

    #[test]
    fn test_reject_status() {
        assert_eq!(VerificationChange::Reject.status(), VerificationStatus::Rejected);
    }

    #[test]
    fn test_status_round_trip_names() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(VerificationStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_new_landlord_validation() {
        let valid = NewLandlord {
            full_name: "Maria Santos".into(),
            email: "maria@example.com".into(),
            phone: "+63 917 555 0101".into(),
            password_hash: "$2y$10$abc".into(),
            address: Some("Cebu City".into()),
        };
        assert!(valid.validate().is_ok());

        let invalid = NewLandlord {
            phone: "123".into(),
            email: "not-an-email".into(),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_public_listing_requires_verified_paid_and_active() {
        let landlord = Landlord {
            id: 1,
            full_name: "Maria Santos".into(),
            email: "maria@example.com".into(),
            phone: None,
            address: None,
            verification_status: VerificationStatus::Verified,
            payment_status: LandlordPaymentStatus::Paid,
            subscription_plan: Some(SubscriptionPlan::Basic),
            subscription_expires_at: Some(at(2024, 2, 15)),
            is_active: true,
            created_at: at(2024, 1, 15),
            updated_at: None,
        };
        assert!(landlord.can_list_publicly());
        assert!(!landlord.is_subscription_expired(at(2024, 2, 1)));
        assert!(landlord.is_subscription_expired(at(2024, 3, 1)));

        let unpaid = Landlord {
            payment_status: LandlordPaymentStatus::Unpaid,
            ..landlord.clone()
        };
        assert!(!unpaid.can_list_publicly());

        let suspended = Landlord {
            is_active: false,
            ..landlord
        };
        assert!(!suspended.can_list_publicly());
    }
}
