// ============================================================================
// MBH Core - Boarding House Entity
// File: crates/mbh-core/src/domain/boarding_house.rs
// ============================================================================

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use mbh_shared::constants::{HOUSE_CODE_PREFIX, HOUSE_CODE_SUFFIX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingHouse {
    pub id: i64,
    pub landlord_id: i64,
    pub house_code: String,
    pub house_name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub rent_range_min: Decimal,
    pub rent_range_max: Decimal,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Owning landlord's contact details, joined onto listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordContact {
    pub landlord_name: String,
    pub landlord_email: String,
    pub landlord_phone: Option<String>,
}

/// A house as shown in the locator and details views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseListing {
    #[serde(flatten)]
    pub house: BoardingHouse,
    #[serde(flatten)]
    pub contact: LandlordContact,
    /// Kilometres from the search point, only set by proximity queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBoardingHouse {
    pub landlord_id: i64,

    /// Generated when absent.
    #[validate(length(min = 3, max = 20))]
    pub house_code: Option<String>,

    #[validate(length(min = 2, max = 150, message = "House name must be between 2 and 150 characters"))]
    pub house_name: String,

    pub description: Option<String>,

    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(range(min = 0, max = 1000))]
    pub total_rooms: i32,

    #[validate(range(min = 0, max = 1000))]
    pub available_rooms: i32,

    pub rent_range_min: Decimal,
    pub rent_range_max: Decimal,
    pub amenities: Option<String>,
    pub images: Option<String>,
}

impl NewBoardingHouse {
    pub fn house_code_or_generate(&self) -> String {
        self.house_code.clone().unwrap_or_else(generate_house_code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BoardingHouseUpdate {
    #[validate(length(min = 2, max = 150, message = "House name must be between 2 and 150 characters"))]
    pub house_name: String,

    pub description: Option<String>,

    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(range(min = 0, max = 1000))]
    pub total_rooms: i32,

    #[validate(range(min = 0, max = 1000))]
    pub available_rooms: i32,

    pub rent_range_min: Decimal,
    pub rent_range_max: Decimal,
    pub amenities: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardingHouseStats {
    pub total_houses: i64,
    pub verified_houses: i64,
    pub available_rooms: i64,
}

/// `BH` followed by six uppercase alphanumerics.
pub fn generate_house_code() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(HOUSE_CODE_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}{}", HOUSE_CODE_PREFIX, suffix)
}
