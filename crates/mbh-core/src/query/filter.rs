//! Listing filters and the predicates they produce.
//!
//! Each filter struct turns into a list of [`Condition`]s over fixed column
//! names. Only the values travel as bind parameters; an absent filter yields
//! no condition at all.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use mbh_shared::constants::{DEFAULT_NEARBY_RADIUS_KM, PRICE_MAX_SENTINEL, PRICE_MIN_SENTINEL};

use crate::domain::{PaymentStatus, VerificationStatus};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Money(Decimal),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Static predicate with no parameters.
    Fixed(&'static str),
    Eq(&'static str, FilterValue),
    AtLeast(&'static str, FilterValue),
    AtMost(&'static str, FilterValue),
    /// Case-insensitive substring match on any of the columns. The pattern is
    /// already escaped and wrapped in `%`.
    Search(&'static [&'static str], String),
}

pub trait Predicates {
    fn conditions(&self) -> Vec<Condition>;
}

/// Escape LIKE metacharacters and wrap the term for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ----------------------------------------------------------------------------
// Landlords
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandlordFilter {
    pub search: Option<String>,
    pub status: Option<VerificationStatus>,
}

impl LandlordFilter {
    /// Blank search and unknown status values are treated as absent.
    pub fn from_params(search: Option<String>, status: Option<String>) -> Self {
        Self {
            search: non_empty(search),
            status: status.as_deref().and_then(VerificationStatus::from_str),
        }
    }
}

impl Predicates for LandlordFilter {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = vec![Condition::Fixed("l.is_active = TRUE")];
        if let Some(search) = &self.search {
            conditions.push(Condition::Search(
                &["l.full_name", "l.email", "l.phone"],
                like_pattern(search),
            ));
        }
        if let Some(status) = self.status {
            conditions.push(Condition::Eq(
                "l.verification_status",
                FilterValue::Text(status.as_str().to_string()),
            ));
        }
        conditions
    }
}

// ----------------------------------------------------------------------------
// Payments
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub house_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl PaymentFilter {
    pub fn from_params(
        status: Option<String>,
        house_id: Option<i64>,
        date_from: Option<String>,
        date_to: Option<String>,
        search: Option<String>,
    ) -> Self {
        let parse_date =
            |s: Option<String>| non_empty(s).and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
        Self {
            status: status.as_deref().and_then(PaymentStatus::from_str),
            house_id: house_id.filter(|id| *id > 0),
            date_from: parse_date(date_from),
            date_to: parse_date(date_to),
            search: non_empty(search),
        }
    }
}

impl Predicates for PaymentFilter {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(status) = self.status {
            conditions.push(Condition::Eq("p.status", FilterValue::Text(status.as_str().to_string())));
        }
        if let Some(house_id) = self.house_id {
            conditions.push(Condition::Eq("p.boarding_house_id", FilterValue::Int(house_id)));
        }
        if let Some(from) = self.date_from {
            conditions.push(Condition::AtLeast("p.payment_date::date", FilterValue::Date(from)));
        }
        if let Some(to) = self.date_to {
            conditions.push(Condition::AtMost("p.payment_date::date", FilterValue::Date(to)));
        }
        if let Some(search) = &self.search {
            conditions.push(Condition::Search(
                &["t.full_name", "l.full_name", "bh.house_name"],
                like_pattern(search),
            ));
        }
        conditions
    }
}

// ----------------------------------------------------------------------------
// Locator
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::PriceLow => "price_low",
            SortBy::PriceHigh => "price_high",
        }
    }

    /// Unknown values fall back to newest first.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("price_low") => SortBy::PriceLow,
            Some("price_high") => SortBy::PriceHigh,
            _ => SortBy::Newest,
        }
    }

    pub fn order_clause(&self) -> &'static str {
        match self {
            SortBy::Newest => "bh.created_at DESC",
            SortBy::PriceLow => "bh.rent_range_min ASC",
            SortBy::PriceHigh => "bh.rent_range_max DESC",
        }
    }
}

/// Houses eligible for the public locator.
pub const PUBLICLY_LISTED: &str = "bh.is_active = TRUE AND bh.is_verified = TRUE \
     AND l.verification_status = 'verified' AND l.payment_status = 'paid'";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocatorFilter {
    pub search: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub sort_by: SortBy,
}

impl LocatorFilter {
    /// A minimum of 0 or less and a maximum of 999999 or more are no bound at all.
    pub fn new(
        search: Option<String>,
        price_min: Option<Decimal>,
        price_max: Option<Decimal>,
        sort_by: SortBy,
    ) -> Self {
        Self {
            search: non_empty(search),
            price_min: price_min.filter(|min| *min > Decimal::from(PRICE_MIN_SENTINEL)),
            price_max: price_max.filter(|max| *max < Decimal::from(PRICE_MAX_SENTINEL)),
            sort_by,
        }
    }
}

impl Predicates for LocatorFilter {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = vec![Condition::Fixed(PUBLICLY_LISTED)];
        if let Some(search) = &self.search {
            conditions.push(Condition::Search(
                &["bh.house_name", "bh.address", "l.full_name"],
                like_pattern(search),
            ));
        }
        if let Some(min) = self.price_min {
            conditions.push(Condition::AtLeast("bh.rent_range_min", FilterValue::Money(min)));
        }
        if let Some(max) = self.price_max {
            conditions.push(Condition::AtMost("bh.rent_range_max", FilterValue::Money(max)));
        }
        conditions
    }
}

/// Proximity search around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl NearbyQuery {
    pub fn new(latitude: f64, longitude: f64, radius_km: Option<f64>) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::ValidationError("Invalid coordinates".into()));
        }
        let radius_km = radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(DomainError::ValidationError("Radius must be positive".into()));
        }
        Ok(Self {
            latitude,
            longitude,
            radius_km,
        })
    }
}
