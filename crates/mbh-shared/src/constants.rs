//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Locator price bounds. A bound equal to its sentinel is not applied.
pub const PRICE_MIN_SENTINEL: i64 = 0;
pub const PRICE_MAX_SENTINEL: i64 = 999_999;

pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const RECENT_ACTIVITY_LIMIT: i64 = 10;
pub const REVENUE_CHART_MONTHS: i32 = 12;

pub const CURRENCY_CODE: &str = "PHP";
pub const HOUSE_CODE_PREFIX: &str = "BH";
pub const HOUSE_CODE_SUFFIX_LEN: usize = 6;

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 7200;
pub const SESSION_COOKIE_NAME: &str = "mbh_session";
