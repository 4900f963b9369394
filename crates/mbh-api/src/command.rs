//! AJAX commands
//!
//! The dashboard talks to a single endpoint that multiplexes every operation
//! through an `action` field. Actions form a closed set; each one parses its
//! own parameters into an [`AjaxCommand`] before any service is touched.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use mbh_core::domain::PaymentStatus;
use mbh_core::query::{
    LandlordFilter, LocatorFilter, NearbyQuery, PageRequest, PaymentFilter, SortBy,
};
use mbh_core::DomainError;
use mbh_shared::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AjaxAction {
    GetDashboardData,
    GetLandlords,
    GetLandlordDetails,
    VerifyLandlord,
    RejectLandlord,
    SuspendLandlord,
    ActivateLandlord,
    GetPayments,
    GetPaymentDetails,
    UpdatePaymentStatus,
    GetVerifiedHouses,
    GetHouseDetails,
    VerifyHouse,
    UnverifyHouse,
    ExportHouses,
    GetNearbyHouses,
}

impl AjaxAction {
    pub const ALL: [AjaxAction; 16] = [
        AjaxAction::GetDashboardData,
        AjaxAction::GetLandlords,
        AjaxAction::GetLandlordDetails,
        AjaxAction::VerifyLandlord,
        AjaxAction::RejectLandlord,
        AjaxAction::SuspendLandlord,
        AjaxAction::ActivateLandlord,
        AjaxAction::GetPayments,
        AjaxAction::GetPaymentDetails,
        AjaxAction::UpdatePaymentStatus,
        AjaxAction::GetVerifiedHouses,
        AjaxAction::GetHouseDetails,
        AjaxAction::VerifyHouse,
        AjaxAction::UnverifyHouse,
        AjaxAction::ExportHouses,
        AjaxAction::GetNearbyHouses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AjaxAction::GetDashboardData => "get_dashboard_data",
            AjaxAction::GetLandlords => "get_landlords",
            AjaxAction::GetLandlordDetails => "get_landlord_details",
            AjaxAction::VerifyLandlord => "verify_landlord",
            AjaxAction::RejectLandlord => "reject_landlord",
            AjaxAction::SuspendLandlord => "suspend_landlord",
            AjaxAction::ActivateLandlord => "activate_landlord",
            AjaxAction::GetPayments => "get_payments",
            AjaxAction::GetPaymentDetails => "get_payment_details",
            AjaxAction::UpdatePaymentStatus => "update_payment_status",
            AjaxAction::GetVerifiedHouses => "get_verified_houses",
            AjaxAction::GetHouseDetails => "get_house_details",
            AjaxAction::VerifyHouse => "verify_house",
            AjaxAction::UnverifyHouse => "unverify_house",
            AjaxAction::ExportHouses => "export_houses",
            AjaxAction::GetNearbyHouses => "get_nearby_houses",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == s)
    }

    /// Actions on the protected allow-list. The locator's nearby search is
    /// checked separately and answers with a shorter message.
    pub fn is_protected(&self) -> bool {
        !matches!(self, AjaxAction::GetNearbyHouses)
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            AjaxAction::VerifyLandlord
                | AjaxAction::RejectLandlord
                | AjaxAction::SuspendLandlord
                | AjaxAction::ActivateLandlord
                | AjaxAction::UpdatePaymentStatus
                | AjaxAction::VerifyHouse
                | AjaxAction::UnverifyHouse
        )
    }
}

/// Request parameters: the query string merged with the form body, body wins.
/// The CSRF token is only ever taken from the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AjaxParams {
    values: HashMap<String, String>,
}

impl AjaxParams {
    pub fn merge(query: HashMap<String, String>, body: HashMap<String, String>) -> Self {
        let mut values = query;
        values.remove("csrf_token");
        values.extend(body);
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn action(&self) -> Option<&str> {
        self.get("action")
    }

    pub fn csrf_token(&self) -> &str {
        self.get("csrf_token").unwrap_or_default()
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn decimal(&self, key: &str) -> Option<Decimal> {
        self.get(key).and_then(|v| Decimal::from_str(v.trim()).ok())
    }

    /// A missing or malformed id becomes 0, which matches no row.
    fn id(&self) -> EntityId {
        self.int("id").unwrap_or(0)
    }

    fn page(&self, default_limit: u32) -> PageRequest {
        PageRequest::new(
            self.int("page").unwrap_or(1),
            self.int("limit").unwrap_or_else(|| i64::from(default_limit)),
        )
    }
}

impl From<HashMap<String, String>> for AjaxParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Settings that supply parameter defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandDefaults {
    pub page_size: u32,
    pub nearby_radius_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AjaxCommand {
    GetDashboardData,
    GetLandlords { filter: LandlordFilter, page: PageRequest },
    GetLandlordDetails { id: EntityId },
    VerifyLandlord { id: EntityId, plan: String },
    RejectLandlord { id: EntityId },
    SuspendLandlord { id: EntityId },
    ActivateLandlord { id: EntityId },
    GetPayments { filter: PaymentFilter, page: PageRequest },
    GetPaymentDetails { id: EntityId },
    UpdatePaymentStatus { id: EntityId, status: PaymentStatus, notes: String },
    GetVerifiedHouses { filter: LocatorFilter },
    GetHouseDetails { id: EntityId },
    VerifyHouse { id: EntityId },
    UnverifyHouse { id: EntityId },
    ExportHouses,
    GetNearbyHouses { query: NearbyQuery },
}

impl AjaxCommand {
    pub fn parse(
        action: AjaxAction,
        params: &AjaxParams,
        defaults: CommandDefaults,
    ) -> Result<Self, DomainError> {
        let command = match action {
            AjaxAction::GetDashboardData => AjaxCommand::GetDashboardData,
            AjaxAction::GetLandlords => AjaxCommand::GetLandlords {
                filter: LandlordFilter::from_params(params.text("search"), params.text("status")),
                page: params.page(defaults.page_size),
            },
            AjaxAction::GetLandlordDetails => AjaxCommand::GetLandlordDetails { id: params.id() },
            AjaxAction::VerifyLandlord => AjaxCommand::VerifyLandlord {
                id: params.id(),
                plan: params
                    .text("subscription_plan")
                    .unwrap_or_else(|| "basic".to_string()),
            },
            AjaxAction::RejectLandlord => AjaxCommand::RejectLandlord { id: params.id() },
            AjaxAction::SuspendLandlord => AjaxCommand::SuspendLandlord { id: params.id() },
            AjaxAction::ActivateLandlord => AjaxCommand::ActivateLandlord { id: params.id() },
            AjaxAction::GetPayments => AjaxCommand::GetPayments {
                filter: PaymentFilter::from_params(
                    params.text("status"),
                    params.int("house_id"),
                    params.text("date_from"),
                    params.text("date_to"),
                    params.text("search"),
                ),
                page: params.page(defaults.page_size),
            },
            AjaxAction::GetPaymentDetails => AjaxCommand::GetPaymentDetails { id: params.id() },
            AjaxAction::UpdatePaymentStatus => {
                let status = params
                    .get("status")
                    .and_then(PaymentStatus::from_str)
                    .ok_or_else(|| DomainError::ValidationError("Invalid payment status".into()))?;
                AjaxCommand::UpdatePaymentStatus {
                    id: params.id(),
                    status,
                    notes: params.text("notes").unwrap_or_default(),
                }
            }
            AjaxAction::GetVerifiedHouses => AjaxCommand::GetVerifiedHouses {
                filter: LocatorFilter::new(
                    params.text("search"),
                    params.decimal("price_min"),
                    params.decimal("price_max"),
                    SortBy::parse(params.get("sort_by")),
                ),
            },
            AjaxAction::GetHouseDetails => AjaxCommand::GetHouseDetails { id: params.id() },
            AjaxAction::VerifyHouse => AjaxCommand::VerifyHouse { id: params.id() },
            AjaxAction::UnverifyHouse => AjaxCommand::UnverifyHouse { id: params.id() },
            AjaxAction::ExportHouses => AjaxCommand::ExportHouses,
            AjaxAction::GetNearbyHouses => {
                let (Some(latitude), Some(longitude)) =
                    (params.float("latitude"), params.float("longitude"))
                else {
                    return Err(DomainError::ValidationError(
                        "Latitude and longitude are required".into(),
                    ));
                };
                let radius = params.float("radius").unwrap_or(defaults.nearby_radius_km);
                AjaxCommand::GetNearbyHouses {
                    query: NearbyQuery::new(latitude, longitude, Some(radius))?,
                }
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: CommandDefaults = CommandDefaults {
        page_size: 10,
        nearby_radius_km: 10.0,
    };

    fn params(pairs: &[(&str, &str)]) -> AjaxParams {
        AjaxParams::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in AjaxAction::ALL {
            assert_eq!(AjaxAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(AjaxAction::from_str("drop_tables"), None);
        assert_eq!(AjaxAction::from_str("GET_LANDLORDS"), None);
    }

    #[test]
    fn test_only_nearby_is_outside_allow_list() {
        let unprotected: Vec<_> = AjaxAction::ALL.into_iter().filter(|a| !a.is_protected()).collect();
        assert_eq!(unprotected, vec![AjaxAction::GetNearbyHouses]);
    }

    #[test]
    fn test_body_wins_over_query() {
        let query = HashMap::from([("page".to_string(), "2".to_string()), ("search".to_string(), "a".to_string())]);
        let body = HashMap::from([("page".to_string(), "5".to_string())]);
        let merged = AjaxParams::merge(query, body);
        assert_eq!(merged.get("page"), Some("5"));
        assert_eq!(merged.get("search"), Some("a"));
    }

    #[test]
    fn test_csrf_token_only_from_body() {
        let query = HashMap::from([("csrf_token".to_string(), "abc".to_string())]);
        let merged = AjaxParams::merge(query.clone(), HashMap::new());
        assert_eq!(merged.csrf_token(), "");

        let body = HashMap::from([("csrf_token".to_string(), "def".to_string())]);
        assert_eq!(AjaxParams::merge(query, body).csrf_token(), "def");
    }

    #[test]
    fn test_mutations_are_state_changes_only() {
        let mutations: Vec<_> = AjaxAction::ALL.into_iter().filter(|a| a.is_mutation()).collect();
        assert_eq!(mutations.len(), 7);
        assert!(!AjaxAction::GetLandlords.is_mutation());
        assert!(!AjaxAction::ExportHouses.is_mutation());
    }

    #[test]
    fn test_landlord_listing_defaults() {
        let command = AjaxCommand::parse(AjaxAction::GetLandlords, &params(&[]), DEFAULTS).unwrap();
        assert_eq!(
            command,
            AjaxCommand::GetLandlords {
                filter: LandlordFilter::default(),
                page: PageRequest::new(1, 10),
            }
        );
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let command = AjaxCommand::parse(
            AjaxAction::GetPayments,
            &params(&[("page", "-3"), ("limit", "5000"), ("status", "completed")]),
            DEFAULTS,
        )
        .unwrap();
        let AjaxCommand::GetPayments { filter, page } = command else {
            panic!("unexpected command");
        };
        assert_eq!(page, PageRequest::new(1, 100));
        assert_eq!(filter.status, Some(PaymentStatus::Completed));
    }

    #[test]
    fn test_verify_defaults_to_basic_plan() {
        let command =
            AjaxCommand::parse(AjaxAction::VerifyLandlord, &params(&[("id", "7")]), DEFAULTS).unwrap();
        assert_eq!(
            command,
            AjaxCommand::VerifyLandlord {
                id: 7,
                plan: "basic".into()
            }
        );
    }

    #[test]
    fn test_missing_id_is_zero() {
        let command = AjaxCommand::parse(AjaxAction::RejectLandlord, &params(&[("id", "abc")]), DEFAULTS).unwrap();
        assert_eq!(command, AjaxCommand::RejectLandlord { id: 0 });
    }

    #[test]
    fn test_unknown_payment_status_is_rejected() {
        let err = AjaxCommand::parse(
            AjaxAction::UpdatePaymentStatus,
            &params(&[("id", "1"), ("status", "lost")]),
            DEFAULTS,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn test_locator_sentinels_are_dropped() {
        let command = AjaxCommand::parse(
            AjaxAction::GetVerifiedHouses,
            &params(&[("price_min", "0"), ("price_max", "999999"), ("sort_by", "price_low")]),
            DEFAULTS,
        )
        .unwrap();
        assert_eq!(
            command,
            AjaxCommand::GetVerifiedHouses {
                filter: LocatorFilter::new(None, None, None, SortBy::PriceLow)
            }
        );
    }

    #[test]
    fn test_nearby_uses_configured_radius() {
        let command = AjaxCommand::parse(
            AjaxAction::GetNearbyHouses,
            &params(&[("latitude", "10.3157"), ("longitude", "123.8854")]),
            CommandDefaults {
                page_size: 10,
                nearby_radius_km: 5.0,
            },
        )
        .unwrap();
        let AjaxCommand::GetNearbyHouses { query } = command else {
            panic!("unexpected command");
        };
        assert_eq!(query.radius_km, 5.0);

        let missing = AjaxCommand::parse(AjaxAction::GetNearbyHouses, &params(&[("latitude", "10")]), DEFAULTS);
        assert!(missing.is_err());
    }
}
