// ============================================================================
// MBH API - Page Handlers
// File: crates/mbh-api/src/handlers/pages.rs
// ============================================================================
//! Server-rendered dashboard pages

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::Html,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mbh_core::domain::{
    BoardingHouseStats, DashboardData, HouseListing, LandlordSummary, PaymentListing, PaymentStats,
    StatsPeriod,
};
use mbh_core::query::{LandlordFilter, LocatorFilter, PageRequest, PaginationInfo, PaymentFilter, SortBy};
use mbh_security::SessionUser;

use crate::error::ApiError;
use crate::extract::RequireAdmin;
use crate::state::AppState;

/// Chrome shared by every page behind the login.
#[derive(Debug, Serialize)]
struct Layout<'a> {
    title: &'static str,
    active: &'static str,
    csrf_token: &'a str,
    admin: &'a SessionUser,
}

impl<'a> Layout<'a> {
    fn new(title: &'static str, active: &'static str, auth: &'a RequireAdmin) -> Self {
        Self {
            title,
            active,
            csrf_token: &auth.context.csrf_token,
            admin: &auth.admin,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct PageLink {
    number: i64,
    active: bool,
    href: String,
}

/// Pagination links: up to two pages either side of the current one.
#[derive(Debug, Serialize)]
struct Pager {
    info: PaginationInfo,
    links: Vec<PageLink>,
    prev_href: Option<String>,
    next_href: Option<String>,
}

impl Pager {
    fn new(info: PaginationInfo, filters: &[(&str, &str)]) -> Self {
        let href = |page: i64| {
            let mut pairs: Vec<(&str, String)> = vec![("page", page.to_string())];
            pairs.extend(
                filters
                    .iter()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| (*k, v.to_string())),
            );
            serde_urlencoded::to_string(&pairs)
                .map(|qs| format!("?{}", qs))
                .unwrap_or_else(|_| format!("?page={}", page))
        };

        let start = info.current_page.saturating_sub(2).max(1);
        let end = info.current_page.saturating_add(2).min(info.total_pages);
        let links = (start..=end)
            .map(|number| PageLink {
                number,
                active: number == info.current_page,
                href: href(number),
            })
            .collect();

        Self {
            prev_href: info.prev_page.map(href),
            next_href: info.next_page.map(href),
            links,
            info,
        }
    }
}

fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

#[derive(Serialize)]
struct DashboardPage<'a> {
    #[serde(flatten)]
    layout: Layout<'a>,
    dashboard: DashboardData,
}

/// GET /dashboard
pub async fn dashboard_page(
    State(state): State<AppState>,
    auth: RequireAdmin,
) -> Result<Html<String>, ApiError> {
    let dashboard = state.services.dashboard.dashboard_data().await?;
    let page = DashboardPage {
        layout: Layout::new("Dashboard", "dashboard", &auth),
        dashboard,
    };
    Ok(state.views.render("dashboard", &page)?)
}

// ----------------------------------------------------------------------------
// Landlords
// ----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LandlordQuery {
    pub page: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize)]
struct LandlordsPage<'a> {
    #[serde(flatten)]
    layout: Layout<'a>,
    landlords: Vec<LandlordSummary>,
    pager: Pager,
    filters: &'a LandlordQuery,
}

/// GET /landlords?page&search&status
pub async fn landlords_page(
    State(state): State<AppState>,
    auth: RequireAdmin,
    Query(query): Query<LandlordQuery>,
) -> Result<Html<String>, ApiError> {
    let filter = LandlordFilter::from_params(Some(query.search.clone()), Some(query.status.clone()));
    let page = PageRequest::new(
        page_number(query.page.as_deref()),
        i64::from(state.config.dashboard.page_size),
    );
    let (landlords, info) = state.services.landlords.list(&filter, page).await?;

    let pager = Pager::new(info, &[("search", &query.search), ("status", &query.status)]);
    let view = LandlordsPage {
        layout: Layout::new("Landlord Management", "landlords", &auth),
        landlords,
        pager,
        filters: &query,
    };
    Ok(state.views.render("landlords", &view)?)
}

// ----------------------------------------------------------------------------
// Payments
// ----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PaymentQuery {
    pub page: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub house_id: String,
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,
    #[serde(default)]
    pub search: String,
}

#[derive(Serialize)]
struct PaymentsPage<'a> {
    #[serde(flatten)]
    layout: Layout<'a>,
    payments: Vec<PaymentListing>,
    stats: PaymentStats,
    pager: Pager,
    filters: &'a PaymentQuery,
}

/// GET /payments?page&status&house_id&date_from&date_to&search
pub async fn payments_page(
    State(state): State<AppState>,
    auth: RequireAdmin,
    Query(query): Query<PaymentQuery>,
) -> Result<Html<String>, ApiError> {
    let filter = PaymentFilter::from_params(
        Some(query.status.clone()),
        query.house_id.trim().parse().ok(),
        Some(query.date_from.clone()),
        Some(query.date_to.clone()),
        Some(query.search.clone()),
    );
    let page = PageRequest::new(
        page_number(query.page.as_deref()),
        i64::from(state.config.dashboard.page_size),
    );
    let (payments, info) = state.services.payments.list(&filter, page).await?;
    let stats = state.services.payments.stats(StatsPeriod::Month).await?;

    let pager = Pager::new(
        info,
        &[
            ("status", &query.status),
            ("house_id", &query.house_id),
            ("date_from", &query.date_from),
            ("date_to", &query.date_to),
            ("search", &query.search),
        ],
    );
    let view = PaymentsPage {
        layout: Layout::new("Payment Monitoring", "payments", &auth),
        payments,
        stats,
        pager,
        filters: &query,
    };
    Ok(state.views.render("payments", &view)?)
}

// ----------------------------------------------------------------------------
// Locator
// ----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocatorQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub price_min: String,
    #[serde(default)]
    pub price_max: String,
    #[serde(default)]
    pub sort_by: String,
}

impl LocatorQuery {
    fn filter(&self) -> LocatorFilter {
        let price = |raw: &str| Decimal::from_str(raw.trim()).ok();
        LocatorFilter::new(
            Some(self.search.clone()),
            price(&self.price_min),
            price(&self.price_max),
            SortBy::parse(Some(self.sort_by.as_str())),
        )
    }
}

#[derive(Serialize)]
struct LocatorPage<'a> {
    #[serde(flatten)]
    layout: Layout<'a>,
    houses: Vec<HouseListing>,
    stats: BoardingHouseStats,
    filters: &'a LocatorQuery,
}

/// GET /locator?search&price_min&price_max&sort_by
pub async fn locator_page(
    State(state): State<AppState>,
    auth: RequireAdmin,
    Query(mut query): Query<LocatorQuery>,
) -> Result<Html<String>, ApiError> {
    let filter = query.filter();
    query.sort_by = filter.sort_by.as_str().to_string();

    let houses = state.services.houses.verified_houses(&filter).await?;
    let stats = state.services.houses.stats().await?;

    let view = LocatorPage {
        layout: Layout::new("Boarding House Locator", "locator", &auth),
        houses,
        stats,
        filters: &query,
    };
    Ok(state.views.render("locator", &view)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pager_window_and_query_string() {
        let info = PaginationInfo::new(95, PageRequest::new(5, 10));
        let pager = Pager::new(info, &[("search", "dorm & co"), ("status", "")]);

        let numbers: Vec<i64> = pager.links.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6, 7]);
        assert!(pager.links[2].active);
        assert_eq!(pager.prev_href.as_deref(), Some("?page=4&search=dorm+%26+co"));
        assert_eq!(pager.next_href.as_deref(), Some("?page=6&search=dorm+%26+co"));
    }

    #[test]
    fn test_pager_near_edges() {
        let pager = Pager::new(PaginationInfo::new(25, PageRequest::new(1, 10)), &[]);
        let numbers: Vec<i64> = pager.links.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(pager.prev_href, None);
        assert_eq!(pager.next_href.as_deref(), Some("?page=2"));
    }

    #[test]
    fn test_empty_listing_has_no_links() {
        let pager = Pager::new(PaginationInfo::new(0, PageRequest::default()), &[]);
        assert!(pager.links.is_empty());
    }

    #[test]
    fn test_locator_query_drops_sentinels() {
        let query = LocatorQuery {
            search: String::new(),
            price_min: "0".into(),
            price_max: "999999".into(),
            sort_by: "bogus".into(),
        };
        assert_eq!(query.filter(), LocatorFilter::default());
    }

    #[test]
    fn test_pager_beyond_last_page() {
        let page = page_number(Some("9223372036854775807"));
        let pager = Pager::new(PaginationInfo::new(5, PageRequest::new(page, 10)), &[]);
        assert!(pager.links.is_empty());
        assert_eq!(pager.next_href, None);
        assert_eq!(pager.prev_href.as_deref(), Some("?page=9223372036854775806"));
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(page_number(Some("3")), 3);
        assert_eq!(page_number(Some("x")), 1);
        assert_eq!(page_number(None), 1);
    }
}
