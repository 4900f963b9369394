//! Page arithmetic shared by every paginated listing.

use serde::{Deserialize, Serialize};

use mbh_shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Page is at least 1; limit is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, i64::from(MAX_PAGE_SIZE)),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total_records: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl PaginationInfo {
    pub fn new(total_records: i64, page: PageRequest) -> Self {
        let total_records = total_records.max(0);
        let total_pages = (total_records + page.limit - 1) / page.limit;
        let has_next = page.page < total_pages;
        let has_prev = page.page > 1;

        Self {
            total_records,
            total_pages,
            current_page: page.page,
            limit: page.limit,
            has_next,
            has_prev,
            next_page: has_next.then(|| page.page + 1),
            prev_page: has_prev.then(|| page.page - 1),
        }
    }
}
