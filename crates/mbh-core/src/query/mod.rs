//! Typed query inputs: pagination and listing filters.

pub mod filter;
pub mod pagination;

pub use filter::{
    like_pattern, Condition, FilterValue, LandlordFilter, LocatorFilter, NearbyQuery,
    PaymentFilter, Predicates, SortBy,
};
pub use pagination::{PageRequest, PaginationInfo};
