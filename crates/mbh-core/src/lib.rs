//! # MBH Core
//!
//! Domain entities, typed query filters, repository traits and the services
//! that drive the boarding house admin dashboard.

pub mod domain;
pub mod error;
pub mod query;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
