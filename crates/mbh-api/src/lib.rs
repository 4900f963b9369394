//! # MBH API
//!
//! HTTP surface of the admin dashboard: router, session middleware,
//! the AJAX command dispatcher and the server-rendered pages.

pub mod command;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod views;

pub use router::build_router;
pub use state::{AppState, Services};
