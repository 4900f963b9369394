//! # MBH Shared
//! 
//! Shared configuration, telemetry, constants and display helpers for the
//! boarding house admin dashboard.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
