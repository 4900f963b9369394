//! # MBH Infrastructure
//!
//! PostgreSQL implementations of the core repository traits (adapters).

pub mod database;

pub use database::{
    create_pool, ping, run_migrations, PgActivityLogRepository, PgAdminRepository,
    PgBoardingHouseRepository, PgLandlordRepository, PgPaymentRepository,
};
