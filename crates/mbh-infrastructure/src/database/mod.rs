//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;
pub mod sql;

pub use connection::{create_pool, ping, run_migrations};
pub use postgres::{
    PgActivityLogRepository, PgAdminRepository, PgBoardingHouseRepository, PgLandlordRepository,
    PgPaymentRepository,
};
