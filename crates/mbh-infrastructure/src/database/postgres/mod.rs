//! PostgreSQL repository implementations

pub mod activity_log_repo_impl;
pub mod admin_repo_impl;
pub mod boarding_house_repo_impl;
pub mod landlord_repo_impl;
pub mod payment_repo_impl;

pub use activity_log_repo_impl::PgActivityLogRepository;
pub use admin_repo_impl::PgAdminRepository;
pub use boarding_house_repo_impl::PgBoardingHouseRepository;
pub use landlord_repo_impl::PgLandlordRepository;
pub use payment_repo_impl::PgPaymentRepository;
