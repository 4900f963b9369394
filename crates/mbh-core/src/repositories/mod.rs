//! Repository traits (ports)

pub mod activity_log_repository;
pub mod admin_repository;
pub mod boarding_house_repository;
pub mod landlord_repository;
pub mod payment_repository;

pub use activity_log_repository::ActivityLogRepository;
pub use admin_repository::AdminRepository;
pub use boarding_house_repository::BoardingHouseRepository;
pub use landlord_repository::LandlordRepository;
pub use payment_repository::PaymentRepository;

#[cfg(any(test, feature = "mocks"))]
pub use activity_log_repository::MockActivityLogRepository;
#[cfg(any(test, feature = "mocks"))]
pub use admin_repository::MockAdminRepository;
#[cfg(any(test, feature = "mocks"))]
pub use boarding_house_repository::MockBoardingHouseRepository;
#[cfg(any(test, feature = "mocks"))]
pub use landlord_repository::MockLandlordRepository;
#[cfg(any(test, feature = "mocks"))]
pub use payment_repository::MockPaymentRepository;
