//! # MBH Core - Domain Module
//!
//! Domain entities for the boarding house marketplace.

pub mod activity_log;
pub mod admin;
pub mod boarding_house;
pub mod dashboard;
pub mod landlord;
pub mod payment;

// Re-export all entities and enums
pub use activity_log::{activity_actions, ActivityLog, Actor, NewActivity, UserType};
pub use admin::{Admin, ProfileUpdate};
pub use boarding_house::{
    generate_house_code, BoardingHouse, BoardingHouseStats, BoardingHouseUpdate, HouseListing,
    LandlordContact, NewBoardingHouse,
};
pub use dashboard::{DashboardData, DashboardStats};
pub use landlord::{
    Landlord, LandlordPaymentStatus, LandlordSummary, LandlordUpdate, NewLandlord,
    SubscriptionPlan, VerificationChange, VerificationStatus,
};
pub use payment::{
    HousePayment, MonthlyRevenue, NewPayment, Payment, PaymentDetails, PaymentListing,
    PaymentStats, PaymentStatus, StatsPeriod,
};
