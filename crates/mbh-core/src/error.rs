//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Admin not found")]
    AdminNotFound,

    #[error("Landlord not found")]
    LandlordNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Boarding house not found")]
    BoardingHouseNotFound,

    /// A targeted update matched no row.
    #[error("{0}")]
    ActionFailed(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Failures the caller cannot act on, reported as server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            DomainError::PasswordHashError(_)
                | DomainError::ExportError(_)
                | DomainError::DatabaseError(_)
                | DomainError::InternalError(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
