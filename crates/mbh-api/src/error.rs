use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use mbh_core::DomainError;

/// Errors surfaced by the page routes. The AJAX endpoint never returns these;
/// it reports failures inside its JSON envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Login required")]
    LoginRequired,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::LoginRequired => return Redirect::to("/login").into_response(),
            ApiError::Domain(e) if e.is_server_error() => {
                tracing::error!("Page failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {}", e))
            }
            ApiError::Domain(DomainError::LandlordNotFound)
            | ApiError::Domain(DomainError::PaymentNotFound)
            | ApiError::Domain(DomainError::BoardingHouseNotFound)
            | ApiError::Domain(DomainError::AdminNotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            ApiError::Domain(e) => {
                tracing::warn!("Bad request: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, message).into_response()
    }
}
