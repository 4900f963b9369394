// ============================================================================
// MBH API - AJAX Dispatcher
// File: crates/mbh-api/src/handlers/ajax.rs
// ============================================================================
//! Single endpoint behind every dashboard interaction

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::Method,
    Form,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use mbh_core::domain::Actor;
use mbh_core::DomainError;
use mbh_security::validate_csrf_token;

use crate::command::{AjaxAction, AjaxCommand, AjaxParams, CommandDefaults};
use crate::extract::RequestContext;
use crate::response::AjaxResponse;
use crate::state::{AppState, Services};

/// GET and POST /ajax
pub async fn ajax_handler(
    State(state): State<AppState>,
    context: RequestContext,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> AjaxResponse {
    let body = match form {
        Ok(Form(body)) if method == Method::POST => body,
        _ => HashMap::new(),
    };
    let params = AjaxParams::merge(query, body);

    // 1. CSRF on POST and on every mutation, whatever the method
    let mutation = params
        .action()
        .and_then(AjaxAction::from_str)
        .is_some_and(|action| action.is_mutation());
    let needs_token = method == Method::POST || mutation;
    if needs_token && !validate_csrf_token(params.csrf_token(), &context.csrf_token) {
        warn!(action = params.action().unwrap_or_default(), "Rejected AJAX request: invalid CSRF token");
        return AjaxResponse::error("Invalid CSRF token");
    }

    // 2. Closed action set
    let Some(action) = params.action().and_then(AjaxAction::from_str) else {
        warn!(action = params.action().unwrap_or_default(), "Rejected AJAX request: invalid action");
        return AjaxResponse::error("Invalid action");
    };

    // 3. Session gate, checked before any service call
    let Some(actor) = context.actor() else {
        warn!(action = action.as_str(), "Rejected AJAX request: no admin session");
        return if action.is_protected() {
            AjaxResponse::error("Unauthorized access")
        } else {
            AjaxResponse::error("Unauthorized")
        };
    };

    let defaults = CommandDefaults {
        page_size: state.config.dashboard.page_size,
        nearby_radius_km: state.config.dashboard.nearby_radius_km,
    };
    let result = match AjaxCommand::parse(action, &params, defaults) {
        Ok(command) => dispatch(&state.services, command, &actor).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            if action.is_mutation() {
                info!(action = action.as_str(), admin_id = actor.admin_id, "AJAX action completed");
            } else {
                debug!(action = action.as_str(), "AJAX action completed");
            }
            response
        }
        Err(e) => failure(action, e),
    }
}

/// Runs one command against the controller layer.
pub async fn dispatch(
    services: &Services,
    command: AjaxCommand,
    actor: &Actor,
) -> Result<AjaxResponse, DomainError> {
    let response = match command {
        AjaxCommand::GetDashboardData => {
            let data = services.dashboard.dashboard_data().await?;
            AjaxResponse::success(to_json(&data)?)
        }
        AjaxCommand::GetLandlords { filter, page } => {
            let (landlords, pagination) = services.landlords.list(&filter, page).await?;
            AjaxResponse::success(json!({
                "landlords": to_json(&landlords)?,
                "pagination": to_json(&pagination)?,
            }))
        }
        AjaxCommand::GetLandlordDetails { id } => {
            let details = services.landlords.details(id).await?;
            AjaxResponse::success(to_json(&details)?)
        }
        AjaxCommand::VerifyLandlord { id, plan } => {
            services.landlords.verify(actor, id, &plan).await?;
            AjaxResponse::message("Landlord verified successfully")
        }
        AjaxCommand::RejectLandlord { id } => {
            services.landlords.reject(actor, id).await?;
            AjaxResponse::message("Landlord rejected")
        }
        AjaxCommand::SuspendLandlord { id } => {
            services.landlords.suspend(actor, id).await?;
            AjaxResponse::message("Landlord suspended successfully")
        }
        AjaxCommand::ActivateLandlord { id } => {
            services.landlords.activate(actor, id).await?;
            AjaxResponse::message("Landlord activated successfully")
        }
        AjaxCommand::GetPayments { filter, page } => {
            let (payments, pagination) = services.payments.list(&filter, page).await?;
            AjaxResponse::success(json!({
                "payments": to_json(&payments)?,
                "pagination": to_json(&pagination)?,
            }))
        }
        AjaxCommand::GetPaymentDetails { id } => {
            let payment = services.payments.details(id).await?;
            AjaxResponse::success(json!({ "payment": to_json(&payment)? }))
        }
        AjaxCommand::UpdatePaymentStatus { id, status, notes } => {
            services.payments.update_status(actor, id, status, &notes).await?;
            AjaxResponse::message("Payment status updated successfully")
        }
        AjaxCommand::GetVerifiedHouses { filter } => {
            let houses = services.houses.verified_houses(&filter).await?;
            AjaxResponse::success(json!({ "houses": to_json(&houses)? }))
        }
        AjaxCommand::GetHouseDetails { id } => {
            let house = services.houses.details(id).await?;
            AjaxResponse::success(json!({ "house": to_json(&house)? }))
        }
        AjaxCommand::VerifyHouse { id } => {
            services.houses.verify(actor, id).await?;
            AjaxResponse::message("Boarding house verified successfully")
        }
        AjaxCommand::UnverifyHouse { id } => {
            services.houses.unverify(actor, id).await?;
            AjaxResponse::message("Boarding house unverified")
        }
        AjaxCommand::ExportHouses => {
            let export = services.houses.export_verified(Utc::now().date_naive()).await?;
            AjaxResponse::success(to_json(&export)?)
        }
        AjaxCommand::GetNearbyHouses { query } => {
            let houses = services.houses.nearby(&query).await?;
            AjaxResponse::success(json!({ "houses": to_json(&houses)? }))
        }
    };
    Ok(response)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::InternalError(e.to_string()))
}

fn failure(action: AjaxAction, e: DomainError) -> AjaxResponse {
    if e.is_server_error() {
        error!(action = action.as_str(), "AJAX action failed: {}", e);
        AjaxResponse::error(format!("Server error: {}", e))
    } else {
        debug!(action = action.as_str(), "AJAX action refused: {}", e);
        AjaxResponse::error(e.to_string())
    }
}
