// ============================================================================
// MBH API - Auth Handlers
// File: crates/mbh-api/src/handlers/auth.rs
// ============================================================================
//! Login and logout

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use mbh_core::DomainError;

use crate::error::ApiError;
use crate::extract::RequestContext;
use crate::middleware::{append_removal_cookie, append_session_cookie};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Serialize)]
struct LoginPage<'a> {
    error: Option<String>,
    username: &'a str,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    context: RequestContext,
) -> Result<Response, ApiError> {
    if context.admin.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(state.views.render("login", &LoginPage::default())?.into_response())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    context: RequestContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    if context.admin.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return render_login_error(&state, username, "Please enter both username and password".into());
    }

    let admin = match state.services.auth.login(username, &form.password, &context.client).await {
        Ok(admin) => admin,
        Err(e @ DomainError::InvalidCredentials) => {
            return render_login_error(&state, username, e.to_string());
        }
        Err(e) => {
            error!("Login failed: {}", e);
            return render_login_error(&state, username, format!("Server error: {}", e));
        }
    };

    let session = state
        .sessions
        .login(&context.session_id, admin.session_user())
        .map_err(|e| {
            warn!("Session lost during login: {}", e);
            ApiError::InternalError("Session expired, please try again".into())
        })?;

    info!(admin_id = admin.id, "Admin session started");
    let mut headers = HeaderMap::new();
    append_session_cookie(&mut headers, &state.config.session, &session.id);
    Ok((headers, Redirect::to("/dashboard")).into_response())
}

fn render_login_error(state: &AppState, username: &str, message: String) -> Result<Response, ApiError> {
    let page = LoginPage {
        error: Some(message),
        username,
    };
    Ok(state.views.render("login", &page)?.into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, context: RequestContext) -> Response {
    if let Some(actor) = context.actor() {
        state.services.auth.logout(&actor).await;
        info!(admin_id = actor.admin_id, "Admin logged out");
    }
    state.sessions.destroy(&context.session_id);

    let mut headers = HeaderMap::new();
    append_removal_cookie(&mut headers, &state.config.session);
    (headers, Redirect::to("/login")).into_response()
}
