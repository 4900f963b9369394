//! Session middleware
//!
//! Resolves (or starts) the server-side session for every request and
//! exposes it to handlers as a [`RequestContext`].

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{
        header::{COOKIE, SET_COOKIE, USER_AGENT},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, SameSite};
use tracing::{debug, warn};

use mbh_shared::config::SessionSettings;
use mbh_shared::ClientInfo;

use crate::extract::RequestContext;
use crate::state::AppState;

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let settings = &state.config.session;

    // 1. Resume the cookie's session, or start a fresh one
    let resumed = session_id(request.headers(), &settings.cookie_name)
        .and_then(|id| state.sessions.touch(&id).ok());
    let is_new = resumed.is_none();
    let session = resumed.unwrap_or_else(|| state.sessions.create());
    if is_new {
        debug!("Started new session");
    }

    // 2. Hand the request-scoped context to the handlers
    let context = RequestContext {
        session_id: session.id.clone(),
        csrf_token: session.csrf_token.clone(),
        admin: session.user.clone(),
        client: client_info(&request),
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    // 3. Issue the cookie unless the handler already replaced it
    if is_new && !response.headers().contains_key(SET_COOKIE) {
        append_session_cookie(response.headers_mut(), settings, &session.id);
    }

    response
}

/// Reads the session id from the `Cookie` header.
pub fn session_id(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
}

pub fn append_session_cookie(headers: &mut HeaderMap, settings: &SessionSettings, id: &str) {
    let cookie = Cookie::build((settings.cookie_name.clone(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .build();
    append_cookie(headers, &cookie);
}

pub fn append_removal_cookie(headers: &mut HeaderMap, settings: &SessionSettings) {
    let mut cookie = Cookie::build((settings.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    append_cookie(headers, &cookie);
}

fn append_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => warn!("Failed to encode session cookie: {}", e),
    }
}

fn client_info(request: &Request) -> ClientInfo {
    let ip_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    ClientInfo::new(ip_address, user_agent)
}
