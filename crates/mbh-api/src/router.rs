//! Route table

use axum::{
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::middleware::session_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Probes stay outside the session layer
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    let app_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/dashboard", get(handlers::pages::dashboard_page))
        .route("/landlords", get(handlers::pages::landlords_page))
        .route("/payments", get(handlers::pages::payments_page))
        .route("/locator", get(handlers::pages::locator_page))
        .route(
            "/ajax",
            get(handlers::ajax::ajax_handler).post(handlers::ajax::ajax_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware));

    Router::new()
        .merge(public_routes)
        .merge(app_routes)
        .nest_service("/assets", ServeDir::new(&state.config.app.static_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .with_state(state)
}
