//! End-to-end checks of the route table against mocked repositories.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use mbh_api::{build_router, views::Views, AppState, Services};
use mbh_core::domain::Admin;
use mbh_core::repositories::{
    MockActivityLogRepository, MockAdminRepository, MockBoardingHouseRepository,
    MockLandlordRepository, MockPaymentRepository,
};
use mbh_security::{PasswordService, Session, SessionStore, SessionUser};
use mbh_shared::config::{
    AppConfig, AppSettings, DashboardSettings, DatabaseSettings, SessionSettings,
};

const COOKIE: &str = "mbh_session";

fn config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            env: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            name: "My Boarding House Admin".into(),
            static_dir: "static/assets".into(),
        },
        database: DatabaseSettings {
            url: "postgres://localhost/mbh_test".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            run_migrations: false,
        },
        session: SessionSettings {
            cookie_name: COOKIE.into(),
            ttl_seconds: 3600,
            secure_cookie: false,
        },
        dashboard: DashboardSettings {
            page_size: 10,
            recent_activity_limit: 10,
            revenue_months: 6,
            nearby_radius_km: 10.0,
        },
    }
}

#[derive(Default)]
struct Mocks {
    admins: MockAdminRepository,
    landlords: MockLandlordRepository,
    houses: MockBoardingHouseRepository,
    payments: MockPaymentRepository,
    activity: MockActivityLogRepository,
}

fn app(mocks: Mocks) -> (Router, Arc<SessionStore>) {
    let config = config();
    let db = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    let services = Services::new(
        Arc::new(mocks.admins),
        Arc::new(mocks.landlords),
        Arc::new(mocks.houses),
        Arc::new(mocks.payments),
        Arc::new(mocks.activity),
        &config.dashboard,
    );
    let sessions = Arc::new(SessionStore::new(config.session.ttl_seconds));
    let state = AppState {
        db,
        config,
        services,
        sessions: sessions.clone(),
        views: Arc::new(Views::new().expect("templates compile")),
    };
    (build_router(state), sessions)
}

fn admin_user() -> SessionUser {
    SessionUser {
        id: 1,
        username: "admin".into(),
        email: "admin@myboardinghouse.com".into(),
        full_name: "System Administrator".into(),
        role: "admin".into(),
    }
}

fn logged_in(sessions: &SessionStore) -> Session {
    let anonymous = sessions.create();
    sessions.login(&anonymous.id, admin_user()).expect("session exists")
}

fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(id) = cookie {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE, id));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(id) = cookie {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE, id));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_health_reports_version() {
    let (app, _) = app(Mocks::default());
    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let (app, _) = app(Mocks::default());
    let response = app.oneshot(get("/landlords", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_login_page_renders_form() {
    let (app, _) = app(Mocks::default());
    let response = app.oneshot(get("/login", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains(r#"action="/login""#));
}

#[tokio::test]
async fn test_login_page_redirects_logged_in_admin() {
    let (app, sessions) = app(Mocks::default());
    let session = logged_in(&sessions);
    let response = app.oneshot(get("/login", Some(&session.id))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_with_empty_fields() {
    let (app, _) = app(Mocks::default());
    let response = app
        .oneshot(form_post("/login", None, "username=&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("Please enter both username and password"));
}

#[tokio::test]
async fn test_login_rotates_session() {
    let password_hash = PasswordService::hash("admin123").unwrap();
    let mut mocks = Mocks::default();
    mocks
        .admins
        .expect_find_active_by_login()
        .withf(|login| login.to_string() == "admin")
        .returning(move |_| {
            Ok(Some(Admin {
                id: 1,
                username: "admin".into(),
                email: "admin@myboardinghouse.com".into(),
                password_hash: password_hash.clone(),
                full_name: "System Administrator".into(),
                role: "admin".into(),
                is_active: true,
                created_at: Utc::now(),
                updated_at: None,
            }))
        });
    mocks.activity.expect_record().times(1).returning(|_| Ok(()));

    let (app, sessions) = app(mocks);
    let anonymous = sessions.create();
    let response = app
        .oneshot(form_post(
            "/login",
            Some(&anonymous.id),
            "username=admin&password=admin123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{}=", COOKIE)));
    assert!(!cookie.contains(&anonymous.id));
    assert!(sessions.get(&anonymous.id).is_err());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let password_hash = PasswordService::hash("admin123").unwrap();
    let mut mocks = Mocks::default();
    mocks.admins.expect_find_active_by_login().returning(move |_| {
        Ok(Some(Admin {
            id: 1,
            username: "admin".into(),
            email: "admin@myboardinghouse.com".into(),
            password_hash: password_hash.clone(),
            full_name: "System Administrator".into(),
            role: "admin".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }))
    });
    mocks.activity.expect_record().never();

    let (app, _) = app(mocks);
    let response = app
        .oneshot(form_post("/login", None, "username=admin&password=nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("Invalid username or password"));
    assert!(body.contains(r#"value="admin""#));
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let mut mocks = Mocks::default();
    mocks.activity.expect_record().times(1).returning(|_| Ok(()));

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let response = app.oneshot(get("/logout", Some(&session.id))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(sessions.get(&session.id).is_err());
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_ajax_post_without_csrf_token() {
    let (app, sessions) = app(Mocks::default());
    let session = logged_in(&sessions);
    let response = app
        .oneshot(form_post(
            "/ajax",
            Some(&session.id),
            "action=verify_landlord&id=4&csrf_token=forged",
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid CSRF token");
}

#[tokio::test]
async fn test_ajax_unknown_action() {
    let (app, sessions) = app(Mocks::default());
    let session = logged_in(&sessions);
    let response = app
        .oneshot(get("/ajax?action=drop_tables", Some(&session.id)))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid action");
}

#[tokio::test]
async fn test_ajax_requires_session() {
    let mut mocks = Mocks::default();
    mocks.landlords.expect_list().never();

    let (app, _) = app(mocks);
    let response = app
        .oneshot(get("/ajax?action=get_landlords", None))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized access");
}

#[tokio::test]
async fn test_ajax_nearby_without_session() {
    let mut mocks = Mocks::default();
    mocks.houses.expect_nearby().never();

    let (app, _) = app(mocks);
    let response = app
        .oneshot(get(
            "/ajax?action=get_nearby_houses&latitude=10.3&longitude=123.9",
            None,
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_ajax_lists_landlords() {
    let mut mocks = Mocks::default();
    mocks
        .landlords
        .expect_list()
        .withf(|filter, page| filter.search.as_deref() == Some("maria") && page.page == 2)
        .returning(|_, _| Ok(vec![]));
    mocks.landlords.expect_count().returning(|_| Ok(15));

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let body = format!(
        "action=get_landlords&search=maria&page=2&csrf_token={}",
        session.csrf_token
    );
    let response = app
        .oneshot(form_post("/ajax", Some(&session.id), &body))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["landlords"], serde_json::json!([]));
    assert_eq!(body["pagination"]["total_records"], 15);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_ajax_verify_landlord() {
    let mut mocks = Mocks::default();
    mocks
        .landlords
        .expect_update_verification()
        .withf(|id, _| *id == 4)
        .returning(|_, _| Ok(true));
    mocks.activity.expect_record().times(1).returning(|_| Ok(()));

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let body = format!(
        "action=verify_landlord&id=4&subscription_plan=premium&csrf_token={}",
        session.csrf_token
    );
    let response = app
        .oneshot(form_post("/ajax", Some(&session.id), &body))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Landlord verified successfully");
}

#[tokio::test]
async fn test_ajax_reports_failed_update() {
    let mut mocks = Mocks::default();
    mocks.landlords.expect_set_active().returning(|_, _| Ok(false));
    mocks.activity.expect_record().never();

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let body = format!("action=suspend_landlord&id=99&csrf_token={}", session.csrf_token);
    let response = app
        .oneshot(form_post("/ajax", Some(&session.id), &body))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to suspend landlord");
}

#[tokio::test]
async fn test_ajax_get_mutation_requires_csrf_token() {
    let mut mocks = Mocks::default();
    mocks.landlords.expect_set_active().never();
    mocks.activity.expect_record().never();

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let response = app
        .oneshot(get("/ajax?action=suspend_landlord&id=8", Some(&session.id)))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid CSRF token");
}

#[tokio::test]
async fn test_ajax_get_mutation_ignores_token_in_query() {
    let mut mocks = Mocks::default();
    mocks.houses.expect_set_verified().never();

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let uri = format!(
        "/ajax?action=verify_house&id=3&csrf_token={}",
        session.csrf_token
    );
    let response = app.oneshot(get(&uri, Some(&session.id))).await.unwrap();

    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid CSRF token");
}

#[tokio::test]
async fn test_ajax_post_rejects_token_in_query() {
    let mut mocks = Mocks::default();
    mocks.landlords.expect_update_verification().never();

    let (app, sessions) = app(mocks);
    let session = logged_in(&sessions);
    let uri = format!("/ajax?csrf_token={}", session.csrf_token);
    let response = app
        .oneshot(form_post(&uri, Some(&session.id), "action=reject_landlord&id=4"))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid CSRF token");
}
