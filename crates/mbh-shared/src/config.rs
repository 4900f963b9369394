//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::constants::{
    DEFAULT_PAGE_SIZE, DEFAULT_SESSION_TTL_SECONDS, MAX_PAGE_SIZE, SESSION_COOKIE_NAME,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub page_size: u32,
    pub recent_activity_limit: i64,
    pub revenue_months: i32,
    pub nearby_radius_km: f64,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "mbh-server")?
            .set_default("app.static_dir", "static/assets")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("session.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.secure_cookie", false)?
            .set_default("dashboard.page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("dashboard.recent_activity_limit", 10)?
            .set_default("dashboard.revenue_months", 12)?
            .set_default("dashboard.nearby_radius_km", 10.0)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        info!(env = %settings.app.env, port = settings.app.port, "Configuration loaded");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::InvalidConfig("database.url must be set".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections exceeds database.max_connections".into(),
            ));
        }
        if self.session.ttl_seconds <= 0 {
            return Err(AppError::InvalidConfig("session.ttl_seconds must be positive".into()));
        }
        if self.dashboard.page_size == 0 || self.dashboard.page_size > MAX_PAGE_SIZE {
            return Err(AppError::InvalidConfig(format!(
                "dashboard.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}
