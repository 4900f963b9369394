use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use mbh_api::{build_router, views::Views, AppState, Services};
use mbh_infrastructure::{
    create_pool, run_migrations, PgActivityLogRepository, PgAdminRepository,
    PgBoardingHouseRepository, PgLandlordRepository, PgPaymentRepository,
};
use mbh_security::SessionStore;
use mbh_shared::config::AppConfig;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    mbh_shared::telemetry::init_telemetry();

    info!("MBH admin server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.is_production() && !config.session.secure_cookie {
        warn!("Session cookie is not marked Secure in production");
    }

    // Connect to Database
    let pool = create_pool(&config.database).await?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    // Repositories and services
    let services = Services::new(
        Arc::new(PgAdminRepository::new(pool.clone())),
        Arc::new(PgLandlordRepository::new(pool.clone())),
        Arc::new(PgBoardingHouseRepository::new(pool.clone())),
        Arc::new(PgPaymentRepository::new(pool.clone())),
        Arc::new(PgActivityLogRepository::new(pool.clone())),
        &config.dashboard,
    );

    let sessions = Arc::new(SessionStore::new(config.session.ttl_seconds));
    spawn_session_sweeper(sessions.clone());

    // Create App State
    let state = AppState {
        db: pool,
        config: config.clone(),
        services,
        sessions,
        views: Arc::new(Views::new()?),
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

fn spawn_session_sweeper(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                debug!(purged, active = sessions.len(), "Expired sessions removed");
            }
        }
    });
}
