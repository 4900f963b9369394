//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mbh_api=debug,mbh_infrastructure=debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_target(true))
        .init();
}
