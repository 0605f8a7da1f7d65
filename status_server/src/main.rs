//! Example service exposing its dependency health on a status endpoint

use anyhow::Result;
use health_core::{
    create_app, run_server, AppState, CheckConfig, CheckContext, HealthChecker, HealthConfig,
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = HealthConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Status endpoint: http://{}{}", config.bind_address(), config.server.path);

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let mut registry = config.build_registry()?;

    registry.register(
        CheckConfig::new("some-custom-check-fail", |_ctx: CheckContext| async {
            Err::<(), _>(anyhow::anyhow!("failed during custom health check"))
        })
        .with_timeout(Duration::from_secs(5))
        .skip_on_err(true),
    )?;

    registry.register(CheckConfig::new(
        "some-custom-check-success",
        |_ctx: CheckContext| async { anyhow::Ok(()) },
    ))?;

    info!("Registered {} health checks", registry.len());

    let checker = HealthChecker::new(registry).apply_config(&config);

    let app = create_app(AppState::new(checker), &config.server.path);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},health_core={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
