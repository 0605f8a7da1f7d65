//! Health-check aggregation: register dependency checks, run them
//! concurrently under per-check timeouts and serve the combined verdict.

pub mod checks;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod monitoring;

pub use checks::{HttpCheck, HttpCheckConfig, MongoCheck, SqlCheck};
pub use crate::config::HealthConfig;
pub use error::{HealthError, Result};
pub use handlers::create_routes;
pub use health::{
    AggregatedReport, Check, CheckConfig, CheckContext, CheckResult, CheckStatus, Component,
    HealthChecker, OverallStatus, Registry,
};
pub use monitoring::{SystemMetrics, SystemMonitor};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<HealthChecker>,
}

impl AppState {
    pub fn new(checker: HealthChecker) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }
}

pub fn create_app(state: AppState, path: &str) -> Router {
    middleware::logging::with_request_logging(create_routes(path)).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting status server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
