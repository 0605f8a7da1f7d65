//! Status endpoint handlers

use crate::{
    error::{HealthError, Result},
    health::OverallStatus,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

pub async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    info!("Status requested - running health checks");

    let report = state.checker.check_all().await;

    let status_code = match report.status {
        OverallStatus::Ok => StatusCode::OK,
        OverallStatus::PartiallyAvailable => {
            warn!("Service is partially available");
            StatusCode::OK
        }
        OverallStatus::Unavailable => {
            warn!("Service is unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status_code, Json(report))
}

pub async fn handle_component_status(
    State(state): State<AppState>,
    Path(component): Path<String>,
) -> Result<impl IntoResponse> {
    info!("Status requested for component '{}'", component);

    let result = state
        .checker
        .check_component(&component)
        .await
        .ok_or_else(|| HealthError::NotFound(format!("Component '{}' not found", component)))?;

    let status_code = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status_code, Json(result)))
}
