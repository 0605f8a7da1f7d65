use crate::handlers::health::{handle_component_status, handle_status};
use crate::AppState;
use axum::{routing::get, Router};

/// Mounts the aggregated report at `path` and single checks at `path/:name`.
/// A path made only of slashes mounts the report at the root.
pub fn create_routes(path: &str) -> Router<AppState> {
    let base = path.trim_end_matches('/');
    let status_route = if base.is_empty() { "/" } else { base };

    Router::new()
        .route(status_route, get(handle_status))
        .route(&format!("{}/:name", base), get(handle_component_status))
}
