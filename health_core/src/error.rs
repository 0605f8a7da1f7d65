//! Library error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HealthError>;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Health check '{0}' is already registered")]
    DuplicateName(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            HealthError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HealthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            HealthError::DuplicateName(name) => (
                StatusCode::CONFLICT,
                format!("Health check '{}' is already registered", name),
            ),
            HealthError::Config(err) => {
                tracing::error!("Configuration error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string())
            }
            HealthError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            HealthError::JsonError(err) => {
                tracing::error!("JSON error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            HealthError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HealthError::DuplicateName("postgres".to_string());
        assert_eq!(err.to_string(), "Health check 'postgres' is already registered");

        let err = HealthError::Validation("name cannot be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: name cannot be empty");
    }

    #[test]
    fn test_error_status_codes() {
        let response = HealthError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = HealthError::DuplicateName("a".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = HealthError::Other(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
