use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    Provider(String),
}

/// Failure body of the dispatch contract: `{"success": false, "message": ...}`.
#[derive(Serialize)]
struct FailureResponse {
    success: bool,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            AppError::Provider("Error sending push notification".to_string())
        } else {
            AppError::Provider(message)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, client_message, log_message) = match &self {
            AppError::Config(e) => {
                let log_msg = e.to_string();
                let client_msg = if is_production() {
                    "Configuration error".to_string()
                } else {
                    log_msg.clone()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", client_msg, log_msg)
            }
            AppError::Credentials(msg) => {
                let client_msg = if is_production() {
                    "Credential error".to_string()
                } else {
                    msg.clone()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, "CREDENTIAL_ERROR", client_msg, msg.clone())
            }
            AppError::InvalidPayload(_) => {
                let msg = self.to_string();
                (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", msg.clone(), msg)
            }
            AppError::MissingFields(_) => {
                let msg = self.to_string();
                (StatusCode::BAD_REQUEST, "MISSING_FIELDS", msg.clone(), msg)
            }
            // Provider messages pass through verbatim, per the dispatch contract
            AppError::Provider(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_ERROR",
                msg.clone(),
                msg.clone(),
            ),
        };

        // Always log the detailed error server-side
        tracing::error!(
            code = %code,
            status = %status.as_u16(),
            message = %log_message,
            "Dispatch error"
        );

        let body = FailureResponse {
            success: false,
            message: client_message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
