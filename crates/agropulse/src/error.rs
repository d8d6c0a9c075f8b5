use crate::advisory::AdvisoryError;
use crate::config::ConfigError;
use crate::market::MarketError;
use crate::profile::ProfileStoreError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

const UPSTREAM_FAILURE_MESSAGE: &str =
    "advisor service is temporarily unavailable, please try again later";

/// Rejected caller input. Surfaced as a 4xx response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Validation(ValidationError),
    Advisory(AdvisoryError),
    Market(MarketError),
    Profile(ProfileStoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Advisory(AdvisoryError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Advisory(AdvisoryError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            AppError::Market(err) if err.is_caller_error() => StatusCode::BAD_REQUEST,
            AppError::Profile(ProfileStoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
            AppError::Advisory(AdvisoryError::MissingCredential)
            | AppError::Market(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Profile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Advisory(err) => write!(f, "{}", err),
            AppError::Market(err) => write!(f, "{}", err),
            AppError::Profile(err) => write!(f, "profile store error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Advisory(err) => Some(err),
            AppError::Market(err) => Some(err),
            AppError::Profile(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Advisory(AdvisoryError::Upstream(err)) => {
                tracing::error!(error = %err, "advice generation failed upstream");
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                } else {
                    tracing::warn!(error = %other, "request rejected");
                }
                other.to_string()
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AdvisoryError> for AppError {
    fn from(value: AdvisoryError) -> Self {
        Self::Advisory(value)
    }
}

impl From<MarketError> for AppError {
    fn from(value: MarketError) -> Self {
        Self::Market(value)
    }
}

impl From<ProfileStoreError> for AppError {
    fn from(value: ProfileStoreError) -> Self {
        Self::Profile(value)
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(value: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(ValidationError::new("body", value.body_text()))
    }
}
