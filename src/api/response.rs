//! Response types for the timeclock API.
//!
//! This module defines the success envelopes, the error response
//! structure and the mapping from engine errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TimeclockError;
use crate::models::SessionStatus;

/// Response body for `GET /attendance/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// The derived session status for today.
    pub status: SessionStatus,
}

/// Response body for the rate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    /// The hourly rate.
    pub rate: Decimal,
}

/// Response body for `DELETE /attendance/records/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A short confirmation message.
    pub message: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unauthorized error response.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Missing or invalid bearer token")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TimeclockError> for ApiErrorResponse {
    fn from(error: TimeclockError) -> Self {
        match error {
            TimeclockError::InvalidTransition { action, message } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_TRANSITION",
                    format!("Cannot apply '{}': {}", action, message),
                    "The action is not legal from the current session state",
                ),
            },
            TimeclockError::NoOpenSession { date } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "NO_OPEN_SESSION",
                    format!("No open session exists for {}", date),
                ),
            },
            TimeclockError::BreakAlreadyActive => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("BREAK_ALREADY_ACTIVE", "A break is already in progress"),
            },
            TimeclockError::NoActiveBreak => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NO_ACTIVE_BREAK", "No break is in progress"),
            },
            TimeclockError::DataIntegrityFault { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "DATA_INTEGRITY_FAULT",
                    "Timestamps violate an integrity invariant",
                    message,
                ),
            },
            TimeclockError::StoreUnavailable { message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORE_UNAVAILABLE",
                    "The record store is unavailable, retry shortly",
                    message,
                ),
            },
            TimeclockError::RecordNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("RECORD_NOT_FOUND", format!("No record with id {}", id)),
            },
            TimeclockError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!("Invalid '{}': {}", field, message)),
            },
            TimeclockError::SettingsNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Settings file not found: {}", path),
                ),
            },
            TimeclockError::SettingsParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
