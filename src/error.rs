// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The weather provider answered with a non-success status.
    #[error("Weather provider error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The weather provider could not be reached or sent an unreadable body.
    #[error("Weather provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Service not configured: {0}")]
    NotConfigured(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_message: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, details: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            details,
            provider_status: None,
            provider_message: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("unauthorized", None),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("invalid_token", None),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("not_found", Some(msg.clone())),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("bad_request", Some(msg.clone())),
            ),
            AppError::Upstream { status, message } => {
                tracing::warn!(status, message = %message, "Weather provider error");
                // Pass the provider's status through; fall back to 502 if it is not a valid code.
                let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    code,
                    ErrorResponse {
                        provider_status: Some(*status),
                        provider_message: Some(message.clone()),
                        ..ErrorResponse::new("Failed to fetch weather data", None)
                    },
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::warn!(error = %msg, "Weather provider unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("Failed to fetch weather data", Some(msg.clone())),
                )
            }
            AppError::NotConfigured(msg) => {
                tracing::error!(error = %msg, "Service not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(msg, None),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("database_error", None),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal_error", None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
