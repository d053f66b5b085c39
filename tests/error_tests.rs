// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AppError to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use green_munster::error::AppError;

mod common;
use common::body_json;

#[tokio::test]
async fn test_upstream_error_keeps_provider_status() {
    let response = AppError::Upstream {
        status: 429,
        message: "Too many requests".to_string(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert_eq!(body["providerStatus"], 429);
    assert_eq!(body["providerMessage"], "Too many requests");
}

#[tokio::test]
async fn test_upstream_error_with_invalid_status_is_bad_gateway() {
    let response = AppError::Upstream {
        status: 42,
        message: "???".to_string(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let response = AppError::Database("connection reset by peer".to_string()).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_bad_request_includes_details() {
    let response = AppError::BadRequest("distance must be positive".to_string()).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["details"], "distance must be positive");
}

#[tokio::test]
async fn test_internal_error_from_anyhow() {
    let err: AppError = anyhow::anyhow!("boom").into();
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
}
