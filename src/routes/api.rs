// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::db::JourneyCursor;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::badge::badges_with_status;
use crate::models::journey::{is_valid_journey_id, new_journey_id};
use crate::models::{BadgeSummary, Journey, TransportMode, UserProfile};
use crate::routes::public::check_distance;
use crate::services::emissions;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Number of profiles on the leaderboard.
pub const LEADERBOARD_SIZE: u32 = 20;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/journeys", get(list_journeys).post(create_journey))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/leaderboard", get(get_leaderboard))
        .route("/badges", get(get_badges))
}

// ─── Profile ─────────────────────────────────────────────────

/// Get the caller's profile, creating it on first access.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    Ok(Json(state.db.get_or_init_profile(&user.seed()).await?))
}

#[derive(Deserialize, Validate)]
struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    name: String,
}

/// Rename the caller's profile.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let Json(mut request) = payload?;
    request.name = request.name.trim().to_string();
    request.validate()?;

    tracing::debug!(user_id = %user.user_id, "Updating profile name");

    let profile = state
        .db
        .update_profile_name(&user.seed(), &request.name)
        .await?;
    Ok(Json(profile))
}

// ─── Journeys ────────────────────────────────────────────────

/// Completed journey as submitted by the app.
///
/// Client-side `co2Grams`/`co2Saved` values are ignored; the server
/// recomputes them from `distance` and `mode`.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateJourneyRequest {
    #[validate(length(min = 1, max = 200))]
    from: String,
    #[validate(length(min = 1, max = 200))]
    to: String,
    distance: f64,
    mode: String,
    /// Minutes
    #[validate(range(min = 0.0))]
    duration: f64,
}

/// Record a completed journey and update the caller's totals and badges.
async fn create_journey(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateJourneyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Journey>)> {
    let Json(request) = payload?;
    request.validate()?;

    let distance = check_distance(request.distance)?;
    if distance == 0.0 {
        return Err(AppError::BadRequest(
            "journey distance must be greater than 0".to_string(),
        ));
    }
    if !request.duration.is_finite() {
        return Err(AppError::BadRequest("duration must be finite".to_string()));
    }
    let mode = request
        .mode
        .parse::<TransportMode>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created_at = chrono::Utc::now();
    let id = new_journey_id(created_at)
        .map_err(|_| anyhow::anyhow!("System random number generator failed"))?;
    let result = emissions::emissions(distance, mode);

    let journey = Journey {
        id,
        user_id: user.user_id.clone(),
        from: request.from,
        to: request.to,
        distance,
        mode,
        co2_grams: result.co2_grams,
        co2_saved: result.saved_grams,
        duration: request.duration,
        created_at,
    };

    let profile = state.db.record_journey(&user.seed(), &journey).await?;

    tracing::info!(
        user_id = %user.user_id,
        journey_id = %journey.id,
        mode = %mode,
        distance,
        co2_saved = journey.co2_saved,
        badges = profile.badges.len(),
        "Journey created"
    );

    Ok((StatusCode::CREATED, Json(journey)))
}

#[derive(Deserialize)]
struct JourneysQuery {
    /// Cursor for forward pagination (opaque token).
    cursor: Option<String>,
    /// Items per page
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    20
}

const MAX_LIMIT: u32 = 100;

fn parse_cursor(cursor: Option<&str>) -> Result<Option<JourneyCursor>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let journey_id = String::from_utf8(decoded).map_err(|_| invalid_cursor())?;

            if !is_valid_journey_id(&journey_id) {
                return Err(invalid_cursor());
            }

            Ok(JourneyCursor { journey_id })
        })
        .transpose()
}

fn encode_cursor(cursor: &JourneyCursor) -> String {
    URL_SAFE_NO_PAD.encode(&cursor.journey_id)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct JourneysResponse {
    pub journeys: Vec<Journey>,
    pub next_cursor: Option<String>,
}

/// The caller's journeys, newest first.
async fn list_journeys(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<JourneysQuery>,
) -> Result<Json<JourneysResponse>> {
    tracing::debug!(
        user_id = %user.user_id,
        cursor = ?params.cursor,
        limit = params.limit,
        "Fetching journeys"
    );

    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_LIMIT);
    let cursor = parse_cursor(params.cursor.as_deref())?;

    // Fetch one extra item to determine if another page is available.
    let fetch_limit = limit.saturating_add(1);
    let mut journeys = state
        .db
        .list_journeys(&user.user_id, cursor.as_ref(), fetch_limit)
        .await?;

    let has_more = journeys.len() > limit as usize;
    if has_more {
        journeys.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        journeys.last().map(|j| {
            encode_cursor(&JourneyCursor {
                journey_id: j.id.clone(),
            })
        })
    } else {
        None
    };

    Ok(Json(JourneysResponse {
        journeys,
        next_cursor,
    }))
}

// ─── Leaderboard & Badges ────────────────────────────────────

/// Top profiles by CO₂ saved.
async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserProfile>>> {
    Ok(Json(state.db.leaderboard(LEADERBOARD_SIZE).await?))
}

/// Badge catalog with the caller's earned flags.
async fn get_badges(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BadgeSummary>>> {
    let earned = state
        .db
        .get_profile(&user.user_id)
        .await?
        .map(|p| p.badges)
        .unwrap_or_default();

    Ok(Json(badges_with_status(&earned)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let cursor = JourneyCursor {
            journey_id: "1704103200123_0a1b2c3d".to_string(),
        };

        let encoded = encode_cursor(&cursor);
        let decoded = parse_cursor(Some(&encoded)).unwrap().unwrap();

        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_cursor_rejects_invalid_input() {
        let err = parse_cursor(Some("not base64!")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        // Valid base64, but not a journey id
        let err = parse_cursor(Some(&URL_SAFE_NO_PAD.encode("hello"))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        assert!(parse_cursor(None).unwrap().is_none());
    }
}
