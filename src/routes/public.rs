// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public routes: emission calculator, route planner, weather, badge catalog.

use crate::error::{AppError, Result};
use crate::models::{
    Advisory, BadgeSummary, TransportMode, WeatherOutlook, WeatherSnapshot, BADGE_CATALOG,
};
use crate::services::{advisor, emissions, Conditions, RouteOption, WeatherQuery};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Public routes (no authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calculate-emissions", post(calculate_emissions))
        .route("/routes/plan", post(plan_routes))
        .route("/weather", get(get_weather))
        .route("/weather/advice", get(get_weather_advice))
        .route("/badges/catalog", get(get_badge_catalog))
}

/// Reject distances JSON can carry but the model cannot use.
pub(crate) fn check_distance(distance: f64) -> Result<f64> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(AppError::BadRequest(
            "distance must be a non-negative number of kilometers".to_string(),
        ));
    }
    Ok(distance)
}

// ─── Emission Calculator ─────────────────────────────────────

#[derive(Deserialize, Validate)]
struct CalculateEmissionsRequest {
    distance: f64,
    #[validate(length(min = 1, max = 32))]
    mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmissionsResponse {
    pub mode: String,
    pub distance: f64,
    pub co2_grams: f64,
    pub co2_kg: f64,
    pub saved_grams: f64,
    pub saved_kg: f64,
}

/// Emissions for one trip. Unknown mode names count as zero-emission.
async fn calculate_emissions(
    payload: std::result::Result<Json<CalculateEmissionsRequest>, JsonRejection>,
) -> Result<Json<EmissionsResponse>> {
    let Json(request) = payload?;
    request.validate()?;
    let distance = check_distance(request.distance)?;

    let result = emissions::emissions_for_mode_name(distance, &request.mode);

    Ok(Json(EmissionsResponse {
        mode: request.mode,
        distance,
        co2_grams: result.co2_grams,
        co2_kg: result.co2_grams / 1000.0,
        saved_grams: result.saved_grams,
        saved_kg: result.saved_grams / 1000.0,
    }))
}

// ─── Route Planner ───────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct PlanRoutesRequest {
    #[validate(length(min = 1, max = 200))]
    from: String,
    #[validate(length(min = 1, max = 200))]
    to: String,
    distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanRoutesResponse {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub routes: Vec<RouteOption>,
}

/// One option per transport mode for a trip, lowest emissions first.
async fn plan_routes(
    payload: std::result::Result<Json<PlanRoutesRequest>, JsonRejection>,
) -> Result<Json<PlanRoutesResponse>> {
    let Json(request) = payload?;
    request.validate()?;
    let distance = check_distance(request.distance)?;

    Ok(Json(PlanRoutesResponse {
        routes: emissions::plan_routes(distance),
        from: request.from,
        to: request.to,
        distance,
    }))
}

// ─── Weather ─────────────────────────────────────────────────

/// Current conditions for a city or coordinates.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSnapshot>> {
    Ok(Json(state.weather.current(&query).await?))
}

#[derive(Deserialize)]
struct AdviceQuery {
    /// Planned transport mode (defaults to bike)
    mode: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherAdviceResponse {
    pub weather: WeatherSnapshot,
    pub advisories: Vec<Advisory>,
    pub recommend_public_transport: bool,
    pub outlook: WeatherOutlook,
}

/// Current conditions plus travel advice for the planned mode.
async fn get_weather_advice(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdviceQuery>,
) -> Result<Json<WeatherAdviceResponse>> {
    let mode = match params.mode.as_deref() {
        Some(raw) => raw
            .parse::<TransportMode>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => TransportMode::Bike,
    };

    let query = WeatherQuery {
        city: params.city,
        lat: params.lat,
        lon: params.lon,
    };
    let Conditions { weather, outlook } =
        state.weather.current_with_outlook(&query).await?;

    tracing::debug!(
        mode = %mode,
        condition = %weather.condition,
        wind_speed = weather.wind_speed,
        "Building weather advice"
    );

    Ok(Json(WeatherAdviceResponse {
        advisories: advisor::advise(Some(&weather), mode),
        recommend_public_transport: advisor::should_recommend_public_transport(Some(&weather)),
        outlook,
        weather,
    }))
}

// ─── Badge Catalog ───────────────────────────────────────────

/// Static badge definitions.
async fn get_badge_catalog() -> impl IntoResponse {
    let catalog: Vec<BadgeSummary> = BADGE_CATALOG.iter().map(BadgeSummary::from).collect();
    (
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Json(catalog),
    )
}
