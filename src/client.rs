// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed HTTP client for the Green Münster API.
//!
//! Authenticated calls take a [`Session`] explicitly; the client itself holds
//! no token state and can be shared between users.

use crate::models::{BadgeSummary, Journey, TransportMode, UserProfile, WeatherSnapshot};
use crate::routes::api::JourneysResponse;
use crate::routes::public::{EmissionsResponse, PlanRoutesResponse, WeatherAdviceResponse};
use crate::routes::HealthResponse;
use crate::services::WeatherQuery;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// An authenticated user's access token.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error (HTTP {status}): {error}")]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },
}

impl ClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Error body produced by the server.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    details: Option<String>,
    #[serde(rename = "providerMessage")]
    provider_message: Option<String>,
}

/// A completed journey to submit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJourney {
    pub from: String,
    pub to: String,
    /// Kilometers
    pub distance: f64,
    pub mode: TransportMode,
    /// Minutes
    pub duration: f64,
}

/// Green Münster API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─── Public ──────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        check_response_json(response).await
    }

    /// Emissions for `distance` km by `mode` (unknown modes count as zero).
    pub async fn calculate_emissions(
        &self,
        distance: f64,
        mode: &str,
    ) -> Result<EmissionsResponse, ClientError> {
        let body = serde_json::json!({ "distance": distance, "mode": mode });
        let response = self
            .http
            .post(self.url("/calculate-emissions"))
            .json(&body)
            .send()
            .await?;
        check_response_json(response).await
    }

    pub async fn plan_routes(
        &self,
        from: &str,
        to: &str,
        distance: f64,
    ) -> Result<PlanRoutesResponse, ClientError> {
        let body = serde_json::json!({ "from": from, "to": to, "distance": distance });
        let response = self
            .http
            .post(self.url("/routes/plan"))
            .json(&body)
            .send()
            .await?;
        check_response_json(response).await
    }

    pub async fn weather(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, ClientError> {
        let response = self
            .http
            .get(self.url("/weather"))
            .query(&location_params(query))
            .send()
            .await?;
        check_response_json(response).await
    }

    pub async fn weather_advice(
        &self,
        query: &WeatherQuery,
        mode: TransportMode,
    ) -> Result<WeatherAdviceResponse, ClientError> {
        let mut params = location_params(query);
        params.push(("mode", mode.to_string()));

        let response = self
            .http
            .get(self.url("/weather/advice"))
            .query(&params)
            .send()
            .await?;
        check_response_json(response).await
    }

    pub async fn badge_catalog(&self) -> Result<Vec<BadgeSummary>, ClientError> {
        let response = self.http.get(self.url("/badges/catalog")).send().await?;
        check_response_json(response).await
    }

    // ─── Authenticated ───────────────────────────────────────────

    pub async fn create_journey(
        &self,
        session: &Session,
        journey: &NewJourney,
    ) -> Result<Journey, ClientError> {
        let response = self
            .http
            .post(self.url("/journeys"))
            .bearer_auth(&session.access_token)
            .json(journey)
            .send()
            .await?;
        check_response_json(response).await
    }

    /// One page of the caller's journeys, newest first.
    pub async fn list_journeys(
        &self,
        session: &Session,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<JourneysResponse, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        self.get_json("/journeys", session, &params).await
    }

    pub async fn profile(&self, session: &Session) -> Result<UserProfile, ClientError> {
        self.get_json("/profile", session, &[]).await
    }

    pub async fn update_profile_name(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .put(self.url("/profile"))
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        check_response_json(response).await
    }

    pub async fn leaderboard(&self, session: &Session) -> Result<Vec<UserProfile>, ClientError> {
        self.get_json("/leaderboard", session, &[]).await
    }

    /// Badge catalog with the caller's earned flags.
    pub async fn badges(&self, session: &Session) -> Result<Vec<BadgeSummary>, ClientError> {
        self.get_json("/badges", session, &[]).await
    }

    /// Authenticated GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&session.access_token)
            .query(params)
            .send()
            .await?;

        check_response_json(response).await
    }
}

fn location_params(query: &WeatherQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(city) = &query.city {
        params.push(("city", city.clone()));
    }
    if let Some(lat) = query.lat {
        params.push(("lat", lat.to_string()));
    }
    if let Some(lon) = query.lon {
        params.push(("lon", lon.to_string()));
    }
    params
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => ClientError::Api {
            status: status.as_u16(),
            error: parsed.error,
            details: parsed.details.or(parsed.provider_message),
        },
        // Middleware rejections (e.g. 401) have no JSON body
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            details: (!body.is_empty()).then_some(body),
        },
    };

    tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
    Err(err)
}
