// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenWeatherMap client producing normalized weather snapshots.
//!
//! Handles:
//! - Location selection (coordinates, city, or the configured default)
//! - Unit normalization (metric, wind in km/h)
//! - Passing provider failures through with their HTTP status

use crate::config::Config;
use crate::error::AppError;
use crate::models::{WeatherOutlook, WeatherSnapshot};
use crate::services::advisor;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where to fetch the weather for.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Rounded snapshot plus the outlook computed from the measured values.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub weather: WeatherSnapshot,
    pub outlook: WeatherOutlook,
}

/// OpenWeatherMap current-weather client.
#[derive(Clone)]
pub struct WeatherService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    default_city: String,
}

impl WeatherService {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: config.weather_base_url.clone(),
            api_key: config.openweather_api_key.clone(),
            default_city: config.default_weather_city.clone(),
        }
    }

    /// Query parameters selecting the location: coordinates win over city.
    fn location_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        match (query.lat, query.lon) {
            (Some(lat), Some(lon)) => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
            _ => {
                let city = query
                    .city
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(&self.default_city);
                vec![("q", city.to_string())]
            }
        }
    }

    /// Fetch the current weather for a location.
    pub async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, AppError> {
        self.fetch(query).await?.normalize()
    }

    /// Fetch the current weather along with its outlook.
    pub async fn current_with_outlook(
        &self,
        query: &WeatherQuery,
    ) -> Result<Conditions, AppError> {
        self.fetch(query).await?.conditions()
    }

    async fn fetch(&self, query: &WeatherQuery) -> Result<OpenWeatherResponse, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::NotConfigured("Weather API key not configured".to_string())
        })?;

        let mut params = self.location_params(query);
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));

        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!(location = ?params.first(), "Fetching weather");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("JSON parse error: {}", e)))
    }
}

/// Extract the provider's `message` field, or fall back to the raw body.
fn provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ProviderError {
        message: Option<serde_json::Value>,
    }

    match serde_json::from_str::<ProviderError>(body) {
        Ok(ProviderError {
            message: Some(serde_json::Value::String(msg)),
        }) => msg,
        Ok(_) => body.to_string(),
        Err(_) => body.to_string(),
    }
}

/// Current-weather response from OpenWeatherMap (metric units).
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherResponse {
    pub weather: Vec<OpenWeatherCondition>,
    pub main: OpenWeatherMain,
    pub wind: OpenWeatherWind,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherWind {
    /// Meters per second
    pub speed: f64,
}

impl OpenWeatherResponse {
    /// Convert to our snapshot: rounded °C, lower-cased condition, wind in km/h.
    pub fn normalize(self) -> Result<WeatherSnapshot, AppError> {
        Ok(self.measured()?.rounded())
    }

    /// Rounded snapshot, with the outlook judged on the unrounded readings.
    pub fn conditions(self) -> Result<Conditions, AppError> {
        let measured = self.measured()?;
        let outlook = advisor::outlook(&measured);
        Ok(Conditions {
            weather: measured.rounded(),
            outlook,
        })
    }

    /// Snapshot in our units without rounding.
    fn measured(self) -> Result<WeatherSnapshot, AppError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            AppError::UpstreamUnavailable("Weather response has no conditions".to_string())
        })?;

        Ok(WeatherSnapshot {
            temp: self.main.temp,
            feels_like: self.main.feels_like,
            condition: condition.main.to_lowercase(),
            description: condition.description,
            icon: condition.icon,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed * 3.6,
            city: self.name,
        })
    }
}

impl WeatherSnapshot {
    fn rounded(self) -> Self {
        Self {
            temp: self.temp.round(),
            feels_like: self.feels_like.round(),
            wind_speed: self.wind_speed.round(),
            ..self
        }
    }
}
