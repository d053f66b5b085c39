// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather snapshot and advisory models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Normalized current weather for a location.
///
/// Temperatures are rounded °C; wind speed is rounded km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub feels_like: f64,
    /// Main condition, lower-cased ("clear", "rain", "snow", ...)
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub city: String,
}

impl WeatherSnapshot {
    pub fn is(&self, condition: &str) -> bool {
        self.condition == condition
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

/// A single piece of travel advice for the current weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Advisory {
    pub message: String,
    pub severity: Severity,
    pub icon: String,
}

/// Mode-independent summary of how suitable the weather is for travelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherOutlook {
    pub recommendation: String,
    pub transport_suggestion: String,
    pub weather_tip: String,
    pub is_good_for_cycling: bool,
    pub is_good_for_walking: bool,
}
