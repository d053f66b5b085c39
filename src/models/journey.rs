// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Journey model and transport modes.

use chrono::{DateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ways of getting from A to B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Bike,
    Walk,
    Ebike,
}

impl TransportMode {
    /// Display order used by the route planner.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Ebike,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Car,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
            TransportMode::Ebike => "ebike",
        }
    }

    /// Muscle-powered or light electric modes exposed to the weather.
    pub fn is_exposed(self) -> bool {
        matches!(
            self,
            TransportMode::Bike | TransportMode::Ebike | TransportMode::Walk
        )
    }

    pub fn is_cycling(self) -> bool {
        matches!(self, TransportMode::Bike | TransportMode::Ebike)
    }

    pub fn is_public_transport(self) -> bool {
        matches!(self, TransportMode::Bus | TransportMode::Train)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for mode names outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown transport mode: {0}")]
pub struct UnknownModeError(pub String);

impl FromStr for TransportMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(TransportMode::Car),
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "bike" => Ok(TransportMode::Bike),
            "walk" => Ok(TransportMode::Walk),
            "ebike" => Ok(TransportMode::Ebike),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

/// Completed journey stored in the `journeys` collection.
///
/// Journeys are append-only: created once at completion and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Journey {
    /// Document ID: "{created_at_millis}_{random hex}"
    pub id: String,
    /// Owner's user ID (token subject)
    pub user_id: String,
    pub from: String,
    pub to: String,
    /// Distance in kilometers
    pub distance: f64,
    pub mode: TransportMode,
    /// Grams of CO₂ emitted on this journey
    pub co2_grams: f64,
    /// Grams of CO₂ saved compared to driving the same distance
    pub co2_saved: f64,
    /// Duration in minutes
    pub duration: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

/// Random bytes in a journey ID suffix (rendered as hex).
const JOURNEY_ID_RANDOM_BYTES: usize = 4;

/// Generate a journey document ID: `"{created_at_millis}_{8 hex chars}"`.
///
/// IDs sort lexicographically in creation order (for timestamps with the
/// same number of digits), which is what journey pagination relies on.
pub fn new_journey_id(created_at: DateTime<Utc>) -> Result<String, ring::error::Unspecified> {
    let mut suffix = [0u8; JOURNEY_ID_RANDOM_BYTES];
    SystemRandom::new().fill(&mut suffix)?;
    Ok(format!(
        "{}_{}",
        created_at.timestamp_millis(),
        hex::encode(suffix)
    ))
}

/// Check that a string has the shape produced by [`new_journey_id`].
pub fn is_valid_journey_id(id: &str) -> bool {
    let Some((millis, suffix)) = id.split_once('_') else {
        return false;
    };

    !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == JOURNEY_ID_RANDOM_BYTES * 2
        && suffix.bytes().all(|b| b.is_ascii_hexdigit())
}
