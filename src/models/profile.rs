// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use crate::models::BadgeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Name used when the identity provider has none on record.
pub const DEFAULT_PROFILE_NAME: &str = "User";

/// User profile stored in the `profiles` collection.
///
/// The stats fields (`total_co2_saved`, `journey_count`, `badges`) only ever
/// grow, and only as a side effect of recording a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// User ID (token subject, also used as document ID)
    pub id: String,
    pub name: String,
    /// Email address (may be None if the identity provider has none)
    pub email: Option<String>,
    /// Cumulative grams of CO₂ saved
    #[serde(rename = "totalCO2Saved", default)]
    pub total_co2_saved: f64,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub journey_count: u64,
    /// Unlocked badges in award order
    #[serde(default)]
    pub badges: Vec<BadgeId>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

/// Identity details used to initialize a profile on first access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSeed {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ProfileSeed {
    /// Build a zero-valued profile for this identity.
    pub fn into_profile(self, created_at: DateTime<Utc>) -> UserProfile {
        UserProfile {
            id: self.user_id,
            name: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()),
            email: self.email,
            total_co2_saved: 0.0,
            journey_count: 0,
            badges: Vec::new(),
            created_at,
        }
    }
}
