// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store for local development and tests.
//!
//! Profile updates happen while holding the profile's map entry, so
//! concurrent journeys for one user are applied one at a time.

use crate::db::JourneyCursor;
use crate::models::{Journey, ProfileSeed, UserProfile};
use crate::services::aggregator;
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed profile and journey store.
#[derive(Clone, Default)]
pub struct MemoryDb {
    profiles: Arc<DashMap<String, UserProfile>>,
    /// Journeys per user, in insertion order
    journeys: Arc<DashMap<String, Vec<Journey>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).map(|p| p.value().clone())
    }

    pub fn get_or_init_profile(&self, seed: &ProfileSeed) -> UserProfile {
        self.profiles
            .entry(seed.user_id.clone())
            .or_insert_with(|| seed.clone().into_profile(chrono::Utc::now()))
            .value()
            .clone()
    }

    pub fn update_profile_name(&self, seed: &ProfileSeed, name: &str) -> UserProfile {
        let mut profile = self
            .profiles
            .entry(seed.user_id.clone())
            .or_insert_with(|| seed.clone().into_profile(chrono::Utc::now()));
        profile.name = name.to_string();
        profile.value().clone()
    }

    pub fn record_journey(&self, seed: &ProfileSeed, journey: &Journey) -> UserProfile {
        let mut profile = self
            .profiles
            .entry(seed.user_id.clone())
            .or_insert_with(|| seed.clone().into_profile(chrono::Utc::now()));

        aggregator::apply_journey(&mut profile, journey);

        // Append while the profile entry is still held so the journey log and
        // the totals move together.
        self.journeys
            .entry(journey.user_id.clone())
            .or_default()
            .push(journey.clone());

        tracing::debug!(
            user_id = %profile.id,
            journey_id = %journey.id,
            journey_count = profile.journey_count,
            "Journey recorded"
        );

        profile.value().clone()
    }

    pub fn list_journeys(
        &self,
        user_id: &str,
        cursor: Option<&JourneyCursor>,
        limit: u32,
    ) -> Vec<Journey> {
        let Some(journeys) = self.journeys.get(user_id) else {
            return Vec::new();
        };

        let mut page: Vec<Journey> = journeys
            .iter()
            .filter(|j| cursor.map_or(true, |c| j.id < c.journey_id))
            .cloned()
            .collect();

        page.sort_by(|a, b| b.id.cmp(&a.id));
        page.truncate(limit as usize);
        page
    }

    pub fn leaderboard(&self, limit: u32) -> Vec<UserProfile> {
        let mut profiles: Vec<UserProfile> =
            self.profiles.iter().map(|p| p.value().clone()).collect();

        profiles.sort_by(|a, b| {
            b.total_co2_saved
                .total_cmp(&a.total_co2_saved)
                .then_with(|| a.id.cmp(&b.id))
        });
        profiles.truncate(limit as usize);
        profiles
    }
}
