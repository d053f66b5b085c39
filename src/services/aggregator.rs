// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile aggregation: folds a completed journey into the owner's totals.
//!
//! Totals are maintained incrementally, never recomputed from history, so
//! stores must apply this inside an atomic read-modify-write.

use crate::models::{Journey, UserProfile};
use crate::services::badges::{self, ProgressStats};

/// Apply a journey to a profile, returning the updated profile.
pub fn record_journey(profile: &UserProfile, journey: &Journey) -> UserProfile {
    let mut updated = profile.clone();
    apply_journey(&mut updated, journey);
    updated
}

/// In-place form of [`record_journey`] for stores that hold the profile mutably.
pub fn apply_journey(profile: &mut UserProfile, journey: &Journey) {
    profile.journey_count += 1;
    profile.total_co2_saved += journey.co2_saved;

    let stats = ProgressStats {
        total_co2_saved: profile.total_co2_saved,
        journey_count: profile.journey_count,
    };
    profile.badges = badges::evaluate(&stats, &profile.badges);
}
