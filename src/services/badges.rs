// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge evaluation over cumulative profile stats.

use crate::models::badge::{Requirement, BADGE_CATALOG};
use crate::models::BadgeId;

/// The cumulative numbers badges are awarded on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressStats {
    /// Grams of CO₂ saved
    pub total_co2_saved: f64,
    pub journey_count: u64,
}

impl Requirement {
    /// Whether `stats` satisfies this requirement (thresholds are inclusive).
    pub fn is_met(&self, stats: &ProgressStats) -> bool {
        match *self {
            Requirement::JourneyCountExactly(n) => stats.journey_count == n,
            Requirement::JourneyCountAtLeast(n) => stats.journey_count >= n,
            Requirement::Co2SavedAtLeast(grams) => stats.total_co2_saved >= grams,
        }
    }
}

/// Award every badge whose requirement `stats` meets.
///
/// Badges already in `current` are kept as-is and never removed; new ones are
/// appended in catalog order.
pub fn evaluate(stats: &ProgressStats, current: &[BadgeId]) -> Vec<BadgeId> {
    let mut badges = current.to_vec();

    for badge in &BADGE_CATALOG {
        if !badges.contains(&badge.id) && badge.requirement.is_met(stats) {
            tracing::debug!(badge = badge.id.as_str(), "Badge unlocked");
            badges.push(badge.id);
        }
    }

    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total_co2_saved: f64, journey_count: u64) -> ProgressStats {
        ProgressStats {
            total_co2_saved,
            journey_count,
        }
    }

    #[test]
    fn test_first_journey_only_at_exactly_one() {
        assert_eq!(evaluate(&stats(0.0, 1), &[]), vec![BadgeId::FirstJourney]);
        assert!(evaluate(&stats(0.0, 0), &[]).is_empty());
        assert!(evaluate(&stats(0.0, 2), &[]).is_empty());
    }

    #[test]
    fn test_co2_thresholds_are_inclusive() {
        assert_eq!(evaluate(&stats(999.9, 2), &[]), Vec::<BadgeId>::new());
        assert_eq!(evaluate(&stats(1000.0, 2), &[]), vec![BadgeId::Co2Saver1Kg]);
        assert_eq!(
            evaluate(&stats(5000.0, 2), &[]),
            vec![BadgeId::Co2Saver1Kg, BadgeId::Co2Saver5Kg]
        );
    }

    #[test]
    fn test_journey_count_thresholds() {
        assert_eq!(
            evaluate(&stats(0.0, 10), &[]),
            vec![BadgeId::FrequentTraveler]
        );
        assert_eq!(
            evaluate(&stats(0.0, 50), &[]),
            vec![BadgeId::FrequentTraveler, BadgeId::EcoWarrior]
        );
    }

    #[test]
    fn test_existing_badges_are_not_duplicated() {
        let current = vec![BadgeId::Co2Saver1Kg];
        let badges = evaluate(&stats(1500.0, 1), &current);

        assert_eq!(badges, vec![BadgeId::Co2Saver1Kg, BadgeId::FirstJourney]);
    }

    #[test]
    fn test_badges_are_never_removed() {
        // Stats below every threshold must still keep everything already earned.
        let current = vec![
            BadgeId::EcoWarrior,
            BadgeId::FirstJourney,
            BadgeId::Co2Saver5Kg,
        ];

        for journey_count in [0, 1, 2, 10, 49, 50, 120] {
            for total in [0.0, 10.0, 999.0, 1000.0, 4999.0, 6000.0] {
                let badges = evaluate(&stats(total, journey_count), &current);
                assert_eq!(&badges[..current.len()], current.as_slice());
            }
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let s = stats(5200.0, 10);
        let once = evaluate(&s, &[]);
        let twice = evaluate(&s, &once);
        assert_eq!(once, twice);
    }
}
