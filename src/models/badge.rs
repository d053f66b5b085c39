// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static badge catalog.
//!
//! Badges are reference data: the catalog never changes at runtime, and a
//! user's unlocked badges are just the ids stored on their profile.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stable badge identifiers, as stored on profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BadgeId {
    #[serde(rename = "first_journey")]
    FirstJourney,
    #[serde(rename = "co2_saver_1kg")]
    Co2Saver1Kg,
    #[serde(rename = "co2_saver_5kg")]
    Co2Saver5Kg,
    #[serde(rename = "frequent_traveler")]
    FrequentTraveler,
    #[serde(rename = "eco_warrior")]
    EcoWarrior,
}

impl BadgeId {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeId::FirstJourney => "first_journey",
            BadgeId::Co2Saver1Kg => "co2_saver_1kg",
            BadgeId::Co2Saver5Kg => "co2_saver_5kg",
            BadgeId::FrequentTraveler => "frequent_traveler",
            BadgeId::EcoWarrior => "eco_warrior",
        }
    }
}

/// What a profile has to reach to unlock a badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// Journey count equals the value exactly.
    JourneyCountExactly(u64),
    /// Journey count is at least the value.
    JourneyCountAtLeast(u64),
    /// Cumulative CO₂ saved (grams) is at least the value.
    Co2SavedAtLeast(f64),
}

impl Requirement {
    /// Requirement kind as exposed in the catalog API.
    pub fn kind(&self) -> RequirementType {
        match self {
            Requirement::JourneyCountExactly(_) | Requirement::JourneyCountAtLeast(_) => {
                RequirementType::Journeys
            }
            Requirement::Co2SavedAtLeast(_) => RequirementType::Co2Saved,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            Requirement::JourneyCountExactly(n) | Requirement::JourneyCountAtLeast(n) => n as f64,
            Requirement::Co2SavedAtLeast(grams) => grams,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RequirementType {
    Journeys,
    Co2Saved,
}

/// A badge definition.
#[derive(Debug, Clone, Copy)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

/// All badges, in award order.
pub static BADGE_CATALOG: [Badge; 5] = [
    Badge {
        id: BadgeId::FirstJourney,
        name: "First Steps",
        description: "Complete your first sustainable journey",
        icon: "🌱",
        requirement: Requirement::JourneyCountExactly(1),
    },
    Badge {
        id: BadgeId::Co2Saver1Kg,
        name: "CO₂ Saver",
        description: "Save 1kg of CO₂ emissions",
        icon: "🌿",
        requirement: Requirement::Co2SavedAtLeast(1000.0),
    },
    Badge {
        id: BadgeId::Co2Saver5Kg,
        name: "Eco Champion",
        description: "Save 5kg of CO₂ emissions",
        icon: "🏆",
        requirement: Requirement::Co2SavedAtLeast(5000.0),
    },
    Badge {
        id: BadgeId::FrequentTraveler,
        name: "Frequent Traveler",
        description: "Complete 10 journeys",
        icon: "🚴",
        requirement: Requirement::JourneyCountAtLeast(10),
    },
    Badge {
        id: BadgeId::EcoWarrior,
        name: "Eco Warrior",
        description: "Complete 50 sustainable journeys",
        icon: "⭐",
        requirement: Requirement::JourneyCountAtLeast(50),
    },
];

/// Catalog entry for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BadgeSummary {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement_type: RequirementType,
    pub requirement_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned: Option<bool>,
}

impl From<&Badge> for BadgeSummary {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id,
            name: badge.name.to_string(),
            description: badge.description.to_string(),
            icon: badge.icon.to_string(),
            requirement_type: badge.requirement.kind(),
            requirement_value: badge.requirement.value(),
            earned: None,
        }
    }
}

/// The full catalog with each badge flagged as earned or not.
pub fn badges_with_status(earned: &[BadgeId]) -> Vec<BadgeSummary> {
    BADGE_CATALOG
        .iter()
        .map(|badge| BadgeSummary {
            earned: Some(earned.contains(&badge.id)),
            ..BadgeSummary::from(badge)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        for badge in &BADGE_CATALOG {
            let count = BADGE_CATALOG.iter().filter(|b| b.id == badge.id).count();
            assert_eq!(count, 1, "{} listed {} times", badge.id.as_str(), count);
        }
    }

    #[test]
    fn test_badge_id_serializes_to_stable_string() {
        for badge in &BADGE_CATALOG {
            let json = serde_json::to_string(&badge.id).unwrap();
            assert_eq!(json, format!("\"{}\"", badge.id.as_str()));
        }
    }

    #[test]
    fn test_badges_with_status_flags_earned() {
        let summaries = badges_with_status(&[BadgeId::Co2Saver1Kg]);

        assert_eq!(summaries.len(), BADGE_CATALOG.len());
        let earned: Vec<BadgeId> = summaries
            .iter()
            .filter(|s| s.earned == Some(true))
            .map(|s| s.id)
            .collect();
        assert_eq!(earned, vec![BadgeId::Co2Saver1Kg]);
    }

    #[test]
    fn test_catalog_summary_exposes_requirement() {
        let badge = BADGE_CATALOG
            .iter()
            .find(|b| b.id == BadgeId::Co2Saver5Kg)
            .unwrap();
        let summary = BadgeSummary::from(badge);
        assert_eq!(summary.requirement_type, RequirementType::Co2Saved);
        assert_eq!(summary.requirement_value, 5000.0);
        assert!(summary.earned.is_none());
    }
}
