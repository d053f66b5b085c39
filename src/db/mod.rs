// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: profiles and journeys in Firestore or in memory.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{Journey, ProfileSeed, UserProfile};

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by user ID)
    pub const PROFILES: &str = "profiles";
    /// Completed journeys (keyed by journey ID)
    pub const JOURNEYS: &str = "journeys";
}

/// Position after which the next page of journeys starts.
///
/// Journeys are listed newest first, ordered by ID (see
/// [`crate::models::journey::new_journey_id`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyCursor {
    pub journey_id: String,
}

/// Document store holding profiles and journeys.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Db {
    /// Connect to the backend selected in the config.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage {
            StorageBackend::Firestore => {
                Ok(Db::Firestore(FirestoreDb::new(&config.gcp_project_id).await?))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Db::Memory(MemoryDb::new()))
            }
        }
    }

    /// Fresh, empty in-memory store.
    pub fn memory() -> Self {
        Db::Memory(MemoryDb::new())
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        match self {
            Db::Firestore(db) => db.get_profile(user_id).await,
            Db::Memory(db) => Ok(db.get_profile(user_id)),
        }
    }

    /// Get the caller's profile, creating a zero-valued one if absent.
    pub async fn get_or_init_profile(&self, seed: &ProfileSeed) -> Result<UserProfile, AppError> {
        match self {
            Db::Firestore(db) => db.get_or_init_profile(seed).await,
            Db::Memory(db) => Ok(db.get_or_init_profile(seed)),
        }
    }

    /// Rename a profile. Stats are left untouched.
    pub async fn update_profile_name(
        &self,
        seed: &ProfileSeed,
        name: &str,
    ) -> Result<UserProfile, AppError> {
        match self {
            Db::Firestore(db) => db.update_profile_name(seed, name).await,
            Db::Memory(db) => Ok(db.update_profile_name(seed, name)),
        }
    }

    /// Atomically store a journey and fold it into its owner's profile.
    ///
    /// Returns the updated profile.
    pub async fn record_journey(
        &self,
        seed: &ProfileSeed,
        journey: &Journey,
    ) -> Result<UserProfile, AppError> {
        match self {
            Db::Firestore(db) => db.record_journey(seed, journey).await,
            Db::Memory(db) => Ok(db.record_journey(seed, journey)),
        }
    }

    /// A user's journeys, newest first, starting after `cursor`.
    pub async fn list_journeys(
        &self,
        user_id: &str,
        cursor: Option<&JourneyCursor>,
        limit: u32,
    ) -> Result<Vec<Journey>, AppError> {
        match self {
            Db::Firestore(db) => db.list_journeys(user_id, cursor, limit).await,
            Db::Memory(db) => Ok(db.list_journeys(user_id, cursor, limit)),
        }
    }

    /// Profiles with the most CO₂ saved, highest first.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<UserProfile>, AppError> {
        match self {
            Db::Firestore(db) => db.leaderboard(limit).await,
            Db::Memory(db) => Ok(db.leaderboard(limit)),
        }
    }
}
