// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (per-user totals and badges)
//! - Journeys (append-only journey records)

use crate::db::{collections, JourneyCursor};
use crate::error::AppError;
use crate::models::{Journey, ProfileSeed, UserProfile};
use crate::services::aggregator;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator does not check credentials; skip the default token lookup.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client for testing.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by user ID.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a profile, creating a zero-valued one first if none exists.
    ///
    /// Creation is an insert, so a profile written concurrently (e.g. by a
    /// first journey) is never overwritten with zeros.
    pub async fn get_or_init_profile(&self, seed: &ProfileSeed) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.get_profile(&seed.user_id).await? {
            return Ok(profile);
        }

        let profile = seed.clone().into_profile(chrono::Utc::now());
        let inserted: Result<UserProfile, _> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::PROFILES)
            .document_id(&profile.id)
            .object(&profile)
            .execute()
            .await;

        match inserted {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id, "Initialized profile");
                Ok(profile)
            }
            Err(e) => match self.get_profile(&seed.user_id).await? {
                // Lost the race to another writer; theirs is authoritative.
                Some(existing) => {
                    tracing::debug!(user_id = %existing.id, "Profile created concurrently");
                    Ok(existing)
                }
                None => Err(AppError::Database(format!(
                    "Failed to initialize profile: {}",
                    e
                ))),
            },
        }
    }

    /// Change the display name only.
    pub async fn update_profile_name(
        &self,
        seed: &ProfileSeed,
        name: &str,
    ) -> Result<UserProfile, AppError> {
        let mut profile = self.get_or_init_profile(seed).await?;
        profile.name = name.to_string();

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(UserProfile::{name}))
            .in_col(collections::PROFILES)
            .document_id(&profile.id)
            .object(&profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(profile)
    }

    // ─── Journey Operations ──────────────────────────────────────

    /// Atomically store a journey and update the owner's profile totals.
    ///
    /// The profile is read inside the transaction, so a concurrent journey
    /// for the same user makes the commit conflict and the whole closure is
    /// retried against the fresh profile.
    pub async fn record_journey(
        &self,
        seed: &ProfileSeed,
        journey: &Journey,
    ) -> Result<UserProfile, AppError> {
        let profile = self
            .get_client()?
            .run_transaction(|db, transaction| {
                let seed = seed.clone();
                let journey = journey.clone();

                Box::pin(async move {
                    // 1. Read the current profile (lazily initialized if missing)
                    let current: Option<UserProfile> = db
                        .fluent()
                        .select()
                        .by_id_in(collections::PROFILES)
                        .obj()
                        .one(&seed.user_id)
                        .await?;

                    let mut profile =
                        current.unwrap_or_else(|| seed.into_profile(chrono::Utc::now()));

                    // 2. Fold the journey into the totals
                    aggregator::apply_journey(&mut profile, &journey);

                    // 3. Journey document
                    db.fluent()
                        .update()
                        .in_col(collections::JOURNEYS)
                        .document_id(&journey.id)
                        .object(&journey)
                        .add_to_transaction(transaction)?;

                    // 4. Updated profile
                    db.fluent()
                        .update()
                        .in_col(collections::PROFILES)
                        .document_id(&profile.id)
                        .object(&profile)
                        .add_to_transaction(transaction)?;

                    Ok(profile)
                })
            })
            .await
            .map_err(|e| AppError::Database(format!("Journey transaction failed: {}", e)))?;

        tracing::info!(
            user_id = %profile.id,
            journey_id = %journey.id,
            journey_count = profile.journey_count,
            total_co2_saved = profile.total_co2_saved,
            "Journey recorded"
        );

        Ok(profile)
    }

    /// Get a user's journeys, newest first.
    pub async fn list_journeys(
        &self,
        user_id: &str,
        cursor: Option<&JourneyCursor>,
        limit: u32,
    ) -> Result<Vec<Journey>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::JOURNEYS);

        let user_id = user_id.to_string();
        let query = if let Some(cursor) = cursor {
            let before = cursor.journey_id.clone();
            query.filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id.clone()),
                    q.field("id").less_than(before.clone()),
                ])
            })
        } else {
            query.filter(move |q| q.for_all([q.field("userId").eq(user_id.clone())]))
        };

        query
            .order_by([("id", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Leaderboard ─────────────────────────────────────────────

    /// Top profiles by total CO₂ saved.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PROFILES)
            .order_by([(
                "totalCO2Saved",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
