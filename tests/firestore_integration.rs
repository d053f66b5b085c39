// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running, e.g.
//! `gcloud emulators firestore start --host-port=localhost:8086` with
//! `FIRESTORE_EMULATOR_HOST=localhost:8086`. They are skipped otherwise.

use chrono::Utc;
use green_munster::models::journey::new_journey_id;
use green_munster::models::{BadgeId, Journey, ProfileSeed, TransportMode};
use green_munster::services::emissions;

mod common;
use common::test_db;

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-user-{}", nanos)
}

fn seed(user_id: &str) -> ProfileSeed {
    ProfileSeed {
        user_id: user_id.to_string(),
        name: Some("Emulator Rider".to_string()),
        email: Some("emulator@example.com".to_string()),
    }
}

fn journey(user_id: &str, distance: f64, mode: TransportMode) -> Journey {
    let created_at = Utc::now();
    let e = emissions::emissions(distance, mode);
    Journey {
        id: new_journey_id(created_at).unwrap(),
        user_id: user_id.to_string(),
        from: "Hiltrup".to_string(),
        to: "Innenstadt".to_string(),
        distance,
        mode,
        co2_grams: e.co2_grams,
        co2_saved: e.saved_grams,
        duration: 30.0,
        created_at,
    }
}

#[tokio::test]
async fn test_profile_lazy_init() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    assert!(db.get_profile(&user_id).await.unwrap().is_none());

    let created = db.get_or_init_profile(&seed(&user_id)).await.unwrap();
    assert_eq!(created.journey_count, 0);
    assert_eq!(created.name, "Emulator Rider");

    let fetched = db.get_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(fetched.id, user_id);
    assert_eq!(fetched.total_co2_saved, 0.0);
}

#[tokio::test]
async fn test_record_journey_updates_profile_and_log() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let profile = db
        .record_journey(&seed(&user_id), &journey(&user_id, 12.5, TransportMode::Bike))
        .await
        .unwrap();
    assert_eq!(profile.journey_count, 1);
    assert_eq!(profile.total_co2_saved, 1500.0);
    assert_eq!(
        profile.badges,
        vec![BadgeId::FirstJourney, BadgeId::Co2Saver1Kg]
    );

    let stored = db.get_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(stored, profile);

    let journeys = db.list_journeys(&user_id, None, 10).await.unwrap();
    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].mode, TransportMode::Bike);
}

#[tokio::test]
async fn test_update_profile_name_only_touches_name() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.record_journey(&seed(&user_id), &journey(&user_id, 10.0, TransportMode::Bus))
        .await
        .unwrap();
    let renamed = db
        .update_profile_name(&seed(&user_id), "Renamed")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Renamed");

    let stored = db.get_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.journey_count, 1);
    assert_eq!(stored.total_co2_saved, 700.0);
}

#[tokio::test]
async fn test_leaderboard_is_sorted() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.record_journey(
        &seed(&user_id),
        &journey(&user_id, 5_000.0, TransportMode::Walk),
    )
    .await
    .unwrap();

    let board = db.leaderboard(20).await.unwrap();
    assert!(!board.is_empty());
    assert!(board
        .windows(2)
        .all(|w| w[0].total_co2_saved >= w[1].total_co2_saved));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_journeys_keep_exact_totals() {
    require_emulator!();
    const JOURNEYS: usize = 8;

    let db = test_db().await;
    let user_id = unique_user_id();

    let handles: Vec<_> = (0..JOURNEYS)
        .map(|_| {
            let db = db.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                db.record_journey(&seed(&user_id), &journey(&user_id, 5.0, TransportMode::Ebike))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let profile = db.get_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.journey_count, JOURNEYS as u64);
    // 5 km by e-bike saves 575 g
    assert_eq!(profile.total_co2_saved, 575.0 * JOURNEYS as f64);

    let journeys = db.list_journeys(&user_id, None, 100).await.unwrap();
    assert_eq!(journeys.len(), JOURNEYS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_profile_init_never_clobbers_first_journey() {
    require_emulator!();

    let db = test_db().await;

    for _ in 0..5 {
        let user_id = unique_user_id();

        let reader = {
            let db = db.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move { db.get_or_init_profile(&seed(&user_id)).await })
        };
        let writer = {
            let db = db.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                db.record_journey(&seed(&user_id), &journey(&user_id, 10.0, TransportMode::Bus))
                    .await
            })
        };

        let read = reader.await.unwrap().unwrap();
        writer.await.unwrap().unwrap();
        assert!(read.journey_count <= 1);

        let stored = db.get_profile(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.journey_count, 1);
        assert_eq!(stored.total_co2_saved, 700.0);
    }
}

#[tokio::test]
async fn test_get_or_init_profile_keeps_existing_stats() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.record_journey(&seed(&user_id), &journey(&user_id, 2.0, TransportMode::Walk))
        .await
        .unwrap();

    let profile = db.get_or_init_profile(&seed(&user_id)).await.unwrap();
    assert_eq!(profile.journey_count, 1);
    assert_eq!(profile.total_co2_saved, 240.0);
}
