// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CO₂ emission model and route planning.
//!
//! Driving is the baseline: savings for every other mode are measured
//! against a car covering the same distance.

use crate::models::TransportMode;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Grams of CO₂ emitted per kilometer.
pub fn emission_factor(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Car => 120.0,  // average petrol car
        TransportMode::Bus => 50.0,   // public bus
        TransportMode::Train => 35.0, // electric train
        TransportMode::Bike => 0.0,
        TransportMode::Walk => 0.0,
        TransportMode::Ebike => 5.0, // battery production
    }
}

/// Average speed in km/h used for duration estimates.
pub fn average_speed_kmh(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walk => 5.0,
        TransportMode::Bike => 15.0,
        TransportMode::Ebike => 20.0,
        TransportMode::Bus => 25.0,
        TransportMode::Train => 40.0,
        TransportMode::Car => 35.0,
    }
}

/// Emissions for a single trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emissions {
    pub co2_grams: f64,
    pub saved_grams: f64,
}

fn emissions_with_factor(distance_km: f64, factor: f64) -> Emissions {
    let co2_grams = distance_km * factor;
    let baseline = distance_km * emission_factor(TransportMode::Car);
    let saved = baseline - co2_grams;

    Emissions {
        co2_grams,
        saved_grams: if saved > 0.0 { saved } else { 0.0 },
    }
}

/// Emissions and savings for `distance_km` travelled by `mode`.
pub fn emissions(distance_km: f64, mode: TransportMode) -> Emissions {
    emissions_with_factor(distance_km, emission_factor(mode))
}

/// Like [`emissions`], but for a raw mode name. Unknown names emit nothing.
pub fn emissions_for_mode_name(distance_km: f64, mode: &str) -> Emissions {
    let factor = mode
        .parse::<TransportMode>()
        .map(emission_factor)
        .unwrap_or(0.0);
    emissions_with_factor(distance_km, factor)
}

/// One candidate way of making a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteOption {
    pub mode: TransportMode,
    /// Kilometers
    pub distance: f64,
    /// Estimated minutes
    pub duration: f64,
    pub co2_grams: f64,
    pub co2_saved: f64,
    pub recommended: bool,
}

/// Build one route option per transport mode, lowest emissions first.
pub fn plan_routes(distance_km: f64) -> Vec<RouteOption> {
    let mut routes: Vec<RouteOption> = TransportMode::ALL
        .iter()
        .map(|&mode| {
            let Emissions {
                co2_grams,
                saved_grams,
            } = emissions(distance_km, mode);

            RouteOption {
                mode,
                distance: distance_km,
                duration: distance_km / average_speed_kmh(mode) * 60.0,
                co2_grams,
                co2_saved: saved_grams,
                recommended: matches!(
                    mode,
                    TransportMode::Bike | TransportMode::Ebike | TransportMode::Train
                ),
            }
        })
        .collect();

    // sort_by is stable, so equal emitters keep the display order
    routes.sort_by(|a, b| a.co2_grams.total_cmp(&b.co2_grams));
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emissions_match_factor_table() {
        for mode in TransportMode::ALL {
            for distance in [0.0, 1.0, 7.5, 42.0] {
                let e = emissions(distance, mode);
                assert_eq!(e.co2_grams, distance * emission_factor(mode));
                assert!(e.co2_grams >= 0.0);
                assert!(e.saved_grams >= 0.0);
            }
        }
    }

    #[test]
    fn test_car_never_saves() {
        for distance in [0.0, 0.5, 10.0, 1000.0] {
            assert_eq!(emissions(distance, TransportMode::Car).saved_grams, 0.0);
        }
    }

    #[test]
    fn test_bike_ten_km() {
        assert_eq!(
            emissions(10.0, TransportMode::Bike),
            Emissions {
                co2_grams: 0.0,
                saved_grams: 1200.0
            }
        );
    }

    #[test]
    fn test_bus_ten_km() {
        assert_eq!(
            emissions(10.0, TransportMode::Bus),
            Emissions {
                co2_grams: 500.0,
                saved_grams: 700.0
            }
        );
    }

    #[test]
    fn test_unknown_mode_name_falls_back_to_zero_factor() {
        let e = emissions_for_mode_name(10.0, "hoverboard");
        assert_eq!(e.co2_grams, 0.0);
        assert_eq!(e.saved_grams, 1200.0);
    }

    #[test]
    fn test_known_mode_name_uses_table() {
        assert_eq!(
            emissions_for_mode_name(10.0, "train"),
            emissions(10.0, TransportMode::Train)
        );
    }

    #[test]
    fn test_negative_distance_is_total() {
        // No validation here: negative input yields negative emissions, zero savings.
        let e = emissions(-2.0, TransportMode::Bus);
        assert_eq!(e.co2_grams, -100.0);
        assert_eq!(e.saved_grams, 0.0);
    }

    #[test]
    fn test_plan_routes_one_per_mode_sorted() {
        let routes = plan_routes(10.0);

        assert_eq!(routes.len(), 6);
        let modes: Vec<TransportMode> = routes.iter().map(|r| r.mode).collect();
        assert_eq!(
            modes,
            vec![
                TransportMode::Walk,
                TransportMode::Bike,
                TransportMode::Ebike,
                TransportMode::Train,
                TransportMode::Bus,
                TransportMode::Car,
            ]
        );
        assert!(routes
            .windows(2)
            .all(|w| w[0].co2_grams <= w[1].co2_grams));
    }

    #[test]
    fn test_plan_routes_duration_and_recommendation() {
        let routes = plan_routes(10.0);
        let bike = routes
            .iter()
            .find(|r| r.mode == TransportMode::Bike)
            .unwrap();
        let car = routes.iter().find(|r| r.mode == TransportMode::Car).unwrap();

        assert!((bike.duration - 40.0).abs() < 1e-9);
        assert!(bike.recommended);
        assert_eq!(bike.co2_saved, 1200.0);
        assert!(!car.recommended);
        assert_eq!(car.co2_saved, 0.0);
    }
}
