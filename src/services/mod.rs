// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod advisor;
pub mod aggregator;
pub mod badges;
pub mod emissions;
pub mod weather;

pub use badges::ProgressStats;
pub use emissions::{Emissions, RouteOption};
pub use weather::{Conditions, WeatherQuery, WeatherService};
