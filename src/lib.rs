// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Green Münster: sustainable journey tracking.
//!
//! This crate provides the backend API that computes journey emissions,
//! awards badges, advises on weather, and keeps per-user totals, plus a
//! typed client for it.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::WeatherService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub weather: WeatherService,
}

impl AppState {
    /// Wire up state from a config and an already-connected store.
    pub fn new(config: Config, db: Db) -> Self {
        let weather = WeatherService::new(&config);
        Self {
            config,
            db,
            weather,
        }
    }
}
