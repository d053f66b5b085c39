// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod badge;
pub mod journey;
pub mod profile;
pub mod weather;

pub use badge::{Badge, BadgeId, BadgeSummary, BADGE_CATALOG};
pub use journey::{Journey, TransportMode};
pub use profile::{ProfileSeed, UserProfile};
pub use weather::{Advisory, Severity, WeatherOutlook, WeatherSnapshot};
