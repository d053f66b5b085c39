// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather-conditioned travel advice.
//!
//! Rules are checked in a fixed order and every match is reported, so one
//! condition can produce several messages (e.g. snow + bike yields both the
//! snow alert and the severe-weather alert).

use crate::models::{Advisory, Severity, TransportMode, WeatherOutlook, WeatherSnapshot};

/// Wind speed (km/h) above which rain counts as severe weather.
const SEVERE_RAIN_WIND_KMH: f64 = 30.0;
/// Wind speed (km/h) above which cycling gets a wind warning.
const CYCLING_WIND_WARNING_KMH: f64 = 40.0;
/// Wind speed (km/h) above which public transport is always recommended.
const PUBLIC_TRANSPORT_WIND_KMH: f64 = 50.0;
/// 10 m/s: the outlook's threshold for calling it windy.
const WINDY_OUTLOOK_KMH: f64 = 36.0;

fn advisory(message: &str, severity: Severity, icon: &str) -> Advisory {
    Advisory {
        message: message.to_string(),
        severity,
        icon: icon.to_string(),
    }
}

/// Thunderstorm, snow, or rain with strong wind.
pub fn is_severe_weather(weather: &WeatherSnapshot) -> bool {
    weather.is("thunderstorm")
        || weather.is("snow")
        || (weather.is("rain") && weather.wind_speed > SEVERE_RAIN_WIND_KMH)
}

/// Advice for travelling by `mode` in the given weather.
///
/// Returns nothing when no weather is available.
pub fn advise(weather: Option<&WeatherSnapshot>, mode: TransportMode) -> Vec<Advisory> {
    let Some(weather) = weather else {
        return Vec::new();
    };

    let mut advice = Vec::new();
    let wet = weather.is("rain") || weather.is("drizzle");
    let snow = weather.is("snow");

    if wet && mode.is_cycling() {
        advice.push(advisory(
            "🧥 Consider wearing a weatherproof jacket for cycling in the rain",
            Severity::Warning,
            "🚴‍♂️",
        ));
    }
    if wet && mode == TransportMode::Walk {
        advice.push(advisory(
            "☔ Bring an umbrella and wear a warm jacket",
            Severity::Warning,
            "🚶‍♂️",
        ));
    }

    if snow && mode.is_cycling() {
        advice.push(advisory(
            "⚠️ Cycling in snow can be dangerous. Consider public transport instead",
            Severity::Alert,
            "❄️",
        ));
    }
    if snow && mode == TransportMode::Walk {
        advice.push(advisory(
            "🧥 Wear warm, waterproof clothing and be careful of icy surfaces",
            Severity::Alert,
            "🚶‍♂️",
        ));
    }
    if snow && mode.is_public_transport() {
        advice.push(advisory(
            "✅ Public transport is a safer option in snowy conditions",
            Severity::Info,
            "🚌",
        ));
    }

    if is_severe_weather(weather) && mode.is_exposed() {
        advice.push(advisory(
            "🚌 Weather conditions are deteriorating. We strongly recommend using public transport",
            Severity::Alert,
            "⚠️",
        ));
    }

    if weather.temp < 5.0 && mode.is_exposed() {
        advice.push(advisory(
            "🧊 It's cold outside! Dress warmly with gloves and a hat",
            Severity::Info,
            "❄️",
        ));
    }
    if weather.temp > 30.0 && mode.is_exposed() {
        advice.push(advisory(
            "☀️ It's very hot! Stay hydrated and consider sun protection",
            Severity::Info,
            "💧",
        ));
    }

    if weather.wind_speed > CYCLING_WIND_WARNING_KMH && mode.is_cycling() {
        advice.push(advisory(
            "💨 Strong winds may make cycling difficult. Consider alternative transport",
            Severity::Warning,
            "🌬️",
        ));
    }

    // Encouragement covers bike and walk only, not e-bike.
    if weather.is("clear")
        && (15.0..=25.0).contains(&weather.temp)
        && matches!(mode, TransportMode::Bike | TransportMode::Walk)
    {
        advice.push(advisory(
            "✨ Perfect weather for outdoor travel! Enjoy your journey",
            Severity::Info,
            "🌟",
        ));
    }

    advice
}

/// Whether the weather is bad enough to steer every traveller to public transport.
pub fn should_recommend_public_transport(weather: Option<&WeatherSnapshot>) -> bool {
    let Some(weather) = weather else {
        return false;
    };

    weather.is("thunderstorm")
        || weather.is("snow")
        || (weather.is("rain") && weather.wind_speed > SEVERE_RAIN_WIND_KMH)
        || weather.wind_speed > PUBLIC_TRANSPORT_WIND_KMH
}

/// Summarize the weather independently of any transport mode.
pub fn outlook(weather: &WeatherSnapshot) -> WeatherOutlook {
    let raining = weather.condition.contains("rain");
    let snowing = weather.condition.contains("snow");
    let temp = weather.temp;

    let (recommendation, transport_suggestion, weather_tip) = if raining || snowing {
        (
            "Weather Alert",
            "public transport or car",
            if raining {
                "🌧️ Rainy conditions - Public transport or car recommended. If cycling, wear a rainproof jacket!"
            } else {
                "❄️ Snowy conditions - Public transport or car recommended for safety."
            },
        )
    } else if temp < 5.0 {
        (
            "Cold Weather",
            "any mode with warm clothing",
            "🥶 Cold weather - Dress warmly! Public transport keeps you warm.",
        )
    } else if temp > 25.0 {
        (
            "Hot Weather",
            "cycling with hydration",
            "☀️ Hot weather - Stay hydrated! Cycling recommended with sun protection.",
        )
    } else if weather.wind_speed > WINDY_OUTLOOK_KMH {
        (
            "Windy Conditions",
            "public transport",
            "💨 Windy conditions - Public transport recommended for comfort.",
        )
    } else {
        (
            "Perfect Conditions",
            "cycling or walking",
            "✨ Perfect weather for cycling or walking! Enjoy the eco-friendly journey.",
        )
    };

    let dry = !raining && !snowing;

    WeatherOutlook {
        recommendation: recommendation.to_string(),
        transport_suggestion: transport_suggestion.to_string(),
        weather_tip: weather_tip.to_string(),
        is_good_for_cycling: dry
            && temp > 5.0
            && temp < 30.0
            && weather.wind_speed < WINDY_OUTLOOK_KMH,
        is_good_for_walking: dry && temp > 0.0 && temp < 30.0,
    }
}
