// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup. Cloud Run injects secrets (JWT secret, weather
//! API key) as environment variables, so there is a single source.

use std::env;

/// Default location when a weather request names neither a city nor coordinates.
pub const DEFAULT_WEATHER_CITY: &str = "Münster,DE";

/// Which document store backs profiles and journeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StorageBackend::Firestore),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::Invalid {
                name: "STORAGE_BACKEND",
                reason: format!("expected 'firestore' or 'memory', got '{}'", s),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Profile/journey store
    pub storage: StorageBackend,
    /// Expected `aud` claim on access tokens
    pub jwt_audience: String,
    /// OpenWeatherMap API root (overridable for tests)
    pub weather_base_url: String,
    /// City used when a weather request has no location
    pub default_weather_city: String,

    // --- Secrets ---
    /// HS256 secret the auth service signs access tokens with (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// OpenWeatherMap API key; weather endpoints fail with 500 without it
    pub openweather_api_key: Option<String>,
}

impl Config {
    /// Config for tests: in-memory storage and no weather key.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            jwt_audience: "authenticated".to_string(),
            weather_base_url: "http://127.0.0.1:9".to_string(),
            default_weather_city: DEFAULT_WEATHER_CITY.to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            openweather_api_key: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if present (local development).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a valid port", raw),
            })?,
            Err(_) => 8080,
        };

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Firestore,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port,
            storage,
            jwt_audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".to_string()),
            weather_base_url: env::var("OPENWEATHER_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            default_weather_city: env::var("DEFAULT_WEATHER_CITY")
                .unwrap_or_else(|_| DEFAULT_WEATHER_CITY.to_string()),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .trim()
                .as_bytes()
                .to_vec(),
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .and_then(|raw| sanitize_api_key(&raw)),
        })
    }
}

/// Trim whitespace and one layer of surrounding quotes from a pasted secret.
fn sanitize_api_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed);

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("STORAGE_BACKEND", "memory");
        env::set_var("OPENWEATHER_API_KEY", "  \"abc123\"\n");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.openweather_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.jwt_audience, "authenticated");
    }

    #[test]
    fn test_sanitize_api_key() {
        assert_eq!(sanitize_api_key("'k'"), Some("k".to_string()));
        assert_eq!(sanitize_api_key("  k  "), Some("k".to_string()));
        assert_eq!(sanitize_api_key("\"\""), None);
        assert_eq!(sanitize_api_key("   "), None);
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(
            "Memory".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert_eq!(
            "firestore".parse::<StorageBackend>().unwrap(),
            StorageBackend::Firestore
        );
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
