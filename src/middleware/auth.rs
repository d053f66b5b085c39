// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.
//!
//! Access tokens are HS256 JWTs issued by the managed auth service. The
//! verified identity is attached to the request as an [`AuthUser`] extension.

use crate::models::ProfileSeed;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the access token for browser sessions.
pub const TOKEN_COOKIE: &str = "green_token";

/// Profile fields the auth service stores alongside the account.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Audience
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl AuthUser {
    /// Identity details for lazily creating this user's profile.
    pub fn seed(&self) -> ProfileSeed {
        ProfileSeed {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let claims = verify_jwt(
        &token,
        &state.config.jwt_signing_key,
        &state.config.jwt_audience,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        StatusCode::UNAUTHORIZED
    })?;

    if claims.sub.trim().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        name: claims.user_metadata.name,
    });

    Ok(next.run(request).await)
}

/// Verify signature, expiry, and audience of an access token.
pub fn verify_jwt(
    token: &str,
    signing_key: &[u8],
    audience: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

/// Create an access token (development tooling and tests).
pub fn create_jwt(
    user_id: &str,
    email: Option<&str>,
    name: Option<&str>,
    signing_key: &[u8],
    audience: &str,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 60 * 60, // 1 hour
        aud: audience.to_string(),
        email: email.map(String::from),
        user_metadata: UserMetadata {
            name: name.map(String::from),
        },
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"unit_test_signing_key_0123456789";

    #[test]
    fn test_create_and_verify_round_trip() {
        let token = create_jwt("user-1", Some("a@b.de"), Some("Ada"), KEY, "authenticated")
            .unwrap();
        let claims = verify_jwt(&token, KEY, "authenticated").unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("a@b.de"));
        assert_eq!(claims.user_metadata.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = create_jwt("user-1", None, None, KEY, "anon").unwrap();
        assert!(verify_jwt(&token, KEY, "authenticated").is_err());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = create_jwt("user-1", None, None, KEY, "authenticated").unwrap();
        assert!(verify_jwt(&token, b"another_key_entirely_0123456789", "authenticated").is_err());
    }

    #[test]
    fn test_claims_without_metadata_decode() {
        // Tokens for accounts without profile metadata omit `email` and `user_metadata`.
        let json = serde_json::json!({
            "sub": "user-2",
            "exp": 1,
            "iat": 0,
            "aud": "authenticated"
        });
        let claims: Claims = serde_json::from_value(json).unwrap();
        assert!(claims.email.is_none());
        assert!(claims.user_metadata.name.is_none());
    }

    #[test]
    fn test_seed_carries_identity() {
        let user = AuthUser {
            user_id: "user-3".to_string(),
            email: None,
            name: Some("Bo".to_string()),
        };
        let seed = user.seed();
        assert_eq!(seed.user_id, "user-3");
        assert_eq!(seed.name.as_deref(), Some("Bo"));
    }
}
