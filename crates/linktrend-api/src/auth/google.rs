//! RS256 ID-token verification with JWKS key rotation
//!
//! Verifies Google-issued ID tokens against the provider's published JWKS,
//! with key caching so the JWKS endpoint is not hit on every login.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use linktrend_core::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

const DEFAULT_CACHE_TTL_SECONDS: i64 = 3600;
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// JWKS (JSON Web Key Set) structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key structure (RSA members only; Google signs ID tokens with RS256)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(rename = "kty")]
    pub key_type: String,
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,
    #[serde(rename = "n")]
    pub modulus: Option<String>,
    #[serde(rename = "e")]
    pub exponent: Option<String>,
}

/// Verified identity claims from a Google ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Cached public key with expiration
struct CachedKey {
    key: DecodingKey,
    expires_at: DateTime<Utc>,
}

/// ID-token verifier with JWKS fetch and key caching.
pub struct GoogleTokenVerifier {
    jwks_url: String,
    audience: String,
    cache: RwLock<HashMap<String, CachedKey>>,
    cache_ttl_seconds: i64,
}

impl GoogleTokenVerifier {
    /// Create a new verifier.
    ///
    /// # Arguments
    /// * `jwks_url` - JWKS endpoint (e.g., "https://www.googleapis.com/oauth2/v3/certs")
    /// * `audience` - the OAuth client id the token must be issued for
    /// * `cache_ttl_seconds` - how long to cache keys (default: 1 hour)
    pub fn new(jwks_url: String, audience: String, cache_ttl_seconds: Option<i64>) -> Self {
        Self {
            jwks_url,
            audience,
            cache: RwLock::new(HashMap::new()),
            cache_ttl_seconds: cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        }
    }

    /// Fetch JWKS from the configured URL
    async fn fetch_jwks(&self) -> Result<Jwks, AppError> {
        let response = reqwest::get(&self.jwks_url)
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(format!(
                "JWKS endpoint returned error: {}",
                response.status()
            )));
        }

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| AppError::Unauthorized(format!("Failed to parse JWKS: {}", e)))?;

        Ok(jwks)
    }

    /// Convert JWK to DecodingKey
    fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AppError> {
        if jwk.key_type != "RSA" {
            return Err(AppError::Unauthorized(format!(
                "Unsupported key type: {}",
                jwk.key_type
            )));
        }
        let n = jwk
            .modulus
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("RSA key missing modulus".to_string()))?;
        let e = jwk
            .exponent
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("RSA key missing exponent".to_string()))?;

        // jsonwebtoken's RSA support handles the base64url decoding
        DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AppError::Unauthorized(format!("Failed to create RSA key: {}", e)))
    }

    /// Get the decoding key for a key id, from cache or a fresh JWKS fetch.
    async fn get_decoding_key(&self, kid: &str) -> Result<DecodingKey, AppError> {
        let now = Utc::now();

        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(kid) {
                if cached.expires_at > now {
                    return Ok(cached.key.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;
        let expires_at = now + Duration::seconds(self.cache_ttl_seconds);
        let mut cache = self.cache.write().await;
        cache.clear();
        for jwk in &jwks.keys {
            let Some(jwk_kid) = jwk.key_id.clone() else {
                continue;
            };
            if let Ok(key) = Self::jwk_to_decoding_key(jwk) {
                cache.insert(jwk_kid, CachedKey { key, expires_at });
            }
        }

        cache
            .get(kid)
            .map(|cached| cached.key.clone())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("No JWKS key matches token key id {}", kid))
            })
    }

    /// Validate an ID token and return its verified identity claims.
    pub async fn verify(&self, token: &str) -> Result<GoogleClaims, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token header: {}", e)))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Token header missing key id".to_string()))?;

        let key = self.get_decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let data = decode::<GoogleClaims>(token, &key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Token validation failed: {}", e)))?;

        if data.claims.email.is_empty() {
            return Err(AppError::Unauthorized(
                "Token carries no email claim".to_string(),
            ));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwk_to_decoding_key_rejects_non_rsa() {
        let jwk = Jwk {
            key_type: "EC".to_string(),
            key_id: Some("k1".to_string()),
            algorithm: Some("ES256".to_string()),
            modulus: None,
            exponent: None,
        };
        assert!(GoogleTokenVerifier::jwk_to_decoding_key(&jwk).is_err());
    }

    #[test]
    fn test_jwk_to_decoding_key_requires_components() {
        let jwk = Jwk {
            key_type: "RSA".to_string(),
            key_id: Some("k1".to_string()),
            algorithm: Some("RS256".to_string()),
            modulus: None,
            exponent: Some("AQAB".to_string()),
        };
        assert!(GoogleTokenVerifier::jwk_to_decoding_key(&jwk).is_err());
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let verifier = GoogleTokenVerifier::new(
            "http://127.0.0.1:1/jwks".to_string(),
            "client-id".to_string(),
            None,
        );
        let result = verifier.verify("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
