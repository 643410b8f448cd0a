//! JWKS-backed token verification.
//!
//! Keys are fetched from the provider's published key set and cached by
//! `kid`. A token signed with an unseen `kid` triggers one refetch; after
//! that the miss is an error, not a retry loop.

use crate::{AuthError, Claims, Result as AuthErrorResult, TokenVerifier};

use std::collections::HashMap;
use std::panic::Location;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::RwLock;

#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

/// Fetches and caches the provider's RSA signing keys.
pub struct JwksClient {
    http: reqwest::Client,
    uri: String,
    ttl: Duration,
    cache: RwLock<KeyCache>,
}

impl JwksClient {
    pub fn new(uri: String, ttl: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            uri,
            ttl,
            cache: RwLock::new(KeyCache {
                keys: HashMap::new(),
                fetched_at: None,
            }),
        }
    }

    /// Resolve a decoding key by `kid`, refetching the key set when the
    /// cache is stale or the kid is unknown.
    pub async fn key(&self, kid: &str) -> AuthErrorResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            if let Some(fetched_at) = cache.fetched_at
                && fetched_at.elapsed() < self.ttl
                && let Some(key) = cache.keys.get(kid)
            {
                return Ok(key.clone());
            }
        }

        let mut cache = self.cache.write().await;

        // A concurrent writer may have refreshed while we waited.
        let fresh = cache
            .fetched_at
            .is_some_and(|fetched_at| fetched_at.elapsed() < self.ttl);
        if !fresh || !cache.keys.contains_key(kid) {
            cache.keys = self.fetch().await?;
            cache.fetched_at = Some(Instant::now());
        }

        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| AuthError::UnknownKeyId {
                kid: kid.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn fetch(&self) -> AuthErrorResult<HashMap<String, DecodingKey>> {
        log::debug!("Fetching JWKS from {}", self.uri);

        let document: JwksDocument = self
            .http
            .get(&self.uri)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthError::Provider {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?
            .json()
            .await
            .map_err(|e| AuthError::Provider {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut keys = HashMap::new();
        for jwk in document.keys {
            let (Some(kid), Some(n), Some(e)) = (jwk.kid, jwk.n, jwk.e) else {
                continue;
            };
            if jwk.kty != "RSA" {
                continue;
            }
            match DecodingKey::from_rsa_components(&n, &e) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(err) => {
                    log::warn!("Skipping malformed JWKS key {}: {}", kid, err);
                }
            }
        }

        log::debug!("JWKS cache refreshed: {} keys", keys.len());
        Ok(keys)
    }
}

/// Production token verifier: JWKS key lookup + RS256 validation with
/// issuer and audience pinned to the configured tenant.
pub struct JwksVerifier {
    jwks: JwksClient,
    validation: Validation,
}

impl JwksVerifier {
    pub fn new(jwks: JwksClient, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self { jwks, validation }
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        let header = decode_header(token).map_err(|e| AuthError::JwtDecode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let kid = header.kid.ok_or_else(|| AuthError::InvalidToken {
            message: "Token header has no kid".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let key = self.jwks.key(&kid).await?;

        let token_data = decode::<Claims>(token, &key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::JwtDecode {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                },
            }
        })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
