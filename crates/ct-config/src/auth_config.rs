use crate::{ConfigError, ConfigErrorResult, DEFAULT_JWKS_CACHE_TTL_SECS};

use serde::Deserialize;

/// Identity provider settings.
///
/// Tokens are always verified with an asymmetric key: either fetched from
/// the provider's JWKS endpoint (`domain`) or read from a local PEM file
/// (`jwt_public_key_path`). There is deliberately no shared-secret option.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Identity provider tenant domain, e.g. "your-tenant.auth0.com"
    pub domain: String,
    /// Expected token audience
    pub audience: String,
    /// Local RS256 public key PEM, used instead of JWKS when set
    pub jwt_public_key_path: Option<String>,
    /// How long fetched JWKS keys are served from cache
    pub jwks_cache_ttl_secs: u64,
    /// Client-credentials pair for the provider's management API
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::from("your-tenant.auth0.com"),
            audience: String::from("https://api.concert-tickets.com"),
            jwt_public_key_path: None,
            jwks_cache_ttl_secs: DEFAULT_JWKS_CACHE_TTL_SECS,
            client_id: None,
            client_secret: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.domain.is_empty() {
            return Err(ConfigError::auth("auth.domain must not be empty"));
        }

        if self.audience.is_empty() {
            return Err(ConfigError::auth("auth.audience must not be empty"));
        }

        if self.client_id.is_some() != self.client_secret.is_some() {
            return Err(ConfigError::auth(
                "auth.client_id and auth.client_secret must be set together",
            ));
        }

        Ok(())
    }

    /// Token issuer derived from the tenant domain.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// JWKS document URL for the tenant.
    pub fn jwks_uri(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}
