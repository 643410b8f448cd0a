//! Client for the identity provider's management API.
//!
//! Uses a separate client-credentials token with higher privileges than
//! end-user tokens. The token is cached in-process and refreshed under a
//! mutex held across the fetch, so concurrent callers wait on one in-flight
//! refresh instead of stampeding the provider.

use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: String,
    grant_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// User record as returned by the management API.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagedUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub struct ManagementClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    cache: Mutex<Option<CachedToken>>,
}

impl ManagementClient {
    /// `base_url` is the provider origin, e.g. `https://tenant.auth0.com`.
    pub fn new(base_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            cache: Mutex::new(None),
        }
    }

    /// Get a management API token, reusing the cached one while valid.
    ///
    /// The cache lock is held across the refresh request. That serializes
    /// refreshes: callers racing an expired token all wait for the first
    /// fetch and then read the stored result.
    async fn token(&self) -> AuthErrorResult<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref()
            && Instant::now() < cached.expires_at
        {
            return Ok(cached.token.clone());
        }

        let request = TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            audience: format!("{}/api/v2/", self.base_url),
            grant_type: "client_credentials",
        };

        let response = self
            .http
            .post(format!("{}/oauth/token", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthError::Provider {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::ManagementToken {
                status: response.status(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: TokenResponse = response.json().await.map_err(|e| AuthError::Provider {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Expire at 80% of the provider's stated lifetime so we never
        // present a token on the edge of rejection.
        let lifetime = Duration::from_secs(body.expires_in).mul_f64(0.8);
        let token = body.access_token.clone();

        *cache = Some(CachedToken {
            token: body.access_token,
            expires_at: Instant::now() + lifetime,
        });

        log::debug!("Management token refreshed, valid for {:?}", lifetime);
        Ok(token)
    }

    /// Fetch user details from the management API.
    pub async fn get_user(&self, user_id: &str) -> AuthErrorResult<ManagedUser> {
        let token = self.token().await?;

        self.http
            .get(format!("{}/api/v2/users/{}", self.base_url, user_id))
            .bearer_auth(token)
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
            })
    }

    /// Assign provider roles to a user. This is the only role-mutation
    /// path; no HTTP endpoint of this service changes roles.
    pub async fn assign_roles(&self, user_id: &str, role_ids: &[String]) -> AuthErrorResult<()> {
        let token = self.token().await?;

        self.http
            .post(format!("{}/api/v2/users/{}/roles", self.base_url, user_id))
            .bearer_auth(token)
            .json(&serde_json::json!({ "roles": role_ids }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthError::Provider {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }
}
