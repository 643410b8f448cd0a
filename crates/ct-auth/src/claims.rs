use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Verified identity claims from a decoded access token.
///
/// Lives for one request. `extra` captures provider-namespaced custom
/// claims, e.g. `"https://api.example.com/name"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the provider identity, `provider|subject`
    pub sub: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.len() > 256 {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// True for machine identities issued through a client-credentials
    /// grant. Those subjects carry no profile claims.
    pub fn is_machine(&self) -> bool {
        self.sub.ends_with("@clients")
    }

    /// Custom claim namespaced under the given audience, e.g.
    /// `"{audience}/name"`.
    pub fn namespaced(&self, audience: &str, claim: &str) -> Option<&str> {
        self.extra
            .get(&format!("{}/{}", audience, claim))
            .and_then(|v| v.as_str())
    }
}
