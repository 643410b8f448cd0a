use crate::{Claims, Result as AuthErrorResult};

use async_trait::async_trait;

/// Seam between the HTTP layer and token verification.
///
/// Production uses [`crate::JwksVerifier`]; a fixed-key
/// [`crate::JwtValidator`] serves deployments with a local PEM and tests.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AuthErrorResult<Claims>;
}
