use ct_auth::TokenVerifier;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state, cloned per request.
///
/// Components are constructed once in `main` and injected here; nothing is
/// held as ambient process state.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Token audience, also the namespace prefix for custom claims
    pub audience: String,
    /// Deployment environment name, reported by the health endpoint
    pub environment: String,
}
