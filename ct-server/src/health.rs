//! Liveness endpoint. No auth, no database: a 200 here means the process
//! is up and serving.
//!
//! The body is flat, not wrapped in the data envelope, so probes can
//! check `status` without digging.

use crate::state::AppState;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        environment: state.environment.clone(),
        timestamp: Utc::now(),
    })
}
