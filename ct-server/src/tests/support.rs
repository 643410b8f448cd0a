//! Shared test fixtures: an in-memory database, a server wired to a
//! fixed-key verifier and helpers for minting signed test tokens.

use crate::state::AppState;

use ct_auth::{Claims, JwtValidator};
use ct_db::MIGRATOR;

use std::collections::HashMap;
use std::sync::Arc;

use axum_test::TestServer;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub use ct_auth::test_keys::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM, TEST_AUDIENCE, TEST_ISSUER};

/// Claims that pass issuer and audience validation.
pub fn claims_for(sub: &str, email: Option<&str>, name: Option<&str>) -> Claims {
    let mut extra = HashMap::new();
    extra.insert("iss".to_string(), serde_json::json!(TEST_ISSUER));
    extra.insert("aud".to_string(), serde_json::json!(TEST_AUDIENCE));

    Claims {
        sub: sub.to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: chrono::Utc::now().timestamp(),
        email: email.map(str::to_string),
        name: name.map(str::to_string),
        extra,
    }
}

/// Attach an audience-namespaced custom claim.
pub fn with_namespaced(mut claims: Claims, claim: &str, value: &str) -> Claims {
    claims.extra.insert(
        format!("{}/{}", TEST_AUDIENCE, claim),
        serde_json::json!(value),
    );
    claims
}

pub fn sign(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::RS256),
        claims,
        &EncodingKey::from_rsa_pem(PRIVATE_KEY_PEM.as_bytes()).unwrap(),
    )
    .unwrap()
}

/// Signed token for a human subject with sensible defaults.
pub fn token_for(sub: &str) -> String {
    sign(&claims_for(
        sub,
        Some(&format!("{}@example.com", sub.replace('|', "-"))),
        Some("Test User"),
    ))
}

pub async fn test_pool() -> SqlitePool {
    // Single connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub async fn test_state() -> AppState {
    let verifier =
        JwtValidator::with_rs256(PUBLIC_KEY_PEM, TEST_ISSUER, TEST_AUDIENCE).unwrap();

    AppState {
        pool: test_pool().await,
        verifier: Arc::new(verifier),
        audience: TEST_AUDIENCE.to_string(),
        environment: "test".to_string(),
    }
}

pub async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let server = TestServer::new(crate::routes::build_router(state.clone())).unwrap();
    (server, state)
}

/// Flip a user's stored role to admin, bypassing the API on purpose:
/// there is no role-escalation endpoint.
pub async fn promote_to_admin(pool: &SqlitePool, external_id: &str) {
    sqlx::query("UPDATE users SET role = 'admin' WHERE external_id = ?")
        .bind(external_id)
        .execute(pool)
        .await
        .unwrap();
}
