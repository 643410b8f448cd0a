use crate::tests::support::test_server;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok_without_auth() {
    let (server, _) = test_server().await;

    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);

    // Flat body, not the data envelope
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());
    assert!(body.get("data").is_none());
}
