use crate::tests::support::test_server;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn concert_body(title: &str, location: &str, date: &str) -> Value {
    json!({
        "title": title,
        "location": location,
        "date": date,
        "maxSeats": 250
    })
}

#[tokio::test]
async fn create_returns_created_concert() {
    let (server, _) = test_server().await;

    let response = server
        .post("/api/v1/concerts")
        .json(&concert_body(
            "Opening Night",
            "Munich Hall",
            "2026-10-01T19:30:00Z",
        ))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["title"], "Opening Night");
    assert_eq!(body["data"]["maxSeats"], 250);
    assert_eq!(body["data"]["status"], "scheduled");
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn duplicate_location_and_time_is_rejected() {
    let (server, _) = test_server().await;

    let body = concert_body("First", "Munich Hall", "2026-10-01T19:30:00Z");
    server
        .post("/api/v1/concerts")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = concert_body("Second", "Munich Hall", "2026-10-01T19:30:00Z");
    let response = server.post("/api/v1/concerts").json(&duplicate).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let error: Value = response.json();
    assert_eq!(error["status"], "error");
    assert_eq!(
        error["message"],
        "A concert at this location and time already exists"
    );
}

#[tokio::test]
async fn validation_failures_are_aggregated() {
    let (server, _) = test_server().await;

    let response = server
        .post("/api/v1/concerts")
        .json(&json!({"date": "whenever", "maxSeats": -5}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("title is required"));
    assert!(message.contains("location is required"));
    assert!(message.contains("date must be a valid ISO 8601 timestamp"));
    assert!(message.contains("maxSeats must be a positive integer"));
}

#[tokio::test]
async fn listing_orders_by_date_and_skips_deleted() {
    let (server, _) = test_server().await;

    let later: Value = server
        .post("/api/v1/concerts")
        .json(&concert_body("Later", "Venue A", "2026-12-01T20:00:00Z"))
        .await
        .json();
    server
        .post("/api/v1/concerts")
        .json(&concert_body("Sooner", "Venue B", "2026-11-01T20:00:00Z"))
        .await
        .assert_status(StatusCode::CREATED);

    let deleted_id = later["data"]["id"].as_str().unwrap();
    server
        .delete(&format!("/api/v1/concerts/{}", deleted_id))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/api/v1/concerts").await.json();
    let concerts = body["data"].as_array().unwrap();
    assert_eq!(concerts.len(), 1);
    assert_eq!(concerts[0]["title"], "Sooner");
}

#[tokio::test]
async fn deleted_concert_stays_fetchable_by_id() {
    let (server, _) = test_server().await;

    let created: Value = server
        .post("/api/v1/concerts")
        .json(&concert_body("Farewell", "Venue C", "2026-11-15T20:00:00Z"))
        .await
        .json();
    let id = created["data"]["id"].as_str().unwrap();

    let deleted: Value = server
        .delete(&format!("/api/v1/concerts/{}", id))
        .await
        .json();
    assert!(deleted["data"]["deletedAt"].is_string());

    let response = server.get(&format!("/api/v1/concerts/{}", id)).await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Farewell");
    assert!(body["data"]["deletedAt"].is_string());
}

#[tokio::test]
async fn unknown_and_malformed_ids_answer_not_found() {
    let (server, _) = test_server().await;

    for id in ["junk", "00000000-0000-0000-0000-000000000000"] {
        let response = server.get(&format!("/api/v1/concerts/{}", id)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["message"], "Concert not found");
    }

    let response = server
        .delete("/api/v1/concerts/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
