use crate::tests::support::{
    claims_for, promote_to_admin, sign, test_server, token_for, with_namespaced,
};

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let (server, _) = test_server().await;

    let response = server.get("/api/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let (server, _) = test_server().await;

    let response = server
        .get("/api/users/me")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn wrong_scheme_is_unauthorized() {
    let (server, _) = test_server().await;

    let response = server
        .get("/api/users/me")
        .add_header("authorization", "Basic dXNlcjpwYXNz")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn first_login_creates_account() {
    let (server, state) = test_server().await;

    let token = sign(&claims_for(
        "auth0|alice",
        Some("alice@example.com"),
        Some("Alice"),
    ));
    let response = server
        .get("/api/users/me")
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["externalId"], "auth0|alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["displayName"], "Alice");
    assert_eq!(body["data"]["role"], "user");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn repeated_logins_keep_one_account() {
    let (server, state) = test_server().await;

    let token = token_for("auth0|bob");
    let first: Value = server
        .get("/api/users/me")
        .authorization_bearer(&token)
        .await
        .json();
    let second: Value = server
        .get("/api/users/me")
        .authorization_bearer(&token)
        .await
        .json();

    assert_eq!(first["data"]["id"], second["data"]["id"]);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn namespaced_name_claim_wins_over_standard_name() {
    let (server, _) = test_server().await;

    let claims = with_namespaced(
        claims_for("auth0|carol", Some("carol@example.com"), Some("Fallback")),
        "name",
        "Carol Custom",
    );
    let response = server
        .get("/api/users/me")
        .authorization_bearer(&sign(&claims))
        .await;

    let body: Value = response.json();
    assert_eq!(body["data"]["displayName"], "Carol Custom");
}

#[tokio::test]
async fn machine_token_maps_to_service_account() {
    let (server, _) = test_server().await;

    let claims = claims_for("svc123@clients", None, None);
    let response = server
        .get("/api/users/me")
        .authorization_bearer(&sign(&claims))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "api-service@concert-tickets.com");
    assert_eq!(body["data"]["displayName"], "API Service");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn update_me_changes_display_name() {
    let (server, _) = test_server().await;

    let token = token_for("auth0|dave");
    let response = server
        .put("/api/users/me")
        .authorization_bearer(&token)
        .json(&json!({"displayName": "Dave Updated"}))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["displayName"], "Dave Updated");
}

#[tokio::test]
async fn update_me_rejects_short_display_name() {
    let (server, _) = test_server().await;

    let response = server
        .put("/api/users/me")
        .authorization_bearer(&token_for("auth0|erin"))
        .json(&json!({"displayName": "E"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("between 2 and 255 characters")
    );
}

#[tokio::test]
async fn update_me_rejects_null_display_name() {
    let (server, _) = test_server().await;

    let response = server
        .put("/api/users/me")
        .authorization_bearer(&token_for("auth0|frank"))
        .json(&json!({"displayName": null}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("between 2 and 255 characters")
    );
}

#[tokio::test]
async fn listing_requires_admin_role() {
    let (server, _) = test_server().await;

    let response = server
        .get("/api/users")
        .authorization_bearer(&token_for("auth0|pleb"))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn admin_lists_users_with_pagination() {
    let (server, state) = test_server().await;

    // Three accounts, then promote one
    for sub in ["auth0|admin", "auth0|user1", "auth0|user2"] {
        server
            .get("/api/users/me")
            .authorization_bearer(&token_for(sub))
            .await
            .assert_status(StatusCode::OK);
    }
    promote_to_admin(&state.pool, "auth0|admin").await;

    let response = server
        .get("/api/users")
        .add_query_param("limit", "2")
        .authorization_bearer(&token_for("auth0|admin"))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn admin_search_filters_by_email() {
    let (server, state) = test_server().await;

    for sub in ["auth0|admin", "auth0|needle", "auth0|other"] {
        server
            .get("/api/users/me")
            .authorization_bearer(&token_for(sub))
            .await
            .assert_status(StatusCode::OK);
    }
    promote_to_admin(&state.pool, "auth0|admin").await;

    let response = server
        .get("/api/users")
        .add_query_param("search", "needle")
        .authorization_bearer(&token_for("auth0|admin"))
        .await;

    let body: Value = response.json();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["externalId"], "auth0|needle");
}

#[tokio::test]
async fn listing_rejects_bad_query_params() {
    let (server, state) = test_server().await;

    server
        .get("/api/users/me")
        .authorization_bearer(&token_for("auth0|admin"))
        .await
        .assert_status(StatusCode::OK);
    promote_to_admin(&state.pool, "auth0|admin").await;

    let response = server
        .get("/api/users")
        .add_query_param("page", "zero")
        .add_query_param("limit", "9000")
        .authorization_bearer(&token_for("auth0|admin"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("page must be a positive integer"));
    assert!(message.contains("limit must be between 1 and 100"));
}

#[tokio::test]
async fn admin_fetches_user_by_id() {
    let (server, state) = test_server().await;

    let me: Value = server
        .get("/api/users/me")
        .authorization_bearer(&token_for("auth0|target"))
        .await
        .json();
    server
        .get("/api/users/me")
        .authorization_bearer(&token_for("auth0|admin"))
        .await
        .assert_status(StatusCode::OK);
    promote_to_admin(&state.pool, "auth0|admin").await;

    let id = me["data"]["id"].as_str().unwrap();
    let response = server
        .get(&format!("/api/users/{}", id))
        .authorization_bearer(&token_for("auth0|admin"))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["externalId"], "auth0|target");
}

#[tokio::test]
async fn malformed_and_unknown_ids_both_answer_not_found() {
    let (server, state) = test_server().await;

    server
        .get("/api/users/me")
        .authorization_bearer(&token_for("auth0|admin"))
        .await
        .assert_status(StatusCode::OK);
    promote_to_admin(&state.pool, "auth0|admin").await;
    let admin = token_for("auth0|admin");

    for id in ["not-a-uuid", "00000000-0000-0000-0000-000000000000"] {
        let response = server
            .get(&format!("/api/users/{}", id))
            .authorization_bearer(&admin)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "User not found");
    }
}
