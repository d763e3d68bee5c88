mod common;

use auth::Role;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_success_returns_token_only() {
    let app = TestApp::spawn().await;
    app.register("nadia@example.com", "pass_word!", "patient")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nadia@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    // Token only; no profile data rides along
    assert!(body.get("user").is_none());

    let claims = app
        .authenticator
        .validate_session(body["token"].as_str().unwrap())
        .expect("issued token must validate");
    assert_eq!(claims.user.role, Role::Patient);
    assert_eq!(claims.exp - claims.iat, 360_000);
}

#[tokio::test]
async fn test_login_unknown_email_and_wrong_password_are_identical() {
    let app = TestApp::spawn().await;
    app.register("known@example.com", "pass_word!", "patient")
        .await;

    let unknown = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "whatever1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "known@example.com",
            "password": "not-the-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

    let unknown_body = unknown.text().await.expect("Failed to read body");
    let wrong_body = wrong_password.text().await.expect("Failed to read body");
    assert_eq!(unknown_body, wrong_body);

    let parsed: serde_json::Value = serde_json::from_str(&unknown_body).unwrap();
    assert_eq!(parsed["msg"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_role_mismatch() {
    let app = TestApp::spawn().await;
    app.register("pat@example.com", "pass_word!", "patient")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "pat@example.com",
            "password": "pass_word!",
            "role": "hospital"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Selected role does not match your account type");
}

#[tokio::test]
async fn test_login_matching_role_assertion() {
    let app = TestApp::spawn().await;
    app.register("sales@example.com", "pass_word!", "sales")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "sales@example.com",
            "password": "pass_word!",
            "role": "sales"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "not-an-email",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[1]["field"], "password");
}

#[tokio::test]
async fn test_login_email_matched_case_insensitively() {
    let app = TestApp::spawn().await;
    app.register("Mixed.Case@Example.com", "pass_word!", "patient")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "mixed.case@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "test@x.com",
            "password": "short",
            "first_name": "Test",
            "last_name": "User"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors[0]["field"], "password");
    assert_eq!(
        errors[0]["message"],
        "Password must be at least 6 characters long"
    );
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    let app = TestApp::spawn().await;
    app.register("dup@example.com", "pass_word!", "patient")
        .await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "DUP@example.com",
            "password": "pass_word!",
            "first_name": "Other",
            "last_name": "User"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "User already exists");
}

#[tokio::test]
async fn test_identity_fetch_with_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.register("me@example.com", "pass_word!", "crm").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["role"], "crm");
    assert_eq!(body["first_name"], "Test");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_identity_fetch_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "No token, authorization denied");
}

#[tokio::test]
async fn test_identity_fetch_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/auth/me", "garbage.token.here")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_identity_fetch_with_doubled_bearer_prefix() {
    let app = TestApp::spawn().await;
    let token = app
        .register("bearer@example.com", "pass_word!", "patient")
        .await;

    // Only one "Bearer " prefix is stripped; the rest is the token verbatim
    let response = app
        .get("/api/auth/me")
        .header("Authorization", format!("Bearer Bearer {token}"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_identity_fetch_with_expired_token() {
    let app = TestApp::spawn().await;
    app.register("expired@example.com", "pass_word!", "patient")
        .await;

    // Mint a token from the same secret that is already past expiry
    let expired = {
        use auth::Authenticator;
        let short = Authenticator::with_validity(common::TEST_SECRET, -3600);
        // The user id inside does not matter; expiry is checked first
        short
            .issue_session("00000000-0000-0000-0000-000000000000", Role::Patient)
            .unwrap()
            .token
    };

    let response = app
        .get_authenticated("/api/auth/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_preserves_role() {
    let app = TestApp::spawn().await;
    let token = app
        .register("update@example.com", "pass_word!", "hospital")
        .await;

    let response = app
        .patch_authenticated("/api/auth/me", &token)
        .json(&json!({
            "first_name": "Renamed"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["first_name"], "Renamed");
    assert_eq!(body["last_name"], "User");
    assert_eq!(body["role"], "hospital");
}
