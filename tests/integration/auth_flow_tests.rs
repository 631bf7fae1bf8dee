//! Signup, login, profile and gate behaviour over HTTP.
use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use travelog_backend::auth::{Claims, TokenService, DEFAULT_TOKEN_TTL};
use uuid::Uuid;

use crate::test_utils::{file_app, memory_app, send, signup};

#[tokio::test]
async fn signup_returns_token_and_public_user() {
    let (app, state, _) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/create-account",
        None,
        Some(json!({"fullName": "Ann Lee", "email": "ann@example.com", "password": "Abcdef1@"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["error"], false);
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert_eq!(body["user"]["fullName"], "Ann Lee");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["accessToken"].as_str().unwrap();
    let user_id = state.tokens.verify(token).unwrap();

    let (status, profile) = send(&app, Method::GET, "/get-user", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["id"], user_id.to_string());
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let (app, _, _) = memory_app();
    signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/create-account",
        None,
        Some(json!({"fullName": "Other Person", "email": "ann@example.com", "password": "Zyxwv9#q"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_002");
}

#[tokio::test]
async fn invalid_signup_lists_all_violations() {
    let (app, _, _) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/create-account",
        None,
        Some(json!({"email": "not-an-email", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");
    // name, email, uppercase, digit, symbol
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn login_with_wrong_password_issues_no_token() {
    let (app, _, _) = memory_app();
    signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "ann@example.com", "password": "wrong"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "AUTH_002");
    assert!(body.get("accessToken").is_none());
}

#[tokio::test]
async fn login_outcomes() {
    let (app, state, _) = memory_app();
    let signup_token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let user_id = state.tokens.verify(&signup_token).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "ann@example.com", "password": "Abcdef1@"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["fullName"], "Ann Lee");
    let token = body["accessToken"].as_str().unwrap();
    assert_eq!(state.tokens.verify(token).unwrap(), user_id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "Abcdef1@"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "NF_001");

    let (status, body) = send(&app, Method::POST, "/login", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn overlong_login_email_on_disk_is_not_found() {
    let (app, _, _temp_dir) = file_app();
    signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let email = format!("{}@example.com", "a".repeat(250));

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": email, "password": "Abcdef1@"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "NF_001");
}

#[tokio::test]
async fn malformed_json_is_invalid_input() {
    let (app, _, _) = memory_app();

    let (status, body) = send(&app, Method::POST, "/login", None, Some(json!("just a string"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let (app, state, _) = memory_app();
    let token = signup(&app, "Ann Lee", "ann@example.com", "Abcdef1@").await;
    let user_id = state.tokens.verify(&token).unwrap();

    let (status, _) = send(&app, Method::GET, "/get-user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/get-user", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = TokenService::new(b"someone-else", DEFAULT_TOKEN_TTL)
        .issue(user_id)
        .unwrap();
    let (status, _) = send(&app, Method::GET, "/get-user", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let now = Utc::now().timestamp();
    let expired = state
        .tokens
        .sign(&Claims {
            user_id,
            iat: now - 7200,
            exp: now - 3600,
        })
        .unwrap();
    let (status, body) = send(&app, Method::GET, "/get-user", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_001");
}

#[tokio::test]
async fn token_for_missing_account_is_unauthenticated() {
    let (app, state, _) = memory_app();
    let ghost = state.tokens.issue(Uuid::new_v4()).unwrap();

    let (status, _) = send(&app, Method::GET, "/get-user", Some(&ghost), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
