//! Router-level tests for the auth endpoints

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use staffhub_server::{Config, ServerState, build_service};
use tower::ServiceExt;

async fn test_app() -> (tempfile::TempDir, Router) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (tmp, build_service(state))
}

async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body, set_cookie)
}

async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn register_login_me_round_trip() {
    let (_tmp, app) = test_app().await;

    let (status, account, _) = post(
        &app,
        "/api/auth/register",
        None,
        json!({"name": "Ada Lovelace", "email": "ada@x.com", "password": "Passw0rd"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account["name"], "Ada Lovelace");
    assert!(account.get("hashPass").is_none());

    let (status, login, cookie) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "ada@x.com", "password": "Passw0rd"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap();
    let cookie = cookie.expect("login sets the session cookie");
    assert!(cookie.starts_with("staffhub_session="));
    assert!(cookie.contains("HttpOnly"));

    let (status, me) = get(&app, "/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@x.com");
    assert_eq!(me["id"], login["user"]["id"]);
}

#[tokio::test]
async fn register_enforces_password_rules() {
    let (_tmp, app) = test_app().await;

    let cases = [
        ("short", "Ab1", "Password must be at least 6 characters long"),
        (
            "no-upper",
            "abcdef1",
            "Password must contain at least one uppercase letter",
        ),
        (
            "no-digit",
            "Abcdefg",
            "Password must contain at least one number",
        ),
    ];

    for (label, password, expected) in cases {
        let (status, body, _) = post(
            &app,
            "/api/auth/register",
            None,
            json!({"name": "Ada", "email": "ada@x.com", "password": password}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{label}");
        assert_eq!(body["message"], expected, "{label}");
    }

    let (status, body, _) = post(
        &app,
        "/api/auth/register",
        None,
        json!({"name": "Ada", "email": "not-an-email", "password": "Passw0rd"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn duplicate_account_email_conflicts() {
    let (_tmp, app) = test_app().await;

    let payload = json!({"name": "Ada", "email": "ada@x.com", "password": "Passw0rd"});
    let (status, _, _) = post(&app, "/api/auth/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body, _) = post(&app, "/api/auth/register", None, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "An account with this email already exists");
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let (_tmp, app) = test_app().await;

    post(
        &app,
        "/api/auth/register",
        None,
        json!({"name": "Ada", "email": "ada@x.com", "password": "Passw0rd"}),
    )
    .await;

    // Unknown account and wrong password produce the same message
    let (status, body, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "nobody@x.com", "password": "Passw0rd"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "ada@x.com", "password": "Wrong0pass"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (_tmp, app) = test_app().await;

    post(
        &app,
        "/api/auth/register",
        None,
        json!({"name": "Ada", "email": "ada@x.com", "password": "Passw0rd"}),
    )
    .await;
    let (_, login, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "ada@x.com", "password": "Passw0rd"}),
    )
    .await;
    let token = login["token"].as_str().unwrap();

    let (status, _, cookie) = post(&app, "/api/auth/logout", Some(token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.expect("logout clears the session cookie");
    assert!(cookie.starts_with("staffhub_session=;"));
    assert!(cookie.contains("Max-Age=0"));
}
