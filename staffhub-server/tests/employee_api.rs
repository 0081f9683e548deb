//! Router-level tests for the employee CRUD endpoints

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

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Register an account and log in, returning (session token, account id)
async fn register_and_login(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": name, "email": email, "password": "Passw0rd"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "Passw0rd"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

fn ada_payload() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@x.com",
        "phone": "+1234567890",
        "role": "Admin"
    })
}

#[tokio::test]
async fn create_then_list_is_owner_scoped() {
    let (_tmp, app) = test_app().await;
    let (u1, u1_id) = register_and_login(&app, "User One", "u1@example.com").await;
    let (u2, _) = register_and_login(&app, "User Two", "u2@example.com").await;

    let (status, created) =
        send(&app, "POST", "/api/employees", Some(&u1), Some(ada_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["role"], "Admin");
    assert_eq!(created["createdBy"], u1_id);
    assert!(created["createdAt"].as_i64().unwrap() > 0);

    let (status, list) = send(&app, "GET", "/api/employees", Some(&u1), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "ada@x.com");

    // The record is invisible to the other account
    let (status, list) = send(&app, "GET", "/api/employees", Some(&u2), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_missing_field_names_the_first_one() {
    let (_tmp, app) = test_app().await;
    let (token, _) = register_and_login(&app, "User", "u@example.com").await;

    let mut payload = ada_payload();
    payload.as_object_mut().unwrap().remove("phone");
    let (status, body) = send(&app, "POST", "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "phone is required");

    // Several missing: the first in wire order is reported
    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&token),
        Some(json!({"email": "x@y.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "firstName is required");

    // An empty value counts as missing
    let mut payload = ada_payload();
    payload["lastName"] = json!("   ");
    let (status, body) = send(&app, "POST", "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "lastName is required");

    // No write happened
    let (_, list) = send(&app, "GET", "/api/employees", Some(&token), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_validates_formats() {
    let (_tmp, app) = test_app().await;
    let (token, _) = register_and_login(&app, "User", "u@example.com").await;

    let mut payload = ada_payload();
    payload["email"] = json!("not-an-email");
    let (status, body) = send(&app, "POST", "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");

    let mut payload = ada_payload();
    payload["phone"] = json!("12345");
    let (status, body) = send(&app, "POST", "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid phone format");

    // Out-of-enumeration role never persists
    let mut payload = ada_payload();
    payload["role"] = json!("Manager");
    let (status, _) = send(&app, "POST", "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = send(&app, "GET", "/api/employees", Some(&token), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_across_owners() {
    let (_tmp, app) = test_app().await;
    let (u1, _) = register_and_login(&app, "User One", "u1@example.com").await;
    let (u2, _) = register_and_login(&app, "User Two", "u2@example.com").await;

    let (status, _) = send(&app, "POST", "/api/employees", Some(&u1), Some(ada_payload())).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same email anywhere blocks creation, regardless of owner
    let (status, body) =
        send(&app, "POST", "/api/employees", Some(&u2), Some(ada_payload())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
    assert_eq!(body["message"], "An employee with this email already exists");
}

#[tokio::test]
async fn update_merges_partially_and_hides_foreign_records() {
    let (_tmp, app) = test_app().await;
    let (u1, _) = register_and_login(&app, "User One", "u1@example.com").await;
    let (u2, _) = register_and_login(&app, "User Two", "u2@example.com").await;

    let (_, created) = send(&app, "POST", "/api/employees", Some(&u1), Some(ada_payload())).await;
    let id = created["id"].as_str().unwrap();

    // Foreign update: not-found, indistinguishable from a missing id
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(&u2),
        Some(json!({"phone": "+1999999999"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/employees/employee:nonexistent",
        Some(&u1),
        Some(json!({"phone": "+1999999999"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Partial update changes only the supplied field
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(&u1),
        Some(json!({"role": "Staff"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "Staff");
    assert_eq!(updated["firstName"], "Ada");
    assert_eq!(updated["phone"], "+1234567890");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn delete_acknowledges_once() {
    let (_tmp, app) = test_app().await;
    let (u1, _) = register_and_login(&app, "User One", "u1@example.com").await;
    let (u2, _) = register_and_login(&app, "User Two", "u2@example.com").await;

    let (_, created) = send(&app, "POST", "/api/employees", Some(&u1), Some(ada_payload())).await;
    let id = created["id"].as_str().unwrap();

    // Foreign delete: not-found, and the record survives
    let (status, _) =
        send(&app, "DELETE", &format!("/api/employees/{id}"), Some(&u2), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&app, "GET", "/api/employees", Some(&u1), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) =
        send(&app, "DELETE", &format!("/api/employees/{id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    // Second delete of the same id fails
    let (status, _) =
        send(&app, "DELETE", &format!("/api/employees/{id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn all_operations_require_a_session() {
    let (_tmp, app) = test_app().await;

    let cases = [
        ("GET", "/api/employees".to_string(), None),
        ("POST", "/api/employees".to_string(), Some(ada_payload())),
        (
            "PUT",
            "/api/employees/employee:x".to_string(),
            Some(json!({"role": "Staff"})),
        ),
        ("DELETE", "/api/employees/employee:x".to_string(), None),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&app, method, &uri, None, body.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(response["code"], "E3001");

        let (status, _) = send(&app, method, &uri, Some("garbage-token"), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri} bad token");
    }
}
