#![allow(dead_code)]

use acessly::router::init_router;
use acessly::state::AppState;
use acessly_config::{CorsConfig, JwtConfig};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestAccount {
    pub id: i64,
    pub email: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 300,
        issuer: "acessly".to_string(),
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::from_list("http://localhost:5173"),
    );
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Sends one request and returns the status plus the JSON body (`Null` when
/// the body is empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Registers a user with `role` ("CANDIDATE" or "COMPANY") and logs in.
pub async fn create_account(app: &Router, name: &str, role: &str) -> TestAccount {
    let email = generate_unique_email();
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

    let token = login(app, &email, TEST_PASSWORD).await;

    TestAccount {
        id: body["id"].as_i64().unwrap(),
        email,
        token,
    }
}

pub async fn create_company(app: &Router, owner: &TestAccount, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/companies",
        Some(&owner.token),
        Some(json!({
            "userId": owner.id,
            "name": name,
            "sector": "Technology",
            "accessibilityType": "HIGH",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "company failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_candidate(app: &Router, owner: &TestAccount) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/candidates",
        Some(&owner.token),
        Some(json!({
            "userId": owner.id,
            "disabilityType": "VISUAL",
            "skills": "Rust, SQL",
            "requiredAccessibility": "Screen reader",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "candidate failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_vacancy(app: &Router, company: &TestAccount, company_id: i64, title: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/vacancies",
        Some(&company.token),
        Some(json!({
            "companyId": company_id,
            "title": title,
            "vacancyType": "REMOTE",
            "city": "Recife",
            "salary": 5000.0,
            "accessibilityOffered": "Screen reader support",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "vacancy failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn count_rows(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(pool)
        .await
        .unwrap()
}
