mod common;

use axum::http::StatusCode;
use common::{count_rows, create_account, create_company, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_support_lifecycle(pool: PgPool) {
    let app = setup_test_app(pool);
    let owner = create_account(&app, "Owner", "COMPANY").await;
    let company_id = create_company(&app, &owner, "Acme").await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/company-support",
        Some(&owner.token),
        Some(json!({
            "companyId": company_id,
            "supportType": "Sign language interpreter",
            "description": "Available for all interviews",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["companyId"], company_id);
    let path = format!("/api/company-support/{}", created["id"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &path,
        Some(&owner.token),
        Some(json!({
            "companyId": company_id,
            "supportType": "Screen reader",
            "description": "NVDA licenses on every workstation",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["supportType"], "Screen reader");

    let (status, fetched) = send(&app, "GET", &path, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, _) = send(&app, "DELETE", &path, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &path, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Company support not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_support_integrity_checks(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let owner = create_account(&app, "Owner", "COMPANY").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/company-support",
        Some(&owner.token),
        Some(json!({ "supportType": "Ramp", "description": "Main entrance" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "companyId required");

    let (status, body) = send(
        &app,
        "POST",
        "/api/company-support",
        Some(&owner.token),
        Some(json!({ "companyId": 5555, "supportType": "Ramp", "description": "Main entrance" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Company not found");

    let candidate = create_account(&app, "Ana", "CANDIDATE").await;
    let company_id = create_company(&app, &owner, "Acme").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/company-support",
        Some(&candidate.token),
        Some(json!({ "companyId": company_id, "supportType": "Ramp", "description": "Main entrance" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM company_supports").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_support_listings(pool: PgPool) {
    let app = setup_test_app(pool);
    let owner = create_account(&app, "Owner", "COMPANY").await;
    let acme = create_company(&app, &owner, "Acme").await;
    let beta = create_company(&app, &owner, "Beta").await;

    for (company_id, support_type) in [
        (acme, "Sign language interpreter"),
        (acme, "Flexible schedule"),
        (beta, "Sign language classes"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/company-support",
            Some(&owner.token),
            Some(json!({
                "companyId": company_id,
                "supportType": support_type,
                "description": "Offered on request",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", "/api/company-support?supportType=sign", Some(&owner.token), None).await;
    assert_eq!(body["totalElements"], 2);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/company-support?supportType=sign&companyId={}", acme),
        Some(&owner.token),
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 1);

    let (status, list) = send(
        &app,
        "GET",
        &format!("/api/company-support/companies/{}", acme),
        Some(&owner.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|item| item["companyId"] == acme));
}
