mod common;

use axum::Router;
use axum::http::StatusCode;
use common::{
    TestAccount, count_rows, create_account, create_candidate, create_company, create_vacancy,
    send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    candidate: TestAccount,
    company: TestAccount,
    candidate_id: i64,
    company_id: i64,
    vacancy_id: i64,
}

async fn fixture(app: &Router) -> Fixture {
    let candidate = create_account(app, "Ana Souza", "CANDIDATE").await;
    let candidate_id = create_candidate(app, &candidate).await;
    let company = create_account(app, "Acme Owner", "COMPANY").await;
    let company_id = create_company(app, &company, "Acme").await;
    let vacancy_id = create_vacancy(app, &company, company_id, "Backend Developer").await;

    Fixture {
        candidate,
        company,
        candidate_id,
        company_id,
        vacancy_id,
    }
}

async fn pair_count(pool: &PgPool, candidate_id: i64, vacancy_id: i64) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM candidacies WHERE candidate_id = $1 AND vacancy_id = $2",
    )
    .bind(candidate_id)
    .bind(vacancy_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_then_duplicate_conflicts(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;
    let body = json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id });

    let (status, created) = send(&app, "POST", "/api/candidacies", Some(&f.candidate.token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "UNDER_ANALYSIS");
    assert_eq!(created["candidateName"], "Ana Souza");
    assert_eq!(created["vacancyTitle"], "Backend Developer");
    assert_eq!(created["companyName"], "Acme");
    assert!(created["applicationDate"].is_string());

    let (status, error) = send(&app, "POST", "/api/candidacies", Some(&f.candidate.token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "duplicate application");

    assert_eq!(pair_count(&pool, f.candidate_id, f.vacancy_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_duplicate_applications(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;
    let body = json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id });

    let (first, second) = tokio::join!(
        send(&app, "POST", "/api/candidacies", Some(&f.candidate.token), Some(body.clone())),
        send(&app, "POST", "/api/candidacies", Some(&f.candidate.token), Some(body.clone())),
    );

    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(pair_count(&pool, f.candidate_id, f.vacancy_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_date_and_status_are_kept(pool: PgPool) {
    let app = setup_test_app(pool);
    let f = fixture(&app).await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({
            "candidateId": f.candidate_id,
            "vacancyId": f.vacancy_id,
            "applicationDate": "2025-03-14",
            "status": "APPROVED",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["applicationDate"], "2025-03-14");
    assert_eq!(created["status"], "APPROVED");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_parent_reference(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "vacancyId required");

    let (status, body) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "vacancyId": f.vacancy_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "candidateId required");

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM candidacies").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_parent_reference(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": 987_654, "vacancyId": f.vacancy_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Candidate not found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": 987_654 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Vacancy not found");

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM candidacies").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_company_cannot_apply(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.company.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM candidacies").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_company_reviews_applications(pool: PgPool) {
    let app = setup_test_app(pool);
    let f = fixture(&app).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(
        &app,
        "GET",
        &format!("/api/candidacies/vacancy/{}", f.vacancy_id),
        Some(&f.company.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/candidacies/vacancy/{}", f.vacancy_id),
        Some(&f.candidate.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let status_path = format!("/api/candidacies/{}/status", id);

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("{}?status=APPROVED", status_path),
        Some(&f.company.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "APPROVED");
    assert_eq!(updated["companyName"], "Acme");

    let (status, body) = send(&app, "PATCH", &status_path, Some(&f.company.token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "status required");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("{}?status=HIRED", status_path),
        Some(&f.company.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("{}?status=APPROVED", status_path),
        Some(&f.candidate.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/candidacies/99999/status?status=REJECTED",
        Some(&f.company.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_filters(pool: PgPool) {
    let app = setup_test_app(pool);
    let f = fixture(&app).await;
    let second_vacancy = create_vacancy(&app, &f.company, f.company_id, "Data Analyst").await;

    let other_owner = create_account(&app, "Other Owner", "COMPANY").await;
    let other_company = create_company(&app, &other_owner, "Other").await;
    let other_vacancy = create_vacancy(&app, &other_owner, other_company, "Designer").await;

    for vacancy_id in [f.vacancy_id, second_vacancy, other_vacancy] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/candidacies",
            Some(&f.candidate.token),
            Some(json!({ "candidateId": f.candidate_id, "vacancyId": vacancy_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let token = Some(f.candidate.token.as_str());

    let (_, body) = send(&app, "GET", &format!("/api/candidacies?companyId={}", f.company_id), token, None).await;
    assert_eq!(body["totalElements"], 2);

    let (_, body) = send(&app, "GET", &format!("/api/candidacies?companyId={}", other_company), token, None).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["items"][0]["vacancyTitle"], "Designer");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/candidacies?candidateId={}&vacancyId={}", f.candidate_id, second_vacancy),
        token,
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 1);

    let (_, body) = send(&app, "GET", "/api/candidacies?status=UNDER_ANALYSIS&size=2", token, None).await;
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["totalPages"], 2);

    let (_, body) = send(&app, "GET", "/api/candidacies?status=REJECTED", token, None).await;
    assert_eq!(body["totalElements"], 0);

    let (status, list) = send(
        &app,
        "GET",
        &format!("/api/candidacies/candidates/{}", f.candidate_id),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_withdraw_application(pool: PgPool) {
    let app = setup_test_app(pool);
    let f = fixture(&app).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id })),
    )
    .await;
    let path = format!("/api/candidacies/{}", created["id"]);

    let (status, _) = send(&app, "DELETE", &path, Some(&f.candidate.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &path, Some(&f.candidate.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Candidacy not found");

    let (status, _) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_applicant_can_withdraw(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let f = fixture(&app).await;
    let other = create_account(&app, "Bruno Alves", "CANDIDATE").await;
    create_candidate(&app, &other).await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/candidacies",
        Some(&f.candidate.token),
        Some(json!({ "candidateId": f.candidate_id, "vacancyId": f.vacancy_id })),
    )
    .await;
    let path = format!("/api/candidacies/{}", created["id"]);

    let (status, _) = send(&app, "DELETE", &path, Some(&other.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(pair_count(&pool, f.candidate_id, f.vacancy_id).await, 1);

    let (status, _) = send(&app, "DELETE", "/api/candidacies/999999", Some(&other.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &path, Some(&f.candidate.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
