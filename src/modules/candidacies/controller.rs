use acessly_core::{AppError, Page};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireApply, RequireReviewApplications};
use crate::modules::candidacies::model::{
    CandidacyDto, CandidacyFilterParams, CandidacyResponse, StatusParams,
};
use crate::modules::candidacies::service::CandidacyService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/candidacies",
    request_body = CandidacyDto,
    responses(
        (status = 201, description = "Application recorded", body = CandidacyResponse),
        (status = 400, description = "Missing candidateId or vacancyId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a CANDIDATE account"),
        (status = 404, description = "Candidate or vacancy not found"),
        (status = 409, description = "Candidate already applied to this vacancy")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_candidacy(
    State(state): State<AppState>,
    _auth: RequireApply,
    ValidatedJson(dto): ValidatedJson<CandidacyDto>,
) -> Result<(StatusCode, Json<CandidacyResponse>), AppError> {
    let candidacy = CandidacyService::create_candidacy(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(candidacy)))
}

#[utoipa::path(
    get,
    path = "/api/candidacies",
    params(CandidacyFilterParams),
    responses(
        (status = 200, description = "Page of candidacies", body = Page<CandidacyResponse>),
        (status = 400, description = "Invalid filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidacies(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<CandidacyFilterParams>,
) -> Result<Json<Page<CandidacyResponse>>, AppError> {
    let candidacies = CandidacyService::get_candidacies(&state.db, filters).await?;
    Ok(Json(candidacies))
}

#[utoipa::path(
    get,
    path = "/api/candidacies/{id}",
    params(("id" = i64, Path, description = "Candidacy ID")),
    responses(
        (status = 200, description = "Candidacy details", body = CandidacyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Candidacy not found")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidacy(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CandidacyResponse>, AppError> {
    let candidacy = CandidacyService::get_candidacy_by_id(&state.db, id).await?;
    Ok(Json(candidacy))
}

#[utoipa::path(
    get,
    path = "/api/candidacies/candidates/{candidateId}",
    params(("candidateId" = i64, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Applications made by the candidate", body = Vec<CandidacyResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidacies_by_candidate(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(candidate_id): ValidatedPath<i64>,
) -> Result<Json<Vec<CandidacyResponse>>, AppError> {
    let candidacies = CandidacyService::get_candidacies_by_candidate(&state.db, candidate_id).await?;
    Ok(Json(candidacies))
}

#[utoipa::path(
    get,
    path = "/api/candidacies/vacancy/{vacancyId}",
    params(("vacancyId" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Applications received by the vacancy", body = Vec<CandidacyResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidacies_by_vacancy(
    State(state): State<AppState>,
    _auth: RequireReviewApplications,
    ValidatedPath(vacancy_id): ValidatedPath<i64>,
) -> Result<Json<Vec<CandidacyResponse>>, AppError> {
    let candidacies = CandidacyService::get_candidacies_by_vacancy(&state.db, vacancy_id).await?;
    Ok(Json(candidacies))
}

#[utoipa::path(
    patch,
    path = "/api/candidacies/{id}/status",
    params(
        ("id" = i64, Path, description = "Candidacy ID"),
        StatusParams
    ),
    responses(
        (status = 200, description = "Status updated", body = CandidacyResponse),
        (status = 400, description = "Missing or invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Candidacy not found")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_candidacy_status(
    State(state): State<AppState>,
    _auth: RequireReviewApplications,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedQuery(params): ValidatedQuery<StatusParams>,
) -> Result<Json<CandidacyResponse>, AppError> {
    let status = params.parse()?;
    let candidacy = CandidacyService::update_status(&state.db, id, status).await?;
    Ok(Json(candidacy))
}

#[utoipa::path(
    delete,
    path = "/api/candidacies/{id}",
    params(("id" = i64, Path, description = "Candidacy ID")),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the applicant"),
        (status = 404, description = "Candidacy not found")
    ),
    tag = "Candidacies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_candidacy(
    State(state): State<AppState>,
    RequireApply(auth_user): RequireApply,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    CandidacyService::delete_candidacy(&state.db, id, auth_user.user_id()?).await?;
    Ok(StatusCode::NO_CONTENT)
}
