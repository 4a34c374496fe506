use acessly_core::{AppError, Page};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireManageCandidateProfile};
use crate::modules::candidates::model::{CandidateDto, CandidateFilterParams, CandidateResponse};
use crate::modules::candidates::service::CandidateService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CandidateDto,
    responses(
        (status = 201, description = "Candidate profile created", body = CandidateResponse),
        (status = 400, description = "Invalid input or missing userId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a CANDIDATE account"),
        (status = 404, description = "User not found")
    ),
    tag = "Candidates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_candidate(
    State(state): State<AppState>,
    _auth: RequireManageCandidateProfile,
    ValidatedJson(dto): ValidatedJson<CandidateDto>,
) -> Result<(StatusCode, Json<CandidateResponse>), AppError> {
    let candidate = CandidateService::create_candidate(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(CandidateFilterParams),
    responses(
        (status = 200, description = "Page of candidates", body = Page<CandidateResponse>),
        (status = 400, description = "Invalid filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Candidates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidates(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<CandidateFilterParams>,
) -> Result<Json<Page<CandidateResponse>>, AppError> {
    let candidates = CandidateService::get_candidates(&state.db, filters).await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(("id" = i64, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate details", body = CandidateResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Candidate not found")
    ),
    tag = "Candidates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_candidate(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CandidateResponse>, AppError> {
    let candidate = CandidateService::get_candidate_by_id(&state.db, id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    params(("id" = i64, Path, description = "Candidate ID")),
    request_body = CandidateDto,
    responses(
        (status = 200, description = "Candidate profile updated", body = CandidateResponse),
        (status = 400, description = "Invalid input or missing userId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a CANDIDATE account"),
        (status = 404, description = "Candidate or user not found")
    ),
    tag = "Candidates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_candidate(
    State(state): State<AppState>,
    _auth: RequireManageCandidateProfile,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<CandidateDto>,
) -> Result<Json<CandidateResponse>, AppError> {
    let candidate = CandidateService::update_candidate(&state.db, id, dto).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(("id" = i64, Path, description = "Candidate ID")),
    responses(
        (status = 204, description = "Candidate profile deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a CANDIDATE account"),
        (status = 404, description = "Candidate not found")
    ),
    tag = "Candidates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_candidate(
    State(state): State<AppState>,
    _auth: RequireManageCandidateProfile,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    CandidateService::delete_candidate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
