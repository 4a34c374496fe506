use acessly_core::{AppError, Page};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireManageVacancies};
use crate::modules::vacancies::model::{VacancyDto, VacancyFilterParams, VacancyResponse};
use crate::modules::vacancies::service::VacancyService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = VacancyDto,
    responses(
        (status = 201, description = "Vacancy published", body = VacancyResponse),
        (status = 400, description = "Invalid input or missing companyId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Company not found")
    ),
    tag = "Vacancies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_vacancy(
    State(state): State<AppState>,
    _auth: RequireManageVacancies,
    ValidatedJson(dto): ValidatedJson<VacancyDto>,
) -> Result<(StatusCode, Json<VacancyResponse>), AppError> {
    let vacancy = VacancyService::create_vacancy(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    params(VacancyFilterParams),
    responses(
        (status = 200, description = "Page of vacancies", body = Page<VacancyResponse>),
        (status = 400, description = "Invalid filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Vacancies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vacancies(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<VacancyFilterParams>,
) -> Result<Json<Page<VacancyResponse>>, AppError> {
    let vacancies = VacancyService::get_vacancies(&state.db, filters).await?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy details", body = VacancyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vacancy not found")
    ),
    tag = "Vacancies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vacancy(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<VacancyResponse>, AppError> {
    let vacancy = VacancyService::get_vacancy_by_id(&state.db, id).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    put,
    path = "/api/vacancies/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    request_body = VacancyDto,
    responses(
        (status = 200, description = "Vacancy updated", body = VacancyResponse),
        (status = 400, description = "Invalid input or missing companyId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Vacancy or company not found")
    ),
    tag = "Vacancies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_vacancy(
    State(state): State<AppState>,
    _auth: RequireManageVacancies,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<VacancyDto>,
) -> Result<Json<VacancyResponse>, AppError> {
    let vacancy = VacancyService::update_vacancy(&state.db, id, dto).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 204, description = "Vacancy deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Vacancy not found")
    ),
    tag = "Vacancies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    _auth: RequireManageVacancies,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    VacancyService::delete_vacancy(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
