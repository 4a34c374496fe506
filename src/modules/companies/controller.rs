use acessly_core::{AppError, Page};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireManageCompanies};
use crate::modules::companies::model::{CompanyDto, CompanyFilterParams, CompanyResponse};
use crate::modules::companies::service::CompanyService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CompanyDto,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid input or missing userId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "User not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_company(
    State(state): State<AppState>,
    _auth: RequireManageCompanies,
    ValidatedJson(dto): ValidatedJson<CompanyDto>,
) -> Result<(StatusCode, Json<CompanyResponse>), AppError> {
    let company = CompanyService::create_company(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    get,
    path = "/api/companies",
    params(CompanyFilterParams),
    responses(
        (status = 200, description = "Page of companies", body = Page<CompanyResponse>),
        (status = 400, description = "Invalid filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_companies(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<CompanyFilterParams>,
) -> Result<Json<Page<CompanyResponse>>, AppError> {
    let companies = CompanyService::get_companies(&state.db, filters).await?;
    Ok(Json(companies))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = CompanyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = CompanyService::get_company_by_id(&state.db, id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    request_body = CompanyDto,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Invalid input or missing userId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Company or user not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_company(
    State(state): State<AppState>,
    _auth: RequireManageCompanies,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<CompanyDto>,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = CompanyService::update_company(&state.db, id, dto).await?;
    Ok(Json(company))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    _auth: RequireManageCompanies,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    CompanyService::delete_company(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
