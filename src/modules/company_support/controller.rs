use acessly_core::{AppError, Page};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireManageCompanySupport};
use crate::modules::company_support::model::{
    CompanySupportDto, CompanySupportFilterParams, CompanySupportResponse,
};
use crate::modules::company_support::service::CompanySupportService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/company-support",
    request_body = CompanySupportDto,
    responses(
        (status = 201, description = "Support resource added", body = CompanySupportResponse),
        (status = 400, description = "Invalid input or missing companyId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Company not found")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_support(
    State(state): State<AppState>,
    _auth: RequireManageCompanySupport,
    ValidatedJson(dto): ValidatedJson<CompanySupportDto>,
) -> Result<(StatusCode, Json<CompanySupportResponse>), AppError> {
    let support = CompanySupportService::create_support(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(support)))
}

#[utoipa::path(
    get,
    path = "/api/company-support",
    params(CompanySupportFilterParams),
    responses(
        (status = 200, description = "Page of support resources", body = Page<CompanySupportResponse>),
        (status = 400, description = "Invalid filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_supports(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<CompanySupportFilterParams>,
) -> Result<Json<Page<CompanySupportResponse>>, AppError> {
    let supports = CompanySupportService::get_supports(&state.db, filters).await?;
    Ok(Json(supports))
}

#[utoipa::path(
    get,
    path = "/api/company-support/{id}",
    params(("id" = i64, Path, description = "Support ID")),
    responses(
        (status = 200, description = "Support resource details", body = CompanySupportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company support not found")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_support(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CompanySupportResponse>, AppError> {
    let support = CompanySupportService::get_support_by_id(&state.db, id).await?;
    Ok(Json(support))
}

#[utoipa::path(
    put,
    path = "/api/company-support/{id}",
    params(("id" = i64, Path, description = "Support ID")),
    request_body = CompanySupportDto,
    responses(
        (status = 200, description = "Support resource updated", body = CompanySupportResponse),
        (status = 400, description = "Invalid input or missing companyId"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Support resource or company not found")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_support(
    State(state): State<AppState>,
    _auth: RequireManageCompanySupport,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<CompanySupportDto>,
) -> Result<Json<CompanySupportResponse>, AppError> {
    let support = CompanySupportService::update_support(&state.db, id, dto).await?;
    Ok(Json(support))
}

#[utoipa::path(
    delete,
    path = "/api/company-support/{id}",
    params(("id" = i64, Path, description = "Support ID")),
    responses(
        (status = 204, description = "Support resource removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires a COMPANY account"),
        (status = 404, description = "Company support not found")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_support(
    State(state): State<AppState>,
    _auth: RequireManageCompanySupport,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    CompanySupportService::delete_support(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/company-support/companies/{companyId}",
    params(("companyId" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Support resources offered by the company", body = Vec<CompanySupportResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Company Support",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_supports_by_company(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(company_id): ValidatedPath<i64>,
) -> Result<Json<Vec<CompanySupportResponse>>, AppError> {
    let supports = CompanySupportService::get_supports_by_company(&state.db, company_id).await?;
    Ok(Json(supports))
}
