use acessly_core::{AppError, Page};
use acessly_db::{QuerySpec, fetch_page};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::{IntegrityGuard, Parent};
use crate::modules::companies::model::{
    CompanyDto, CompanyFilterParams, CompanyResponse, CompanyRow,
};

const COMPANY_COLUMNS: &str =
    "co.id, co.user_id, co.name, co.sector, co.accessibility_type, co.website, co.description";

pub const COMPANY_QUERY: QuerySpec = QuerySpec {
    select: "SELECT co.id, co.user_id, co.name, co.sector, co.accessibility_type, co.website, co.description FROM companies co",
    count: "SELECT COUNT(*) FROM companies co",
    alias: "co",
    sortable: &[
        ("id", "co.id"),
        ("name", "co.name"),
        ("sector", "co.sector"),
        ("accessibilityType", "co.accessibility_type"),
    ],
};

pub struct CompanyService;

impl CompanyService {
    async fn check_refs(db: &PgPool, dto: &CompanyDto) -> Result<i64, AppError> {
        let user_id = IntegrityGuard::require_ref("userId", dto.user_id)?;
        IntegrityGuard::ensure_exists(db, Parent::User, user_id).await?;
        Ok(user_id)
    }

    #[instrument(skip(db))]
    pub async fn create_company(db: &PgPool, dto: CompanyDto) -> Result<CompanyResponse, AppError> {
        let user_id = Self::check_refs(db, &dto).await?;

        let company = sqlx::query_as::<_, CompanyRow>(&format!(
            "INSERT INTO companies AS co (user_id, name, sector, accessibility_type, website, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            COMPANY_COLUMNS
        ))
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.sector)
        .bind(dto.accessibility_type)
        .bind(&dto.website)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?;

        info!(company_id = company.id, "Company created");
        Ok(company.into())
    }

    #[instrument(skip(db))]
    pub async fn get_companies(
        db: &PgPool,
        params: CompanyFilterParams,
    ) -> Result<Page<CompanyResponse>, AppError> {
        let filter = params.to_filter()?;
        let page = fetch_page::<CompanyRow>(db, &COMPANY_QUERY, &filter, &params.page).await?;
        Ok(page.map(CompanyResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_company_by_id(db: &PgPool, id: i64) -> Result<CompanyResponse, AppError> {
        let company = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {} FROM companies co WHERE co.id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Parent::Company.not_found())?;

        Ok(company.into())
    }

    #[instrument(skip(db))]
    pub async fn update_company(
        db: &PgPool,
        id: i64,
        dto: CompanyDto,
    ) -> Result<CompanyResponse, AppError> {
        let user_id = Self::check_refs(db, &dto).await?;

        let company = sqlx::query_as::<_, CompanyRow>(&format!(
            "UPDATE companies AS co
             SET user_id = $1, name = $2, sector = $3, accessibility_type = $4, website = $5, description = $6
             WHERE co.id = $7
             RETURNING {}",
            COMPANY_COLUMNS
        ))
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.sector)
        .bind(dto.accessibility_type)
        .bind(&dto.website)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?
        .ok_or_else(|| Parent::Company.not_found())?;

        Ok(company.into())
    }

    #[instrument(skip(db))]
    pub async fn delete_company(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Parent::Company.not_found());
        }

        Ok(())
    }
}
