use acessly_core::{AppError, Page};
use acessly_db::{Filter, QuerySpec, fetch_all, fetch_page};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::{IntegrityGuard, Parent};
use crate::modules::company_support::model::{
    COMPANY, CompanySupportDto, CompanySupportFilterParams, CompanySupportResponse,
    CompanySupportRow,
};

const SUPPORT_COLUMNS: &str = "cs.id, cs.company_id, cs.support_type, cs.description";

pub const SUPPORT_QUERY: QuerySpec = QuerySpec {
    select: "SELECT cs.id, cs.company_id, cs.support_type, cs.description FROM company_supports cs",
    count: "SELECT COUNT(*) FROM company_supports cs",
    alias: "cs",
    sortable: &[
        ("id", "cs.id"),
        ("supportType", "cs.support_type"),
        ("companyId", "cs.company_id"),
    ],
};

fn not_found() -> AppError {
    AppError::not_found("Company support not found")
}

pub struct CompanySupportService;

impl CompanySupportService {
    async fn check_refs(db: &PgPool, dto: &CompanySupportDto) -> Result<i64, AppError> {
        let company_id = IntegrityGuard::require_ref("companyId", dto.company_id)?;
        IntegrityGuard::ensure_exists(db, Parent::Company, company_id).await?;
        Ok(company_id)
    }

    #[instrument(skip(db))]
    pub async fn create_support(
        db: &PgPool,
        dto: CompanySupportDto,
    ) -> Result<CompanySupportResponse, AppError> {
        let company_id = Self::check_refs(db, &dto).await?;

        let support = sqlx::query_as::<_, CompanySupportRow>(&format!(
            "INSERT INTO company_supports AS cs (company_id, support_type, description)
             VALUES ($1, $2, $3)
             RETURNING {}",
            SUPPORT_COLUMNS
        ))
        .bind(company_id)
        .bind(&dto.support_type)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?;

        info!(support_id = support.id, company_id, "Company support added");
        Ok(support.into())
    }

    #[instrument(skip(db))]
    pub async fn get_supports(
        db: &PgPool,
        params: CompanySupportFilterParams,
    ) -> Result<Page<CompanySupportResponse>, AppError> {
        let filter = params.to_filter()?;
        let page =
            fetch_page::<CompanySupportRow>(db, &SUPPORT_QUERY, &filter, &params.page).await?;
        Ok(page.map(CompanySupportResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_supports_by_company(
        db: &PgPool,
        company_id: i64,
    ) -> Result<Vec<CompanySupportResponse>, AppError> {
        let filter = Filter::new().relation_equals(COMPANY, "id", Some(company_id));
        let rows = fetch_all::<CompanySupportRow>(db, &SUPPORT_QUERY, &filter).await?;
        Ok(rows.into_iter().map(CompanySupportResponse::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_support_by_id(
        db: &PgPool,
        id: i64,
    ) -> Result<CompanySupportResponse, AppError> {
        let support = sqlx::query_as::<_, CompanySupportRow>(&format!(
            "SELECT {} FROM company_supports cs WHERE cs.id = $1",
            SUPPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)?;

        Ok(support.into())
    }

    #[instrument(skip(db))]
    pub async fn update_support(
        db: &PgPool,
        id: i64,
        dto: CompanySupportDto,
    ) -> Result<CompanySupportResponse, AppError> {
        let company_id = Self::check_refs(db, &dto).await?;

        let support = sqlx::query_as::<_, CompanySupportRow>(&format!(
            "UPDATE company_supports AS cs
             SET company_id = $1, support_type = $2, description = $3
             WHERE cs.id = $4
             RETURNING {}",
            SUPPORT_COLUMNS
        ))
        .bind(company_id)
        .bind(&dto.support_type)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?
        .ok_or_else(not_found)?;

        Ok(support.into())
    }

    #[instrument(skip(db))]
    pub async fn delete_support(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM company_supports WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        Ok(())
    }
}
