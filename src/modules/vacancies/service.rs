use acessly_core::{AppError, Page};
use acessly_db::{QuerySpec, fetch_page};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::{IntegrityGuard, Parent};
use crate::modules::vacancies::model::{
    VacancyDto, VacancyFilterParams, VacancyResponse, VacancyRow,
};

const VACANCY_COLUMNS: &str = "v.id, v.company_id, v.title, v.description, v.vacancy_type, v.city, v.state, v.salary, v.accessibility_offered";

pub const VACANCY_QUERY: QuerySpec = QuerySpec {
    select: "SELECT v.id, v.company_id, v.title, v.description, v.vacancy_type, v.city, v.state, v.salary, v.accessibility_offered FROM vacancies v",
    count: "SELECT COUNT(*) FROM vacancies v",
    alias: "v",
    sortable: &[
        ("id", "v.id"),
        ("title", "v.title"),
        ("salary", "v.salary"),
        ("city", "v.city"),
        ("vacancyType", "v.vacancy_type"),
    ],
};

pub struct VacancyService;

impl VacancyService {
    async fn check_refs(db: &PgPool, dto: &VacancyDto) -> Result<i64, AppError> {
        let company_id = IntegrityGuard::require_ref("companyId", dto.company_id)?;
        IntegrityGuard::ensure_exists(db, Parent::Company, company_id).await?;
        Ok(company_id)
    }

    #[instrument(skip(db))]
    pub async fn create_vacancy(db: &PgPool, dto: VacancyDto) -> Result<VacancyResponse, AppError> {
        let company_id = Self::check_refs(db, &dto).await?;

        let vacancy = sqlx::query_as::<_, VacancyRow>(&format!(
            "INSERT INTO vacancies AS v (company_id, title, description, vacancy_type, city, state, salary, accessibility_offered)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            VACANCY_COLUMNS
        ))
        .bind(company_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.vacancy_type)
        .bind(&dto.city)
        .bind(&dto.state)
        .bind(dto.salary)
        .bind(&dto.accessibility_offered)
        .fetch_one(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?;

        info!(vacancy_id = vacancy.id, company_id, "Vacancy published");
        Ok(vacancy.into())
    }

    #[instrument(skip(db))]
    pub async fn get_vacancies(
        db: &PgPool,
        params: VacancyFilterParams,
    ) -> Result<Page<VacancyResponse>, AppError> {
        let filter = params.to_filter()?;
        let page = fetch_page::<VacancyRow>(db, &VACANCY_QUERY, &filter, &params.page).await?;
        Ok(page.map(VacancyResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_vacancy_by_id(db: &PgPool, id: i64) -> Result<VacancyResponse, AppError> {
        let vacancy = sqlx::query_as::<_, VacancyRow>(&format!(
            "SELECT {} FROM vacancies v WHERE v.id = $1",
            VACANCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Parent::Vacancy.not_found())?;

        Ok(vacancy.into())
    }

    #[instrument(skip(db))]
    pub async fn update_vacancy(
        db: &PgPool,
        id: i64,
        dto: VacancyDto,
    ) -> Result<VacancyResponse, AppError> {
        let company_id = Self::check_refs(db, &dto).await?;

        let vacancy = sqlx::query_as::<_, VacancyRow>(&format!(
            "UPDATE vacancies AS v
             SET company_id = $1, title = $2, description = $3, vacancy_type = $4,
                 city = $5, state = $6, salary = $7, accessibility_offered = $8
             WHERE v.id = $9
             RETURNING {}",
            VACANCY_COLUMNS
        ))
        .bind(company_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.vacancy_type)
        .bind(&dto.city)
        .bind(&dto.state)
        .bind(dto.salary)
        .bind(&dto.accessibility_offered)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?
        .ok_or_else(|| Parent::Vacancy.not_found())?;

        Ok(vacancy.into())
    }

    #[instrument(skip(db))]
    pub async fn delete_vacancy(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Parent::Vacancy.not_found());
        }

        info!(vacancy_id = id, "Vacancy removed");
        Ok(())
    }
}
