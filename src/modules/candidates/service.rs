use acessly_core::{AppError, Page};
use acessly_db::{QuerySpec, fetch_page};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::{IntegrityGuard, Parent};
use crate::modules::candidates::model::{
    CandidateDto, CandidateFilterParams, CandidateResponse, CandidateRow,
};

const CANDIDATE_COLUMNS: &str =
    "ca.id, ca.user_id, ca.disability_type, ca.skills, ca.experience, ca.required_accessibility";

pub const CANDIDATE_QUERY: QuerySpec = QuerySpec {
    select: "SELECT ca.id, ca.user_id, ca.disability_type, ca.skills, ca.experience, ca.required_accessibility FROM candidates ca",
    count: "SELECT COUNT(*) FROM candidates ca",
    alias: "ca",
    sortable: &[
        ("id", "ca.id"),
        ("disabilityType", "ca.disability_type"),
        ("userId", "ca.user_id"),
    ],
};

pub struct CandidateService;

impl CandidateService {
    async fn check_refs(db: &PgPool, dto: &CandidateDto) -> Result<i64, AppError> {
        let user_id = IntegrityGuard::require_ref("userId", dto.user_id)?;
        IntegrityGuard::ensure_exists(db, Parent::User, user_id).await?;
        Ok(user_id)
    }

    #[instrument(skip(db))]
    pub async fn create_candidate(
        db: &PgPool,
        dto: CandidateDto,
    ) -> Result<CandidateResponse, AppError> {
        let user_id = Self::check_refs(db, &dto).await?;

        let candidate = sqlx::query_as::<_, CandidateRow>(&format!(
            "INSERT INTO candidates AS ca (user_id, disability_type, skills, experience, required_accessibility)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .bind(dto.disability_type)
        .bind(&dto.skills)
        .bind(&dto.experience)
        .bind(&dto.required_accessibility)
        .fetch_one(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?;

        info!(candidate_id = candidate.id, "Candidate profile created");
        Ok(candidate.into())
    }

    #[instrument(skip(db))]
    pub async fn get_candidates(
        db: &PgPool,
        params: CandidateFilterParams,
    ) -> Result<Page<CandidateResponse>, AppError> {
        let filter = params.to_filter()?;
        let page = fetch_page::<CandidateRow>(db, &CANDIDATE_QUERY, &filter, &params.page).await?;
        Ok(page.map(CandidateResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_candidate_by_id(db: &PgPool, id: i64) -> Result<CandidateResponse, AppError> {
        let candidate = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {} FROM candidates ca WHERE ca.id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Parent::Candidate.not_found())?;

        Ok(candidate.into())
    }

    #[instrument(skip(db))]
    pub async fn update_candidate(
        db: &PgPool,
        id: i64,
        dto: CandidateDto,
    ) -> Result<CandidateResponse, AppError> {
        let user_id = Self::check_refs(db, &dto).await?;

        let candidate = sqlx::query_as::<_, CandidateRow>(&format!(
            "UPDATE candidates AS ca
             SET user_id = $1, disability_type = $2, skills = $3, experience = $4, required_accessibility = $5
             WHERE ca.id = $6
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .bind(dto.disability_type)
        .bind(&dto.skills)
        .bind(&dto.experience)
        .bind(&dto.required_accessibility)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?
        .ok_or_else(|| Parent::Candidate.not_found())?;

        Ok(candidate.into())
    }

    #[instrument(skip(db))]
    pub async fn delete_candidate(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Parent::Candidate.not_found());
        }

        Ok(())
    }
}
