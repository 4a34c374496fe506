use acessly_core::{AppError, Page};
use acessly_db::{Filter, QuerySpec, fetch_all, fetch_page};
use acessly_models::CandidacyStatus;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::{IntegrityGuard, Parent};
use crate::metrics::{track_candidacy_created, track_candidacy_status_change};
use crate::modules::candidacies::model::{
    CANDIDATE, CandidacyDto, CandidacyFilterParams, CandidacyResponse, CandidacyRow, VACANCY,
};

/// Projection of candidacies read from `$source`, joined through to the
/// candidate's user and the vacancy's company.
macro_rules! candidacy_select {
    ($source:literal) => {
        concat!(
            "SELECT c.id, c.candidate_id, u.name AS candidate_name, c.vacancy_id, ",
            "v.title AS vacancy_title, co.name AS company_name, c.application_date, c.status ",
            "FROM ",
            $source,
            " c ",
            "INNER JOIN candidates ca ON ca.id = c.candidate_id ",
            "INNER JOIN users u ON u.id = ca.user_id ",
            "INNER JOIN vacancies v ON v.id = c.vacancy_id ",
            "INNER JOIN companies co ON co.id = v.company_id"
        )
    };
}

pub const CANDIDACY_QUERY: QuerySpec = QuerySpec {
    select: candidacy_select!("candidacies"),
    count: "SELECT COUNT(*) FROM candidacies c",
    alias: "c",
    sortable: &[
        ("id", "c.id"),
        ("applicationDate", "c.application_date"),
        ("status", "c.status"),
        ("candidateId", "c.candidate_id"),
        ("vacancyId", "c.vacancy_id"),
    ],
};

pub struct CandidacyService;

impl CandidacyService {
    /// Records an application. Both parents must exist and the pair must not
    /// have applied before; a concurrent duplicate that slips past the
    /// pre-check is rejected by the unique constraint.
    #[instrument(skip(db))]
    pub async fn create_candidacy(
        db: &PgPool,
        dto: CandidacyDto,
    ) -> Result<CandidacyResponse, AppError> {
        let candidate_id = IntegrityGuard::require_ref("candidateId", dto.candidate_id)?;
        let vacancy_id = IntegrityGuard::require_ref("vacancyId", dto.vacancy_id)?;

        IntegrityGuard::ensure_exists(db, Parent::Candidate, candidate_id).await?;
        IntegrityGuard::ensure_exists(db, Parent::Vacancy, vacancy_id).await?;
        IntegrityGuard::ensure_candidacy_unique(db, candidate_id, vacancy_id).await?;

        let sql = format!(
            "WITH inserted AS (
                INSERT INTO candidacies (candidate_id, vacancy_id, application_date, status)
                VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4)
                RETURNING *
            ) {}",
            candidacy_select!("inserted")
        );

        let candidacy = sqlx::query_as::<_, CandidacyRow>(&sql)
            .bind(candidate_id)
            .bind(vacancy_id)
            .bind(dto.application_date)
            .bind(dto.status.unwrap_or_default())
            .fetch_one(db)
            .await
            .map_err(IntegrityGuard::map_write_error)?;

        track_candidacy_created();
        info!(
            candidacy_id = candidacy.id,
            candidate_id, vacancy_id, "Candidacy created"
        );

        Ok(candidacy.into())
    }

    #[instrument(skip(db))]
    pub async fn get_candidacies(
        db: &PgPool,
        params: CandidacyFilterParams,
    ) -> Result<Page<CandidacyResponse>, AppError> {
        let filter = params.to_filter()?;
        let page = fetch_page::<CandidacyRow>(db, &CANDIDACY_QUERY, &filter, &params.page).await?;
        Ok(page.map(CandidacyResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_candidacy_by_id(db: &PgPool, id: i64) -> Result<CandidacyResponse, AppError> {
        let sql = format!("{} WHERE c.id = $1", candidacy_select!("candidacies"));

        let candidacy = sqlx::query_as::<_, CandidacyRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Candidacy not found"))?;

        Ok(candidacy.into())
    }

    #[instrument(skip(db))]
    pub async fn get_candidacies_by_candidate(
        db: &PgPool,
        candidate_id: i64,
    ) -> Result<Vec<CandidacyResponse>, AppError> {
        let filter = Filter::new().relation_equals(CANDIDATE, "id", Some(candidate_id));
        let rows = fetch_all::<CandidacyRow>(db, &CANDIDACY_QUERY, &filter).await?;
        Ok(rows.into_iter().map(CandidacyResponse::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_candidacies_by_vacancy(
        db: &PgPool,
        vacancy_id: i64,
    ) -> Result<Vec<CandidacyResponse>, AppError> {
        let filter = Filter::new().relation_equals(VACANCY, "id", Some(vacancy_id));
        let rows = fetch_all::<CandidacyRow>(db, &CANDIDACY_QUERY, &filter).await?;
        Ok(rows.into_iter().map(CandidacyResponse::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        id: i64,
        status: CandidacyStatus,
    ) -> Result<CandidacyResponse, AppError> {
        let sql = format!(
            "WITH updated AS (
                UPDATE candidacies SET status = $1 WHERE id = $2 RETURNING *
            ) {}",
            candidacy_select!("updated")
        );

        let candidacy = sqlx::query_as::<_, CandidacyRow>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(IntegrityGuard::map_write_error)?
            .ok_or_else(|| AppError::not_found("Candidacy not found"))?;

        track_candidacy_status_change(status.as_str());
        info!(candidacy_id = id, status = %status, "Candidacy status changed");

        Ok(candidacy.into())
    }

    /// Withdraws an application on behalf of the user owning its candidate
    /// profile.
    #[instrument(skip(db))]
    pub async fn delete_candidacy(db: &PgPool, id: i64, user_id: i64) -> Result<(), AppError> {
        let owner: Option<i64> = sqlx::query_scalar(
            "SELECT ca.user_id FROM candidacies c \
             INNER JOIN candidates ca ON ca.id = c.candidate_id WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        match owner {
            None => return Err(AppError::not_found("Candidacy not found")),
            Some(owner) if owner != user_id => {
                return Err(AppError::forbidden(
                    "Access denied. Only the applicant can withdraw this candidacy",
                ));
            }
            Some(_) => {}
        }

        let result = sqlx::query("DELETE FROM candidacies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Candidacy not found"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_uses_inner_joins() {
        assert!(CANDIDACY_QUERY.select.starts_with("SELECT c.id"));
        assert!(CANDIDACY_QUERY.select.contains("FROM candidacies c INNER JOIN"));
        assert!(!CANDIDACY_QUERY.select.contains("LEFT JOIN"));
    }

    #[test]
    fn test_sort_by_application_date_breaks_ties_on_id() {
        let sort = acessly_core::SortSpec::desc("applicationDate");
        assert_eq!(
            CANDIDACY_QUERY.order_by(Some(&sort)).unwrap(),
            "c.application_date DESC, c.id ASC"
        );
    }
}
