//! Cross-entity integrity checks run before every write.
//!
//! The guard turns the three ways a write can break referential or uniqueness
//! rules into typed errors:
//!
//! | Failure | Error |
//! |---|---|
//! | required parent id is null | 400 `<field> required` |
//! | parent id does not resolve | 404 `<Parent> not found` |
//! | duplicate candidacy pair or email | 409 |
//!
//! The pre-checks are an early exit, not the guarantee. Two concurrent writes
//! can both pass them; the losing statement then fails on a database
//! constraint and [`IntegrityGuard::map_write_error`] reports it with the same
//! error the pre-check would have produced.

use acessly_core::AppError;
use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::metrics::track_duplicate_application;

pub const DUPLICATE_APPLICATION: &str = "duplicate application";
pub const EMAIL_EXISTS: &str = "email exists";

const CANDIDACY_PAIR_CONSTRAINT: &str = "candidacies_candidate_vacancy_key";
const USER_EMAIL_CONSTRAINT: &str = "users_email_key";
/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// An entity that other rows reference by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    User,
    Company,
    Candidate,
    Vacancy,
}

impl Parent {
    pub fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Company => "companies",
            Self::Candidate => "candidates",
            Self::Vacancy => "vacancies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Company => "Company",
            Self::Candidate => "Candidate",
            Self::Vacancy => "Vacancy",
        }
    }

    pub fn not_found(self) -> AppError {
        AppError::not_found(format!("{} not found", self.label()))
    }

    /// The parent a named foreign-key constraint points at.
    pub fn from_foreign_key(constraint: &str) -> Option<Self> {
        match constraint {
            "companies_user_id_fkey" | "candidates_user_id_fkey" => Some(Self::User),
            "vacancies_company_id_fkey" | "company_supports_company_id_fkey" => {
                Some(Self::Company)
            }
            "candidacies_candidate_id_fkey" => Some(Self::Candidate),
            "candidacies_vacancy_id_fkey" => Some(Self::Vacancy),
            _ => None,
        }
    }
}

pub struct IntegrityGuard;

impl IntegrityGuard {
    /// Unwraps a required parent reference.
    pub fn require_ref(field: &str, value: Option<i64>) -> Result<i64, AppError> {
        value.ok_or_else(|| AppError::validation(format!("{} required", field)))
    }

    #[instrument(skip(db))]
    pub async fn ensure_exists(db: &PgPool, parent: Parent, id: i64) -> Result<(), AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", parent.table());
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(db)
            .await?;

        if !exists {
            return Err(parent.not_found());
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn ensure_candidacy_unique(
        db: &PgPool,
        candidate_id: i64,
        vacancy_id: i64,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM candidacies WHERE candidate_id = $1 AND vacancy_id = $2)",
        )
        .bind(candidate_id)
        .bind(vacancy_id)
        .fetch_one(db)
        .await?;

        if exists {
            track_duplicate_application();
            return Err(AppError::conflict(DUPLICATE_APPLICATION));
        }
        Ok(())
    }

    /// Fails when `email` belongs to a user other than `except_id`.
    #[instrument(skip(db))]
    pub async fn ensure_email_available(
        db: &PgPool,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<(), AppError> {
        let owner = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(db)
            .await?;

        match owner {
            Some(owner_id) if Some(owner_id) != except_id => {
                Err(AppError::conflict(EMAIL_EXISTS))
            }
            _ => Ok(()),
        }
    }

    /// Translates constraint violations raised by a mutation into the errors
    /// the pre-checks use. Anything else becomes a 500.
    pub fn map_write_error(err: sqlx::Error) -> AppError {
        let sqlx::Error::Database(db_err) = &err else {
            return AppError::from(err);
        };

        let constraint = db_err.constraint().unwrap_or_default();

        if db_err.is_unique_violation() {
            warn!(constraint, "Unique constraint rejected write");
            return match constraint {
                CANDIDACY_PAIR_CONSTRAINT => {
                    track_duplicate_application();
                    AppError::conflict(DUPLICATE_APPLICATION)
                }
                USER_EMAIL_CONSTRAINT => AppError::conflict(EMAIL_EXISTS),
                _ => AppError::conflict("Resource already exists"),
            };
        }

        if db_err.is_foreign_key_violation() {
            warn!(constraint, "Foreign key rejected write");
            return Parent::from_foreign_key(constraint)
                .map(Parent::not_found)
                .unwrap_or_else(|| AppError::not_found("Referenced resource not found"));
        }

        if db_err.is_check_violation() {
            return AppError::validation("Invalid field value");
        }

        if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
            warn!(constraint, "Numeric value out of range");
            return AppError::validation("Numeric value out of range");
        }

        AppError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_ref_names_the_field() {
        assert_eq!(IntegrityGuard::require_ref("vacancyId", Some(4)).unwrap(), 4);

        let err = IntegrityGuard::require_ref("vacancyId", None).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), "vacancyId required");
    }

    #[test]
    fn test_parent_not_found_message() {
        let err = Parent::Candidate.not_found();
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.message(), "Candidate not found");
    }

    #[test]
    fn test_foreign_keys_map_to_parents() {
        assert_eq!(
            Parent::from_foreign_key("candidacies_vacancy_id_fkey"),
            Some(Parent::Vacancy)
        );
        assert_eq!(
            Parent::from_foreign_key("company_supports_company_id_fkey"),
            Some(Parent::Company)
        );
        assert_eq!(
            Parent::from_foreign_key("candidates_user_id_fkey"),
            Some(Parent::User)
        );
        assert_eq!(Parent::from_foreign_key("something_else"), None);
    }

    #[test]
    fn test_non_database_errors_are_internal() {
        let err = IntegrityGuard::map_write_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status.as_u16(), 500);
    }
}
