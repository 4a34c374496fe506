use acessly_core::{
    AppError, PageParams,
    serde::{deserialize_optional_i64, deserialize_optional_string},
};
use acessly_db::{Filter, Relation};
use acessly_models::CandidacyStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validator::parse_enum_param;

pub const CANDIDATE: Relation = Relation::new("candidates", "candidate_id");
pub const VACANCY: Relation = Relation::new("vacancies", "vacancy_id");

/// A candidacy joined with the names shown alongside it.
#[derive(Debug, Clone, FromRow)]
pub struct CandidacyRow {
    pub id: i64,
    pub candidate_id: i64,
    pub candidate_name: String,
    pub vacancy_id: i64,
    pub vacancy_title: String,
    pub company_name: String,
    pub application_date: NaiveDate,
    pub status: CandidacyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidacyResponse {
    pub id: i64,
    pub candidate_id: i64,
    /// Name of the user behind the candidate profile
    pub candidate_name: String,
    pub vacancy_id: i64,
    pub vacancy_title: String,
    /// Name of the company that published the vacancy
    pub company_name: String,
    pub application_date: NaiveDate,
    pub status: CandidacyStatus,
}

impl From<CandidacyRow> for CandidacyResponse {
    fn from(row: CandidacyRow) -> Self {
        Self {
            id: row.id,
            candidate_id: row.candidate_id,
            candidate_name: row.candidate_name,
            vacancy_id: row.vacancy_id,
            vacancy_title: row.vacancy_title,
            company_name: row.company_name,
            application_date: row.application_date,
            status: row.status,
        }
    }
}

/// Application request. Date defaults to today and status to
/// `UNDER_ANALYSIS` when omitted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidacyDto {
    pub candidate_id: Option<i64>,
    pub vacancy_id: Option<i64>,
    pub application_date: Option<NaiveDate>,
    pub status: Option<CandidacyStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CandidacyFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub candidate_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub vacancy_id: Option<i64>,
    /// UNDER_ANALYSIS, APPROVED or REJECTED
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    /// Company that published the vacancy
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub company_id: Option<i64>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl CandidacyFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        let status = parse_enum_param::<CandidacyStatus>(self.status.as_deref())?;

        Ok(Filter::new()
            .relation_equals(CANDIDATE, "id", self.candidate_id)
            .relation_equals(VACANCY, "id", self.vacancy_id)
            .equals("status", status.map(CandidacyStatus::as_str))
            .relation_equals(VACANCY, "company_id", self.company_id))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusParams {
    /// New status: UNDER_ANALYSIS, APPROVED or REJECTED
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
}

impl StatusParams {
    pub fn parse(&self) -> Result<CandidacyStatus, AppError> {
        parse_enum_param::<CandidacyStatus>(self.status.as_deref())?
            .ok_or_else(|| AppError::validation("status required"))
    }
}
