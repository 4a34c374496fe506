use acessly_core::{
    AppError, PageParams,
    serde::{deserialize_optional_i64, deserialize_optional_string},
};
use acessly_db::{Filter, Relation};
use acessly_models::DisabilityType;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validator::parse_enum_param;

const OWNER: Relation = Relation::new("users", "user_id");

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub user_id: i64,
    pub disability_type: Option<DisabilityType>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub required_accessibility: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: i64,
    pub user_id: i64,
    pub disability_type: Option<DisabilityType>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub required_accessibility: String,
}

impl From<CandidateRow> for CandidateResponse {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            disability_type: row.disability_type,
            skills: row.skills,
            experience: row.experience,
            required_accessibility: row.required_accessibility,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub user_id: Option<i64>,
    pub disability_type: Option<DisabilityType>,
    pub skills: Option<String>,
    #[validate(length(max = 255, message = "experience must be at most 255 characters"))]
    pub experience: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "requiredAccessibility must be 1-255 characters"
    ))]
    pub required_accessibility: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilterParams {
    /// PHYSICAL, VISUAL, AUDITORY or COGNITIVE
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub disability_type: Option<String>,
    /// Substring of the skills text (case-insensitive)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl CandidateFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        let disability_type = parse_enum_param::<DisabilityType>(self.disability_type.as_deref())?;

        Ok(Filter::new()
            .equals("disability_type", disability_type.map(DisabilityType::as_str))
            .contains("skills", self.skills.as_deref())
            .relation_equals(OWNER, "id", self.user_id))
    }
}
