use acessly_core::{
    AppError, PageParams,
    serde::{deserialize_optional_i64, deserialize_optional_string},
};
use acessly_db::{Filter, Relation};
use acessly_models::VacancyType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::validator::parse_enum_param;

const COMPANY: Relation = Relation::new("companies", "company_id");

#[derive(Debug, Clone, FromRow)]
pub struct VacancyRow {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub vacancy_type: Option<VacancyType>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub salary: Option<Decimal>,
    pub accessibility_offered: String,
}

/// A job vacancy. The publishing company is referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VacancyResponse {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub vacancy_type: Option<VacancyType>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub salary: Option<Decimal>,
    pub accessibility_offered: String,
}

impl From<VacancyRow> for VacancyResponse {
    fn from(row: VacancyRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            vacancy_type: row.vacancy_type,
            city: row.city,
            state: row.state,
            salary: row.salary,
            accessibility_offered: row.accessibility_offered,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VacancyDto {
    pub company_id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub vacancy_type: Option<VacancyType>,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "state must be at most 50 characters"))]
    pub state: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_salary"))]
    pub salary: Option<Decimal>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "accessibilityOffered must be 1-255 characters"
    ))]
    pub accessibility_offered: String,
}

/// Largest value a `NUMERIC(10,2)` column holds.
const MAX_SALARY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(salary_error("salary must not be negative"));
    }
    if salary.round_dp(2) > MAX_SALARY {
        return Err(salary_error("salary must be at most 99999999.99"));
    }
    Ok(())
}

fn salary_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("salary");
    err.message = Some(message.into());
    err
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct VacancyFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,
    /// Substring of the offered accessibility description
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub accessibility_offered: Option<String>,
    /// REMOTE, HYBRID or PRESENTIAL
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub vacancy_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub company_id: Option<i64>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl VacancyFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        let vacancy_type = parse_enum_param::<VacancyType>(self.vacancy_type.as_deref())?;

        Ok(Filter::new()
            .contains("title", self.title.as_deref())
            .contains("city", self.city.as_deref())
            .contains("accessibility_offered", self.accessibility_offered.as_deref())
            .equals("vacancy_type", vacancy_type.map(VacancyType::as_str))
            .relation_equals(COMPANY, "id", self.company_id))
    }
}
