use acessly_core::{
    AppError, PageParams,
    serde::{deserialize_optional_i64, deserialize_optional_string},
};
use acessly_db::{Filter, Relation};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const COMPANY: Relation = Relation::new("companies", "company_id");

#[derive(Debug, Clone, FromRow)]
pub struct CompanySupportRow {
    pub id: i64,
    pub company_id: i64,
    pub support_type: String,
    pub description: String,
}

/// An accessibility support resource a company offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySupportResponse {
    pub id: i64,
    pub company_id: i64,
    pub support_type: String,
    pub description: String,
}

impl From<CompanySupportRow> for CompanySupportResponse {
    fn from(row: CompanySupportRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            support_type: row.support_type,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySupportDto {
    pub company_id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "supportType must be 1-100 characters"))]
    pub support_type: String,
    #[validate(length(min = 1, max = 255, message = "description must be 1-255 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CompanySupportFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub company_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub support_type: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl CompanySupportFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        Ok(Filter::new()
            .relation_equals(COMPANY, "id", self.company_id)
            .contains("support_type", self.support_type.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_fails_validation() {
        let dto: CompanySupportDto = serde_json::from_str(
            r#"{"companyId":1,"supportType":"Sign language","description":""}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_filter_from_query_strings() {
        let params: CompanySupportFilterParams =
            serde_json::from_str(r#"{"companyId":"3","supportType":"libras","page":"1"}"#)
                .unwrap();
        assert_eq!(params.company_id, Some(3));
        assert_eq!(params.page.page(), 1);
        assert_eq!(params.to_filter().unwrap().len(), 2);
    }
}
