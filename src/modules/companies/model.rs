use acessly_core::{
    AppError, PageParams,
    serde::{deserialize_optional_i64, deserialize_optional_string},
};
use acessly_db::{Filter, Relation};
use acessly_models::AccessibilityType;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validator::parse_enum_param;

const OWNER: Relation = Relation::new("users", "user_id");

#[derive(Debug, Clone, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub sector: String,
    pub accessibility_type: Option<AccessibilityType>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// A company profile. The owning account is referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub sector: String,
    pub accessibility_type: Option<AccessibilityType>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl From<CompanyRow> for CompanyResponse {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            sector: row.sector,
            accessibility_type: row.accessibility_type,
            website: row.website,
            description: row.description,
        }
    }
}

/// Request body for both create and full update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "sector must be 1-100 characters"))]
    pub sector: String,
    #[serde(alias = "acessibilityType")]
    pub accessibility_type: Option<AccessibilityType>,
    #[validate(length(max = 255, message = "website must be at most 255 characters"))]
    pub website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sector: Option<String>,
    /// LOW, MEDIUM or HIGH
    #[serde(
        default,
        alias = "acessibilityType",
        deserialize_with = "deserialize_optional_string"
    )]
    pub accessibility_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl CompanyFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        let accessibility_type =
            parse_enum_param::<AccessibilityType>(self.accessibility_type.as_deref())?;

        Ok(Filter::new()
            .contains("name", self.name.as_deref())
            .contains("sector", self.sector.as_deref())
            .equals(
                "accessibility_type",
                accessibility_type.map(AccessibilityType::as_str),
            )
            .relation_equals(OWNER, "id", self.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_accepts_legacy_field_spelling() {
        let dto: CompanyDto = serde_json::from_str(
            r#"{"userId":1,"name":"Acme","sector":"Tech","acessibilityType":"HIGH"}"#,
        )
        .unwrap();
        assert_eq!(dto.accessibility_type, Some(AccessibilityType::High));
        assert_eq!(dto.user_id, Some(1));
    }

    #[test]
    fn test_dto_without_user_id_deserializes() {
        let dto: CompanyDto =
            serde_json::from_str(r#"{"name":"Acme","sector":"Tech"}"#).unwrap();
        assert!(dto.user_id.is_none());
    }

    #[test]
    fn test_response_inlines_only_parent_id() {
        let row = CompanyRow {
            id: 2,
            user_id: 9,
            name: "Acme".to_string(),
            sector: "Tech".to_string(),
            accessibility_type: Some(AccessibilityType::Medium),
            website: None,
            description: None,
        };
        let json = serde_json::to_value(CompanyResponse::from(row)).unwrap();
        assert_eq!(json["userId"], 9);
        assert_eq!(json["accessibilityType"], "MEDIUM");
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_filter_rejects_unknown_accessibility() {
        let params = CompanyFilterParams {
            accessibility_type: Some("TOTAL".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_filter().unwrap_err().status.as_u16(), 400);
    }
}
