//! User accounts.
//!
//! A user is either a candidate or a company account. The stored password
//! hash never leaves this module: [`UserRow`] carries it for login checks and
//! [`UserResponse`] is what the API returns.

use acessly_core::{AppError, PageParams, serde::deserialize_optional_string};
use acessly_db::Filter;
use acessly_models::UserRole;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validator::{PHONE_RE, parse_enum_param};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            city: row.city,
            state: row.state,
            phone: row.phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, max = 255, message = "password must be 8-255 characters"))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "state must be at most 50 characters"))]
    pub state: Option<String>,
    #[validate(
        length(max = 20, message = "phone must be at most 20 characters"),
        regex(path = *PHONE_RE, message = "phone must match (99) 99999-9999")
    )]
    pub phone: Option<String>,
}

/// Full replacement of a user's fields. A blank or absent password keeps the
/// current one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 8, max = 255, message = "password must be 8-255 characters"))]
    pub password: Option<String>,
    pub role: UserRole,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "state must be at most 50 characters"))]
    pub state: Option<String>,
    #[validate(
        length(max = 20, message = "phone must be at most 20 characters"),
        regex(path = *PHONE_RE, message = "phone must match (99) 99999-9999")
    )]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    /// Substring of the user's name (case-insensitive)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    /// Substring of the email (case-insensitive)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    /// CANDIDATE or COMPANY
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl UserFilterParams {
    pub fn to_filter(&self) -> Result<Filter, AppError> {
        let role = parse_enum_param::<UserRole>(self.role.as_deref())?;

        Ok(Filter::new()
            .contains("name", self.name.as_deref())
            .contains("email", self.email.as_deref())
            .equals("role", role.map(UserRole::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> UserRow {
        UserRow {
            id: 3,
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            role: UserRole::Candidate,
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_response_drops_password() {
        let json = serde_json::to_value(UserResponse::from(row())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["role"], "CANDIDATE");
    }

    #[test]
    fn test_filter_parses_role() {
        let params = UserFilterParams {
            name: Some("ana".to_string()),
            role: Some("company".to_string()),
            ..Default::default()
        };
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_filter_rejects_unknown_role() {
        let params = UserFilterParams {
            role: Some("ADMIN".to_string()),
            ..Default::default()
        };
        let err = params.to_filter().unwrap_err();
        assert_eq!(err.message(), "invalid role: ADMIN");
    }

    #[test]
    fn test_update_blank_password_is_absent() {
        let dto: UpdateUserDto = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@example.com","password":"","role":"CANDIDATE"}"#,
        )
        .unwrap();
        assert!(dto.password.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_validation() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ana","email":"not-an-email","password":"short","role":"CANDIDATE","phone":"(81) 99999-0000"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("phone"));
    }

    #[test]
    fn test_malformed_phone_is_rejected() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@example.com","password":"password123","role":"CANDIDATE","phone":"98765"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        let phone_errors = fields["phone"];
        assert_eq!(
            phone_errors[0].message.as_deref(),
            Some("phone must match (99) 99999-9999")
        );
    }
}
