use acessly_auth::{Claims, verify_token};
use acessly_core::AppError;
use acessly_models::UserRole;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::middleware::role::Capability;
use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that authenticates the caller and then requires a
/// [`Capability`](crate::middleware::role::Capability) of their role.
#[macro_export]
macro_rules! require_capability {
    ($name:ident, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = acessly_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::role::check_capability(&auth_user, $capability)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_capability!(RequireManageAccount, Capability::ManageAccount);
require_capability!(RequireManageCompanies, Capability::ManageCompanies);
require_capability!(RequireManageVacancies, Capability::ManageVacancies);
require_capability!(RequireManageCompanySupport, Capability::ManageCompanySupport);
require_capability!(RequireReviewApplications, Capability::ReviewApplications);
require_capability!(RequireManageCandidateProfile, Capability::ManageCandidateProfile);
require_capability!(RequireApply, Capability::Apply);
