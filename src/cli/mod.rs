//! Administrative commands behind the `acessly-cli` binary.

pub mod seeder;

use acessly_models::UserRole;
use sqlx::PgPool;
use validator::Validate;

use crate::modules::users::model::{CreateUserDto, UserResponse};
use crate::modules::users::service::UserService;

/// Registers an account through the same validation and integrity checks as
/// `POST /api/users`.
pub async fn create_user(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<UserResponse> {
    let dto = CreateUserDto {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
        city: None,
        state: None,
        phone: None,
    };

    dto.validate()?;

    UserService::create_user(db, dto)
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))
}
