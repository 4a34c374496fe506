use acessly_core::{AppError, Page, hash_password};
use acessly_db::{QuerySpec, fetch_page};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::integrity::IntegrityGuard;
use crate::metrics::track_user_registered;
use crate::modules::users::model::{
    CreateUserDto, UpdateUserDto, UserFilterParams, UserResponse, UserRow,
};

const USER_COLUMNS: &str = "u.id, u.name, u.email, u.password, u.role, u.city, u.state, u.phone";

pub const USER_QUERY: QuerySpec = QuerySpec {
    select: "SELECT u.id, u.name, u.email, u.password, u.role, u.city, u.state, u.phone FROM users u",
    count: "SELECT COUNT(*) FROM users u",
    alias: "u",
    sortable: &[
        ("id", "u.id"),
        ("name", "u.name"),
        ("email", "u.email"),
        ("role", "u.role"),
        ("city", "u.city"),
    ],
};

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<UserResponse, AppError> {
        IntegrityGuard::ensure_email_available(db, &dto.email, None).await?;

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users AS u (name, email, password, role, city, state, phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role)
        .bind(&dto.city)
        .bind(&dto.state)
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?;

        track_user_registered(user.role.as_str());
        info!(user_id = user.id, role = %user.role, "User registered");

        Ok(user.into())
    }

    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        params: UserFilterParams,
    ) -> Result<Page<UserResponse>, AppError> {
        let filter = params.to_filter()?;
        let page = fetch_page::<UserRow>(db, &USER_QUERY, &filter, &params.page).await?;
        Ok(page.map(UserResponse::from))
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: i64) -> Result<UserResponse, AppError> {
        Self::find_row(db, id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Loads the stored row, password hash included. Used by login.
    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users u WHERE u.email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn update_user(
        db: &PgPool,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<UserResponse, AppError> {
        let existing = Self::find_row(db, id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        IntegrityGuard::ensure_email_available(db, &dto.email, Some(id)).await?;

        let password_hash = match dto.password.as_deref() {
            Some(password) => hash_password(password)?,
            None => existing.password,
        };

        let user = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users AS u
             SET name = $1, email = $2, password = $3, role = $4, city = $5, state = $6, phone = $7
             WHERE u.id = $8
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role)
        .bind(&dto.city)
        .bind(&dto.state)
        .bind(&dto.phone)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(IntegrityGuard::map_write_error)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user.into())
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }

    async fn find_row(db: &PgPool, id: i64) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users u WHERE u.id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
