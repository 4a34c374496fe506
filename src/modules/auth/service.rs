use acessly_auth::create_access_token;
use acessly_config::JwtConfig;
use acessly_core::{AppError, verify_password};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::metrics::{track_login_failure, track_login_success};
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::users::service::UserService;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(user) = UserService::find_by_email(db, &dto.email).await? else {
            warn!("Login failed: unknown email");
            track_login_failure();
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            track_login_failure();
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = create_access_token(user.id, &user.email, user.role, jwt_config)?;

        track_login_success(user.role.as_str());
        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            email: user.email,
            name: user.name,
            role: user.role,
        })
    }
}
