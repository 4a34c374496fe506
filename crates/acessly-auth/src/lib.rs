//! # Acessly Auth
//!
//! Bearer token support for the Acessly API:
//!
//! - [`claims`]: the access token payload
//! - [`jwt`]: HS256 token issuance and verification
//!
//! # Example
//!
//! ```ignore
//! use acessly_auth::{create_access_token, verify_token};
//! use acessly_config::JwtConfig;
//! use acessly_models::UserRole;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user.id, &user.email, UserRole::Company, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
