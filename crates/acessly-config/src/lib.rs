//! # Acessly Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing and expiry
//! - [`cors`]: allowed browser origins
//! - [`database`]: connection string and pool size
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use acessly_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let db_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::{ConfigError, DatabaseConfig};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
