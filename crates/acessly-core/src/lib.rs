//! # Acessly Core
//!
//! Foundational types shared by every Acessly crate:
//!
//! - [`errors`]: the API error type and its HTTP rendering
//! - [`pagination`]: page requests, sort specs and the page envelope
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: blank-tolerant query parameter deserializers

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{Page, PageParams, SortDirection, SortSpec};
pub use password::{hash_password, verify_password};
