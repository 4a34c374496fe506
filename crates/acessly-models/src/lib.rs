//! # Acessly Models
//!
//! Closed value sets used by the Acessly entities. Each enum serializes as its
//! upper-case name, is stored as `TEXT` (guarded by a `CHECK` constraint) and
//! parses from query strings through [`FromStr`](std::str::FromStr) with a
//! typed [`ParseEnumError`].

pub mod enums;

pub use enums::{
    AccessibilityType, CandidacyStatus, DisabilityType, ParseEnumError, UserRole, VacancyType,
};
