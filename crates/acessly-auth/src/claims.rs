use acessly_core::AppError;
use acessly_models::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// The role claim is all that write authorization needs, so handlers never
/// look the user up to decide what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Issuer
    pub iss: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Claims {
        Claims {
            sub: "42".to_string(),
            email: "ana@example.com".to_string(),
            role: UserRole::Candidate,
            iss: "acessly".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let serialized = serde_json::to_string(&sample()).unwrap();
        assert!(serialized.contains(r#""sub":"42""#));
        assert!(serialized.contains(r#""role":"CANDIDATE""#));
        assert!(serialized.contains(r#""iss":"acessly""#));
    }

    #[test]
    fn test_user_id_parses_subject() {
        assert_eq!(sample().user_id().unwrap(), 42);
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            ..sample()
        };
        assert_eq!(claims.user_id().unwrap_err().status.as_u16(), 401);
    }
}
