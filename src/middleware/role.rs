//! Role-based write authorization.
//!
//! Every write operation names the [`Capability`] it needs. Whether a role
//! grants it is decided by [`allows`], a single table keyed by the role claim
//! in the caller's token. Reads only require authentication.
//!
//! Account writes are further limited to the caller's own account by
//! [`check_account_owner`].

use acessly_core::AppError;
use acessly_models::UserRole;
use tracing::warn;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Update or delete a user account.
    ManageAccount,
    ManageCompanies,
    ManageVacancies,
    ManageCompanySupport,
    /// List a vacancy's candidacies and change their status.
    ReviewApplications,
    ManageCandidateProfile,
    /// Create or withdraw a candidacy.
    Apply,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Self::ManageAccount => "ManageAccount",
            Self::ManageCompanies => "ManageCompanies",
            Self::ManageVacancies => "ManageVacancies",
            Self::ManageCompanySupport => "ManageCompanySupport",
            Self::ReviewApplications => "ReviewApplications",
            Self::ManageCandidateProfile => "ManageCandidateProfile",
            Self::Apply => "Apply",
        }
    }
}

pub fn allows(role: UserRole, capability: Capability) -> bool {
    use Capability::*;

    match capability {
        ManageAccount => true,
        ManageCompanies | ManageVacancies | ManageCompanySupport | ReviewApplications => {
            role == UserRole::Company
        }
        ManageCandidateProfile | Apply => role == UserRole::Candidate,
    }
}

pub fn check_capability(auth_user: &AuthUser, capability: Capability) -> Result<(), AppError> {
    let role = auth_user.role();
    if allows(role, capability) {
        return Ok(());
    }

    warn!(
        user = %auth_user.0.sub,
        role = %role,
        capability = capability.name(),
        "Capability denied"
    );

    Err(AppError::forbidden(format!(
        "Access denied. Role {} lacks capability {}",
        role,
        capability.name()
    )))
}

pub fn check_account_owner(auth_user: &AuthUser, account_id: i64) -> Result<(), AppError> {
    if auth_user.user_id()? == account_id {
        return Ok(());
    }

    warn!(
        user = %auth_user.0.sub,
        account_id,
        "Account write denied"
    );

    Err(AppError::forbidden(
        "Access denied. Accounts can only be changed by their owner",
    ))
}
