use acessly::middleware::auth::AuthUser;
use acessly::middleware::role::{Capability, allows, check_account_owner, check_capability};
use acessly_auth::Claims;
use acessly_models::UserRole;
use axum::http::StatusCode;

fn create_test_auth_user(role: UserRole) -> AuthUser {
    AuthUser(Claims {
        sub: "1".to_string(),
        email: "test@example.com".to_string(),
        role,
        iss: "acessly".to_string(),
        exp: 9999999999,
        iat: 1234567890,
    })
}

const ALL_CAPABILITIES: [Capability; 7] = [
    Capability::ManageAccount,
    Capability::ManageCompanies,
    Capability::ManageVacancies,
    Capability::ManageCompanySupport,
    Capability::ReviewApplications,
    Capability::ManageCandidateProfile,
    Capability::Apply,
];

#[test]
fn test_check_capability_granted() {
    let company = create_test_auth_user(UserRole::Company);
    assert!(check_capability(&company, Capability::ManageVacancies).is_ok());
    assert!(check_capability(&company, Capability::ReviewApplications).is_ok());

    let candidate = create_test_auth_user(UserRole::Candidate);
    assert!(check_capability(&candidate, Capability::Apply).is_ok());
    assert!(check_capability(&candidate, Capability::ManageCandidateProfile).is_ok());
}

#[test]
fn test_check_capability_denied_is_forbidden() {
    let candidate = create_test_auth_user(UserRole::Candidate);
    let err = check_capability(&candidate, Capability::ManageCompanies).unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert!(err.message().contains("ManageCompanies"));

    let company = create_test_auth_user(UserRole::Company);
    let err = check_capability(&company, Capability::Apply).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_every_capability_has_a_holder() {
    for capability in ALL_CAPABILITIES {
        assert!(
            UserRole::ALL.iter().any(|role| allows(*role, capability)),
            "no role holds {}",
            capability.name()
        );
    }
}

#[test]
fn test_roles_split_domain_capabilities() {
    for capability in ALL_CAPABILITIES {
        if capability == Capability::ManageAccount {
            continue;
        }
        assert_ne!(
            allows(UserRole::Company, capability),
            allows(UserRole::Candidate, capability),
            "{} should belong to exactly one role",
            capability.name()
        );
    }
}

#[test]
fn test_account_writes_limited_to_owner() {
    let auth_user = create_test_auth_user(UserRole::Company);

    assert!(check_account_owner(&auth_user, 1).is_ok());

    let err = check_account_owner(&auth_user, 2).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}
