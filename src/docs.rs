use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use acessly_models::{AccessibilityType, CandidacyStatus, DisabilityType, UserRole, VacancyType};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::candidacies::model::{CandidacyDto, CandidacyResponse};
use crate::modules::candidates::model::{CandidateDto, CandidateResponse};
use crate::modules::companies::model::{CompanyDto, CompanyResponse};
use crate::modules::company_support::model::{CompanySupportDto, CompanySupportResponse};
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, UserResponse};
use crate::modules::vacancies::model::{VacancyDto, VacancyResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::companies::controller::create_company,
        crate::modules::companies::controller::get_companies,
        crate::modules::companies::controller::get_company,
        crate::modules::companies::controller::update_company,
        crate::modules::companies::controller::delete_company,
        crate::modules::candidates::controller::create_candidate,
        crate::modules::candidates::controller::get_candidates,
        crate::modules::candidates::controller::get_candidate,
        crate::modules::candidates::controller::update_candidate,
        crate::modules::candidates::controller::delete_candidate,
        crate::modules::vacancies::controller::create_vacancy,
        crate::modules::vacancies::controller::get_vacancies,
        crate::modules::vacancies::controller::get_vacancy,
        crate::modules::vacancies::controller::update_vacancy,
        crate::modules::vacancies::controller::delete_vacancy,
        crate::modules::candidacies::controller::create_candidacy,
        crate::modules::candidacies::controller::get_candidacies,
        crate::modules::candidacies::controller::get_candidacy,
        crate::modules::candidacies::controller::get_candidacies_by_candidate,
        crate::modules::candidacies::controller::get_candidacies_by_vacancy,
        crate::modules::candidacies::controller::update_candidacy_status,
        crate::modules::candidacies::controller::delete_candidacy,
        crate::modules::company_support::controller::create_support,
        crate::modules::company_support::controller::get_supports,
        crate::modules::company_support::controller::get_support,
        crate::modules::company_support::controller::get_supports_by_company,
        crate::modules::company_support::controller::update_support,
        crate::modules::company_support::controller::delete_support,
    ),
    components(
        schemas(
            UserRole,
            AccessibilityType,
            DisabilityType,
            VacancyType,
            CandidacyStatus,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            CreateUserDto,
            UpdateUserDto,
            UserResponse,
            CompanyDto,
            CompanyResponse,
            CandidateDto,
            CandidateResponse,
            VacancyDto,
            VacancyResponse,
            CandidacyDto,
            CandidacyResponse,
            CompanySupportDto,
            CompanySupportResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "Candidate and company accounts"),
        (name = "Companies", description = "Company profiles"),
        (name = "Candidates", description = "Candidate profiles"),
        (name = "Vacancies", description = "Job vacancies published by companies"),
        (name = "Candidacies", description = "Applications of candidates to vacancies"),
        (name = "Company Support", description = "Accessibility support offered by companies")
    ),
    info(
        title = "Acessly API",
        version = "0.1.0",
        description = "Job platform connecting candidates with disabilities to accessible vacancies.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/auth/login",
            "/api/users",
            "/api/companies/{id}",
            "/api/candidates",
            "/api/vacancies/{id}",
            "/api/candidacies/{id}/status",
            "/api/candidacies/vacancy/{vacancyId}",
            "/api/company-support/companies/{companyId}",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
