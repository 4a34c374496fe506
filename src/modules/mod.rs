pub mod auth;
pub mod candidacies;
pub mod candidates;
pub mod companies;
pub mod company_support;
pub mod users;
pub mod vacancies;
