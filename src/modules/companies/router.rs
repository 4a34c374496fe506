use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_company, delete_company, get_companies, get_company, update_company,
};

pub fn init_companies_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_company).get(get_companies))
        .route(
            "/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
}
