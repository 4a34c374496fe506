use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_support, delete_support, get_support, get_supports, get_supports_by_company,
    update_support,
};

pub fn init_company_support_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_support).get(get_supports))
        .route(
            "/{id}",
            get(get_support).put(update_support).delete(delete_support),
        )
        .route("/companies/{company_id}", get(get_supports_by_company))
}
