use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_candidate, delete_candidate, get_candidates, get_candidate, update_candidate,
};

pub fn init_candidates_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_candidate).get(get_candidates))
        .route(
            "/{id}",
            get(get_candidate).put(update_candidate).delete(delete_candidate),
        )
}
