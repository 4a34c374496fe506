use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_candidacy, delete_candidacy, get_candidacies, get_candidacies_by_candidate,
    get_candidacies_by_vacancy, get_candidacy, update_candidacy_status,
};

pub fn init_candidacies_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_candidacy).get(get_candidacies))
        .route("/{id}", get(get_candidacy).delete(delete_candidacy))
        .route("/{id}/status", patch(update_candidacy_status))
        .route("/candidates/{candidate_id}", get(get_candidacies_by_candidate))
        .route("/vacancy/{vacancy_id}", get(get_candidacies_by_vacancy))
}
