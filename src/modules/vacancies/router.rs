use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_vacancy, delete_vacancy, get_vacancies, get_vacancy, update_vacancy,
};

pub fn init_vacancies_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vacancy).get(get_vacancies))
        .route(
            "/{id}",
            get(get_vacancy).put(update_vacancy).delete(delete_vacancy),
        )
}
