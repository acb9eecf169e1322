use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::quiz::QuizzesResponse, services::catalog_service, state::SharedState};

/// List the quizzes available for new games.
#[utoipa::path(
    get,
    path = "/quizzes",
    tag = "quizzes",
    responses((status = 200, description = "Available quizzes", body = QuizzesResponse))
)]
pub async fn list_quizzes(State(state): State<SharedState>) -> Json<QuizzesResponse> {
    let quizzes = catalog_service::list_quizzes(&state).await;
    Json(quizzes)
}

/// Configure the quiz catalog routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/quizzes", get(list_quizzes))
}
