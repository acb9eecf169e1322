use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::participant::{GuessResponse, JoinGameRequest, JoinResponse, SubmitGuessRequest},
    error::AppError,
    services::{guess_service, roster_service},
    state::SharedState,
};

/// Routes used by players to enter games and submit guesses.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/participants", post(join_game))
        .route("/guesses", post(submit_guess))
}

/// Join a waiting game under a fresh alias.
#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = JoinGameRequest,
    responses(
        (status = 200, description = "Joined the game", body = JoinResponse),
        (status = 400, description = "Invalid alias"),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Alias already taken or game already started")
    )
)]
pub async fn join_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<JoinGameRequest>>,
) -> Result<Json<JoinResponse>, AppError> {
    let joined = roster_service::join_game(&state, payload).await?;
    Ok(Json(joined))
}

/// Submit an answer for the question currently accepting guesses.
#[utoipa::path(
    post,
    path = "/guesses",
    tag = "participants",
    request_body = SubmitGuessRequest,
    responses(
        (status = 200, description = "Guess recorded", body = GuessResponse),
        (status = 400, description = "Question or answer index outside the quiz"),
        (status = 404, description = "Game or participant not found"),
        (status = 409, description = "Duplicate guess or closed answer window")
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitGuessRequest>,
) -> Result<Json<GuessResponse>, AppError> {
    let recorded = guess_service::submit_guess(&state, payload).await?;
    Ok(Json(recorded))
}
