use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::game::{AnsweredResponse, CreateGameRequest, GameSnapshot, TallyQuery, TallyResponse},
    error::AppError,
    services::{game_service, roster_service},
    state::SharedState,
};

/// Routes driving the lifecycle of live games.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", post(create_game))
        .route(
            "/games/{public_id}",
            get(game_snapshot).delete(delete_game),
        )
        .route("/games/{public_id}/advance", post(advance_game))
        .route("/games/{public_id}/answered", get(answered_progress))
        .route("/games/{public_id}/tally", get(question_tally))
        .route(
            "/games/{public_id}/participants/{alias}",
            delete(remove_participant),
        )
}

/// Create a game in the waiting phase for an existing quiz.
#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameSnapshot),
        (status = 404, description = "Quiz not found"),
        (status = 503, description = "No public id available")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = game_service::create_game(&state, payload).await?;
    Ok(Json(snapshot))
}

/// Poll the phase-dependent projection of a live game.
#[utoipa::path(
    get,
    path = "/games/{public_id}",
    tag = "games",
    params(("public_id" = u32, Path, description = "Public code of the game")),
    responses(
        (status = 200, description = "Current game projection", body = GameSnapshot),
        (status = 404, description = "Game not found")
    )
)]
pub async fn game_snapshot(
    State(state): State<SharedState>,
    Path(public_id): Path<u32>,
) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = game_service::game_snapshot(&state, public_id).await?;
    Ok(Json(snapshot))
}

/// Move the game one phase forward and return the resulting projection.
#[utoipa::path(
    post,
    path = "/games/{public_id}/advance",
    tag = "games",
    params(("public_id" = u32, Path, description = "Public code of the game")),
    responses(
        (status = 200, description = "Game advanced", body = GameSnapshot),
        (status = 404, description = "Game not found")
    )
)]
pub async fn advance_game(
    State(state): State<SharedState>,
    Path(public_id): Path<u32>,
) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = game_service::advance_game(&state, public_id).await?;
    Ok(Json(snapshot))
}

/// Report how many participants have answered the current question.
#[utoipa::path(
    get,
    path = "/games/{public_id}/answered",
    tag = "games",
    params(("public_id" = u32, Path, description = "Public code of the game")),
    responses(
        (status = 200, description = "Answer progress", body = AnsweredResponse),
        (status = 404, description = "Game not found")
    )
)]
pub async fn answered_progress(
    State(state): State<SharedState>,
    Path(public_id): Path<u32>,
) -> Result<Json<AnsweredResponse>, AppError> {
    let progress = game_service::answered_progress(&state, public_id).await?;
    Ok(Json(progress))
}

/// Aggregate guess counts per answer option for one question.
#[utoipa::path(
    get,
    path = "/games/{public_id}/tally",
    tag = "games",
    params(
        ("public_id" = u32, Path, description = "Public code of the game"),
        ("question" = Option<usize>, Query, description = "Question to tally; defaults to the current one")
    ),
    responses(
        (status = 200, description = "Guess tally", body = TallyResponse),
        (status = 400, description = "Question index outside the quiz"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn question_tally(
    State(state): State<SharedState>,
    Path(public_id): Path<u32>,
    Query(query): Query<TallyQuery>,
) -> Result<Json<TallyResponse>, AppError> {
    let tally = game_service::question_tally(&state, public_id, query.question).await?;
    Ok(Json(tally))
}

/// Delete a game, cascading to its roster and guesses.
#[utoipa::path(
    delete,
    path = "/games/{public_id}",
    tag = "games",
    params(("public_id" = u32, Path, description = "Public code of the game")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(public_id): Path<u32>,
) -> Result<StatusCode, AppError> {
    game_service::delete_game(&state, public_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Kick a participant out of a game.
#[utoipa::path(
    delete,
    path = "/games/{public_id}/participants/{alias}",
    tag = "games",
    params(
        ("public_id" = u32, Path, description = "Public code of the game"),
        ("alias" = String, Path, description = "Alias of the participant to remove")
    ),
    responses(
        (status = 204, description = "Participant removed (or was already gone)"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn remove_participant(
    State(state): State<SharedState>,
    Path((public_id, alias)): Path<(u32, String)>,
) -> Result<StatusCode, AppError> {
    roster_service::remove_participant(&state, public_id, &alias).await?;
    Ok(StatusCode::NO_CONTENT)
}
