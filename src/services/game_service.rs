//! Game lifecycle operations: creation, polling snapshots, phase advancement,
//! tallies, and deletion.

use tracing::{debug, info};

use crate::{
    dto::game::{AnsweredResponse, CreateGameRequest, GameSnapshot, TallyResponse},
    error::EngineError,
    state::{SharedState, game::GameSession},
};

/// Create a game in the waiting phase for the quiz named in the request.
///
/// The quiz is resolved before an id is allocated, so an unknown quiz never
/// burns a public id.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameSnapshot, EngineError> {
    let quiz = state
        .catalog()
        .get(&request.quiz_id)
        .cloned()
        .ok_or_else(|| EngineError::NotFound(format!("quiz `{}` not found", request.quiz_id)))?;

    let public_id = state.allocator().allocate().await?;
    let session = GameSession::new(public_id, quiz, state.waiting_countdown());
    let snapshot = GameSnapshot::from(&session);
    state.games().insert(session);

    info!(public_id, quiz_id = %request.quiz_id, "created game");
    Ok(snapshot)
}

/// Phase-dependent projection of a live game, as polled by every client.
pub async fn game_snapshot(
    state: &SharedState,
    public_id: u32,
) -> Result<GameSnapshot, EngineError> {
    state
        .games()
        .with_game(public_id, |session| GameSnapshot::from(session))
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))
}

/// Move the game one phase forward and return the resulting snapshot.
///
/// Calls past the leaderboard are harmless no-ops, so an over-eager driver
/// polling twice cannot corrupt a finished game.
pub async fn advance_game(
    state: &SharedState,
    public_id: u32,
) -> Result<GameSnapshot, EngineError> {
    let snapshot = state
        .games()
        .with_game_mut(public_id, |session| {
            session.advance();
            GameSnapshot::from(&*session)
        })
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))?;

    debug!(public_id, phase = ?snapshot.phase, "advanced game");
    Ok(snapshot)
}

/// Progress of the current question's answer window across the roster.
pub async fn answered_progress(
    state: &SharedState,
    public_id: u32,
) -> Result<AnsweredResponse, EngineError> {
    state
        .games()
        .with_game(public_id, |session| AnsweredResponse::from(session))
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))
}

/// Aggregated guess counts for one question of a game.
///
/// Without an explicit index the game's current question is tallied, which
/// is what the reveal screen polls for.
pub async fn question_tally(
    state: &SharedState,
    public_id: u32,
    question: Option<usize>,
) -> Result<TallyResponse, EngineError> {
    let (question_index, tally) = state
        .games()
        .with_game(public_id, |session| {
            let question_index = question.unwrap_or_else(|| session.question_index());
            session
                .tally(question_index)
                .map(|tally| (question_index, tally))
        })
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))??;

    Ok(TallyResponse::from((question_index, tally)))
}

/// Delete a game and release its public id for reuse.
///
/// The roster and the guess ledger die with the session.
pub async fn delete_game(state: &SharedState, public_id: u32) -> Result<(), EngineError> {
    let removed = state
        .games()
        .remove(public_id)
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))?;
    state.allocator().release(public_id).await;

    info!(
        public_id,
        participants = removed.participant_count(),
        "deleted game"
    );
    Ok(())
}
