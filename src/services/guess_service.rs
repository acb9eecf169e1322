//! Guess recording against the current answer window.

use tracing::debug;

use crate::{
    dto::participant::{GuessResponse, SubmitGuessRequest},
    error::EngineError,
    state::SharedState,
};

/// Record a participant's answer for one question.
///
/// The whole check-and-insert, including the point increment for a correct
/// pick, runs inside the game's critical section; two racing submissions for
/// the same question resolve to one success and one duplicate rejection.
pub async fn submit_guess(
    state: &SharedState,
    request: SubmitGuessRequest,
) -> Result<GuessResponse, EngineError> {
    let SubmitGuessRequest {
        token,
        public_id,
        question_index,
        answer_index,
    } = request;

    let guess = state
        .games()
        .with_game_mut(public_id, |session| {
            session.record_guess(&token, question_index, answer_index)
        })
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))??;

    debug!(public_id, question_index, answer_index, "guess recorded");
    Ok(GuessResponse::from((public_id, guess)))
}
