//! Roster operations: joining a waiting game and kicking participants.

use tracing::info;

use crate::{
    dto::participant::{JoinGameRequest, JoinResponse},
    error::EngineError,
    state::SharedState,
};

/// Join a player to a game that is still waiting to start.
///
/// The returned payload carries the token the player must present with every
/// guess; it is not retrievable afterwards.
pub async fn join_game(
    state: &SharedState,
    request: JoinGameRequest,
) -> Result<JoinResponse, EngineError> {
    let public_id = request.public_id;
    let joined = state
        .games()
        .with_game_mut(public_id, |session| session.join(request.alias))
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))??;

    info!(public_id, alias = %joined.alias, "participant joined");
    Ok(JoinResponse::from((public_id, &joined)))
}

/// Kick a participant out of a game, dropping their guesses with them.
///
/// Removing an alias that is not on the roster is a no-op, so the operation
/// can be retried safely.
pub async fn remove_participant(
    state: &SharedState,
    public_id: u32,
    alias: &str,
) -> Result<(), EngineError> {
    let removed = state
        .games()
        .with_game_mut(public_id, |session| session.remove_participant(alias))
        .ok_or_else(|| EngineError::NotFound(format!("game `{public_id}` not found")))?;

    if removed {
        info!(public_id, alias, "participant removed");
    }
    Ok(())
}
