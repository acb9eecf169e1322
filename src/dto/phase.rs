use serde::Serialize;
use utoipa::ToSchema;

use crate::state::machine::GamePhase;

/// Publicly visible game phase exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisiblePhase {
    /// Participants can still join; the host has not started the quiz.
    Waiting,
    /// A question is on screen and accepting guesses.
    Question,
    /// The correct answer and the guess tally are on screen.
    Answer,
    /// Final standings are displayed.
    Leaderboard,
}

impl From<GamePhase> for VisiblePhase {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Waiting => VisiblePhase::Waiting,
            GamePhase::Question => VisiblePhase::Question,
            GamePhase::Answer => VisiblePhase::Answer,
            GamePhase::Leaderboard => VisiblePhase::Leaderboard,
        }
    }
}
