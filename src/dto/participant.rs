//! DTO definitions for joining games and submitting guesses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{format_system_time, validation::validate_alias},
    state::game::{Guess, Participant},
};

/// Payload a player sends to join a waiting game.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinGameRequest {
    /// Public code of the game to join.
    pub public_id: u32,
    /// Display name; must be unique within the game.
    pub alias: String,
}

impl Validate for JoinGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_alias(&self.alias) {
            errors.add("alias", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Confirmation returned once a player is on the roster.
///
/// The token is the player's only credential for guessing; it is returned
/// exactly once, here.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinResponse {
    pub public_id: u32,
    pub alias: String,
    pub token: Uuid,
    pub joined_at: String,
}

/// Payload submitting one answer for the current question.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitGuessRequest {
    /// Token issued when the participant joined.
    pub token: Uuid,
    /// Public code of the game being played.
    pub public_id: u32,
    /// Position of the guessed question in the quiz.
    pub question_index: usize,
    /// Position of the chosen answer within the question's options.
    pub answer_index: usize,
}

/// Acknowledgement of a recorded guess.
///
/// Correctness is not echoed back; players learn it on the reveal screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuessResponse {
    pub public_id: u32,
    pub question_index: usize,
    pub answer_index: usize,
}

impl From<(u32, &Participant)> for JoinResponse {
    fn from((public_id, participant): (u32, &Participant)) -> Self {
        Self {
            public_id,
            alias: participant.alias.clone(),
            token: participant.token,
            joined_at: format_system_time(participant.joined_at),
        }
    }
}

impl From<(u32, Guess)> for GuessResponse {
    fn from((public_id, guess): (u32, Guess)) -> Self {
        Self {
            public_id,
            question_index: guess.question_index,
            answer_index: guess.answer_index,
        }
    }
}
