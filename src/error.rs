use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

/// Rejections produced by the core engine operations.
///
/// Every variant is an expected, caller-recoverable outcome surfaced as a
/// declined operation: the engine never retries and never silently corrects
/// (a duplicate alias is rejected, not renamed or merged).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Every public id in `[1, max_id]` is in use; game creation is rejected.
    #[error("no public id available: all {max_id} game codes are in use")]
    CapacityExhausted {
        /// Size of the public id keyspace that was exhausted.
        max_id: u32,
    },
    /// A guess is already recorded for this participant and question.
    #[error("a guess is already recorded for this participant and question")]
    DuplicateGuess,
    /// The guessed question is not the one currently accepting answers.
    #[error("the answer window for this question is not open")]
    StaleOrFutureQuestion,
    /// Participants can only join while the game is waiting to start.
    #[error("this game is not accepting participants")]
    GameNotAccepting,
    /// Another participant of the same game already uses this alias.
    #[error("alias `{0}` is already taken in this game")]
    DuplicateAlias(String),
    /// A referenced game, quiz, or participant does not resolve.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request referenced a question or answer outside the quiz.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with the current game state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Service cannot take on more work.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::CapacityExhausted { .. } => AppError::ServiceUnavailable(err.to_string()),
            EngineError::DuplicateGuess
            | EngineError::StaleOrFutureQuestion
            | EngineError::GameNotAccepting
            | EngineError::DuplicateAlias(_) => AppError::Conflict(err.to_string()),
            EngineError::NotFound(message) => AppError::NotFound(message),
            EngineError::InvalidInput(message) => AppError::BadRequest(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
