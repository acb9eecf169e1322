//! Service helpers exposing the read-only quiz catalog.

use crate::{
    dto::quiz::{QuizListItem, QuizzesResponse},
    state::SharedState,
};

/// List the quizzes available for new games, in catalog order.
pub async fn list_quizzes(state: &SharedState) -> QuizzesResponse {
    let quizzes = state.catalog().iter().map(QuizListItem::from).collect();
    QuizzesResponse { quizzes }
}
