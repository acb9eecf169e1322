//! DTO definitions for browsing the quiz catalog.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::Quiz;

/// Minimal projection of a quiz available for game creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub question_count: usize,
}

/// Response payload listing the quizzes in the catalog.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizzesResponse {
    pub quizzes: Vec<QuizListItem>,
}

impl From<&Quiz> for QuizListItem {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            question_count: quiz.questions.len(),
        }
    }
}
