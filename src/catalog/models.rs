//! Authoring model for quiz content.
//!
//! Quizzes are authored ahead of time and never mutated by a running game;
//! sessions only read question text, answer options, and timing from them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on the number of answer options a question can offer.
pub const MAX_ANSWERS_PER_QUESTION: usize = 4;

/// A quiz: an ordered list of questions played front to back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quiz {
    /// Stable identifier for the quiz.
    pub id: Uuid,
    /// Human readable quiz title.
    pub title: String,
    /// Free-form description shown when picking a quiz.
    #[serde(default)]
    pub description: String,
    /// Ordered questions; a question's position in this list is its identity.
    pub questions: Vec<Question>,
}

/// A single question with its answer options and timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// Text shown to participants while the question is open.
    pub text: String,
    /// Seconds the answer window stays open once the question is shown.
    pub answer_time: u32,
    /// Candidate answers; at most [`MAX_ANSWERS_PER_QUESTION`], exactly one correct.
    pub answers: Vec<Answer>,
}

impl Question {
    /// Position of the correct answer within [`Self::answers`].
    ///
    /// Returns `None` only for questions that never passed catalog validation.
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|answer| answer.correct)
    }
}

/// One selectable answer option of a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    /// Text shown to participants.
    pub text: String,
    /// Whether picking this answer scores the point.
    #[serde(default)]
    pub correct: bool,
}
