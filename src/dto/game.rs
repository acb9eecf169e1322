use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    catalog::{Question, Quiz},
    dto::{format_system_time, phase::VisiblePhase},
    state::{
        game::{GameSession, Participant, QuestionTally},
        machine::GamePhase,
    },
};

/// Payload used to spin up a new game for an existing quiz.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    pub quiz_id: Uuid,
}

/// Minimal projection of the quiz a game is playing.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizBrief {
    pub id: Uuid,
    pub title: String,
    pub question_count: usize,
}

/// The question currently on screen, without its correct-answer marks.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub answer_time: u32,
    /// Answer texts in option order; guesses reference these by position.
    pub answers: Vec<String>,
}

/// One answer option as shown on the reveal screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerReveal {
    pub text: String,
    pub correct: bool,
    pub count: u32,
}

/// Reveal data for the current question during the answer phase.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevealView {
    pub answers: Vec<AnswerReveal>,
    pub total_guesses: u32,
}

/// One row of the final leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingsRow {
    pub alias: String,
    pub points: u32,
}

/// Phase-dependent projection of a live game returned by the polling endpoints.
///
/// The optional sections follow the phase: `roster` while waiting, `question`
/// while a question is shown or revealed, `reveal` during the answer phase,
/// `standings` from the first reveal onward (interim scores between
/// questions, final scores on the leaderboard).
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSnapshot {
    pub public_id: u32,
    pub phase: VisiblePhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_index: Option<usize>,
    pub countdown_seconds: u32,
    pub participant_count: usize,
    pub quiz: QuizBrief,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standings: Option<Vec<StandingsRow>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Progress of the current question's answer window across the roster.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnsweredResponse {
    pub answered: usize,
    pub participants: usize,
    pub all_answered: bool,
}

/// Query selecting the question to tally; omitted means the current one.
#[derive(Debug, Deserialize)]
pub struct TallyQuery {
    pub question: Option<usize>,
}

/// Aggregated guess counts for one question.
#[derive(Debug, Serialize, ToSchema)]
pub struct TallyResponse {
    pub question_index: usize,
    /// Guesses per answer option, in the question's option order.
    pub counts: Vec<u32>,
    pub total: u32,
}

impl From<&Quiz> for QuizBrief {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            question_count: quiz.questions.len(),
        }
    }
}

impl From<(usize, &Question)> for QuestionView {
    fn from((index, question): (usize, &Question)) -> Self {
        Self {
            index,
            text: question.text.clone(),
            answer_time: question.answer_time,
            answers: question
                .answers
                .iter()
                .map(|answer| answer.text.clone())
                .collect(),
        }
    }
}

impl From<(&Question, QuestionTally)> for RevealView {
    fn from((question, tally): (&Question, QuestionTally)) -> Self {
        let answers = question
            .answers
            .iter()
            .enumerate()
            .map(|(index, answer)| AnswerReveal {
                text: answer.text.clone(),
                correct: answer.correct,
                count: tally.counts.get(index).copied().unwrap_or(0),
            })
            .collect();
        Self {
            answers,
            total_guesses: tally.total,
        }
    }
}

impl From<&Participant> for StandingsRow {
    fn from(participant: &Participant) -> Self {
        Self {
            alias: participant.alias.clone(),
            points: participant.points,
        }
    }
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        let phase = session.phase();

        let question_index = match phase {
            GamePhase::Waiting => None,
            _ => Some(session.question_index()),
        };
        let roster = match phase {
            GamePhase::Waiting => Some(
                session
                    .participants()
                    .map(|participant| participant.alias.clone())
                    .collect(),
            ),
            _ => None,
        };
        let question = session
            .current_question()
            .map(|current| QuestionView::from((session.question_index(), current)));
        let reveal = match phase {
            GamePhase::Answer => session
                .tally(session.question_index())
                .ok()
                .and_then(|tally| {
                    session
                        .current_question()
                        .map(|current| RevealView::from((current, tally)))
                }),
            _ => None,
        };
        let standings = match phase {
            GamePhase::Answer | GamePhase::Leaderboard => Some(
                session
                    .standings()
                    .iter()
                    .map(StandingsRow::from)
                    .collect(),
            ),
            _ => None,
        };

        Self {
            public_id: session.public_id,
            phase: phase.into(),
            question_index,
            countdown_seconds: session.countdown_seconds(),
            participant_count: session.participant_count(),
            quiz: session.quiz().into(),
            roster,
            question,
            reveal,
            standings,
            created_at: format_system_time(session.created_at),
            updated_at: format_system_time(session.updated_at),
        }
    }
}

impl From<&GameSession> for AnsweredResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            answered: session.answered_count(),
            participants: session.participant_count(),
            all_answered: session.all_participants_answered(),
        }
    }
}

impl From<(usize, QuestionTally)> for TallyResponse {
    fn from((question_index, tally): (usize, QuestionTally)) -> Self {
        Self {
            question_index,
            counts: tally.counts,
            total: tally.total,
        }
    }
}
