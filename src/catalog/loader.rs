//! Catalog loading and validation, including the built-in sample quizzes.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use indexmap::IndexMap;
use tracing::{info, warn};
use uuid::Uuid;

use super::models::{Answer, MAX_ANSWERS_PER_QUESTION, Question, Quiz};

/// Default location on disk where the server looks for the quiz catalog.
const DEFAULT_CATALOG_PATH: &str = "config/quizzes.json";
/// Environment variable that overrides [`DEFAULT_CATALOG_PATH`].
const CATALOG_PATH_ENV: &str = "QUIZ_RALLY_CATALOG_PATH";

/// Immutable set of quizzes available to new games, in authoring order.
#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    quizzes: IndexMap<Uuid, Quiz>,
}

impl QuizCatalog {
    /// Load the catalog from disk, falling back to the built-in sample set.
    pub fn load() -> Self {
        let path = resolve_catalog_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Quiz>>(&contents) {
                Ok(quizzes) => {
                    let catalog = Self::from_quizzes(quizzes);
                    info!(
                        path = %path.display(),
                        count = catalog.len(),
                        "loaded quiz catalog from disk"
                    );
                    catalog
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse quiz catalog; falling back to built-in quizzes"
                    );
                    Self::builtin()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "quiz catalog not found; using built-in quizzes"
                );
                Self::builtin()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read quiz catalog; falling back to built-in quizzes"
                );
                Self::builtin()
            }
        }
    }

    /// Build a catalog from already-parsed quizzes, dropping entries that
    /// break the authoring rules.
    pub fn from_quizzes(quizzes: Vec<Quiz>) -> Self {
        let mut indexed = IndexMap::with_capacity(quizzes.len());
        for quiz in quizzes {
            if let Err(reason) = validate_quiz(&quiz) {
                warn!(quiz = %quiz.id, %reason, "dropping invalid quiz from catalog");
                continue;
            }
            if indexed.insert(quiz.id, quiz).is_some() {
                warn!("duplicate quiz id in catalog; keeping the later entry");
            }
        }
        Self { quizzes: indexed }
    }

    /// Catalog built from the sample quizzes shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_quizzes(builtin_quizzes())
    }

    /// Look up a quiz by its identifier.
    pub fn get(&self, id: &Uuid) -> Option<&Quiz> {
        self.quizzes.get(id)
    }

    /// Iterate over the quizzes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Quiz> {
        self.quizzes.values()
    }

    /// Number of quizzes available.
    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    /// Whether the catalog holds no quizzes at all.
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

/// Resolve the catalog path taking the environment override into account.
fn resolve_catalog_path() -> PathBuf {
    env::var_os(CATALOG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}

/// Check a quiz against the authoring rules before it can reach a game.
///
/// A quiz with zero questions is accepted: the first advance of such a game
/// goes straight to the leaderboard.
fn validate_quiz(quiz: &Quiz) -> Result<(), String> {
    for (index, question) in quiz.questions.iter().enumerate() {
        validate_question(question).map_err(|reason| format!("question {index} {reason}"))?;
    }
    Ok(())
}

fn validate_question(question: &Question) -> Result<(), String> {
    if question.answers.is_empty() {
        return Err("has no answers".into());
    }
    if question.answers.len() > MAX_ANSWERS_PER_QUESTION {
        return Err(format!(
            "has {} answers (maximum is {MAX_ANSWERS_PER_QUESTION})",
            question.answers.len()
        ));
    }
    let correct = question
        .answers
        .iter()
        .filter(|answer| answer.correct)
        .count();
    if correct != 1 {
        return Err(format!("has {correct} correct answers (expected exactly 1)"));
    }
    if question.answer_time == 0 {
        return Err("has a zero answer time (minimum is 1 second)".into());
    }
    Ok(())
}

/// Sample quizzes shipped with the binary so the server is playable without
/// a catalog file.
fn builtin_quizzes() -> Vec<Quiz> {
    vec![
        Quiz {
            id: Uuid::from_u128(0x9b1deb4d_3b7d_4bad_9bdd_2b0d7b3dcb6d),
            title: "Capitals of Europe".into(),
            description: "Warm-up round on European geography.".into(),
            questions: vec![
                Question {
                    text: "What is the capital of France?".into(),
                    answer_time: 10,
                    answers: vec![
                        Answer {
                            text: "Paris".into(),
                            correct: true,
                        },
                        Answer {
                            text: "Lyon".into(),
                            correct: false,
                        },
                        Answer {
                            text: "Marseille".into(),
                            correct: false,
                        },
                    ],
                },
                Question {
                    text: "What is the capital of Spain?".into(),
                    answer_time: 10,
                    answers: vec![
                        Answer {
                            text: "Barcelona".into(),
                            correct: false,
                        },
                        Answer {
                            text: "Madrid".into(),
                            correct: true,
                        },
                        Answer {
                            text: "Seville".into(),
                            correct: false,
                        },
                        Answer {
                            text: "Valencia".into(),
                            correct: false,
                        },
                    ],
                },
            ],
        },
        Quiz {
            id: Uuid::from_u128(0x1c0b8f5e_2a64_4f3b_8c3a_5f9d6e7a8b9c),
            title: "Quick Maths".into(),
            description: "Two-question arithmetic sprint.".into(),
            questions: vec![
                Question {
                    text: "What is 7 * 8?".into(),
                    answer_time: 15,
                    answers: vec![
                        Answer {
                            text: "54".into(),
                            correct: false,
                        },
                        Answer {
                            text: "56".into(),
                            correct: true,
                        },
                        Answer {
                            text: "58".into(),
                            correct: false,
                        },
                        Answer {
                            text: "64".into(),
                            correct: false,
                        },
                    ],
                },
                Question {
                    text: "What is 120 / 4?".into(),
                    answer_time: 15,
                    answers: vec![
                        Answer {
                            text: "30".into(),
                            correct: true,
                        },
                        Answer {
                            text: "25".into(),
                            correct: false,
                        },
                        Answer {
                            text: "40".into(),
                            correct: false,
                        },
                    ],
                },
            ],
        },
    ]
}
