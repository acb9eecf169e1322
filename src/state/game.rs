use std::collections::HashMap;
use std::time::SystemTime;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::catalog::{Question, Quiz};
use crate::error::EngineError;
use crate::state::machine::{GameMachine, GamePhase};

/// A player joined to one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Display name, unique within the game.
    pub alias: String,
    /// Points scored so far, one per correct guess.
    pub points: u32,
    /// Private token issued at join time; presented with every guess.
    pub token: Uuid,
    /// When the participant joined.
    pub joined_at: SystemTime,
}

/// One immutable answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    /// Token of the participant who guessed.
    pub participant: Uuid,
    /// Position of the guessed question in the quiz.
    pub question_index: usize,
    /// Position of the chosen answer within the question's options.
    pub answer_index: usize,
    /// Whether the chosen answer was the correct one.
    pub correct: bool,
}

/// At most one guess can exist per participant and question within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GuessKey {
    participant: Uuid,
    question_index: usize,
}

/// Aggregated guess counts for one question's answer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTally {
    /// Guesses per answer option, in the question's answer order.
    pub counts: Vec<u32>,
    /// Total number of guesses recorded for the question.
    pub total: u32,
}

/// Aggregated state for one live game: the quiz being played, the phase
/// machine, the participant roster, and the guess ledger.
///
/// Sessions hold their own copy of the quiz, so catalog edits never reach a
/// game already in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Public join code, unique among live games.
    pub public_id: u32,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Refreshed by every mutating operation.
    pub updated_at: SystemTime,
    quiz: Quiz,
    machine: GameMachine,
    participants: IndexMap<String, Participant>,
    guesses: HashMap<GuessKey, Guess>,
}

impl GameSession {
    /// Build a new session in the waiting phase for the given quiz.
    pub fn new(public_id: u32, quiz: Quiz, waiting_countdown: u32) -> Self {
        let timestamp = SystemTime::now();
        Self {
            public_id,
            created_at: timestamp,
            updated_at: timestamp,
            machine: GameMachine::new(waiting_countdown),
            quiz,
            participants: IndexMap::new(),
            guesses: HashMap::new(),
        }
    }

    /// The quiz this game plays.
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current phase of the game.
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    /// Index of the current question; meaningful once the waiting phase is left.
    pub fn question_index(&self) -> usize {
        self.machine.question_index()
    }

    /// Seconds attached to the current phase: join countdown while waiting,
    /// answer window while a question is open.
    pub fn countdown_seconds(&self) -> u32 {
        self.machine.countdown_seconds()
    }

    /// Move the game to its next phase and return it.
    pub fn advance(&mut self) -> GamePhase {
        self.updated_at = SystemTime::now();
        self.machine.advance(&self.quiz)
    }

    /// The question the game is currently showing or revealing, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.machine.phase() {
            GamePhase::Question | GamePhase::Answer => {
                self.quiz.questions.get(self.machine.question_index())
            }
            GamePhase::Waiting | GamePhase::Leaderboard => None,
        }
    }

    /// Add a participant to the roster and issue their token.
    ///
    /// Joins are only accepted while the game is waiting, and the alias must
    /// not already be on the roster.
    pub fn join(&mut self, alias: String) -> Result<Participant, EngineError> {
        if self.machine.phase() != GamePhase::Waiting {
            return Err(EngineError::GameNotAccepting);
        }
        if self.participants.contains_key(&alias) {
            return Err(EngineError::DuplicateAlias(alias));
        }

        let participant = Participant {
            alias: alias.clone(),
            points: 0,
            token: Uuid::new_v4(),
            joined_at: SystemTime::now(),
        };
        self.participants.insert(alias, participant.clone());
        self.updated_at = SystemTime::now();
        Ok(participant)
    }

    /// Remove a participant by alias along with every guess they recorded.
    ///
    /// Returns whether a participant was actually removed; removing an alias
    /// that is not on the roster is a no-op.
    pub fn remove_participant(&mut self, alias: &str) -> bool {
        match self.participants.shift_remove(alias) {
            Some(removed) => {
                self.guesses
                    .retain(|key, _| key.participant != removed.token);
                self.updated_at = SystemTime::now();
                true
            }
            None => false,
        }
    }

    /// Find a participant by the token issued at join time.
    pub fn participant_by_token(&self, token: &Uuid) -> Option<&Participant> {
        self.participants
            .values()
            .find(|participant| participant.token == *token)
    }

    /// Roster in join order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Number of joined participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Record a guess for the question at `question_index`.
    ///
    /// Checks run in a fixed order so callers can rely on the failure kind:
    /// the token must resolve to a participant, both indices must exist in
    /// the quiz, the participant must not have guessed this question before,
    /// and the answer window must be open. On success the guess is inserted
    /// and a correct pick increments the participant's points in the same
    /// mutation.
    pub fn record_guess(
        &mut self,
        token: &Uuid,
        question_index: usize,
        answer_index: usize,
    ) -> Result<Guess, EngineError> {
        let alias = self
            .participant_by_token(token)
            .map(|participant| participant.alias.clone())
            .ok_or_else(|| {
                EngineError::NotFound("no participant with this token in the game".into())
            })?;

        let question = self.quiz.questions.get(question_index).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "question index {question_index} is outside the quiz"
            ))
        })?;
        let answer = question.answers.get(answer_index).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "answer index {answer_index} is outside the question"
            ))
        })?;
        let correct = answer.correct;

        let key = GuessKey {
            participant: *token,
            question_index,
        };
        if self.guesses.contains_key(&key) {
            return Err(EngineError::DuplicateGuess);
        }
        if !self.machine.answer_window_valid(question_index) {
            return Err(EngineError::StaleOrFutureQuestion);
        }

        let guess = Guess {
            participant: *token,
            question_index,
            answer_index,
            correct,
        };
        self.guesses.insert(key, guess);
        if correct {
            if let Some(scorer) = self.participants.get_mut(&alias) {
                scorer.points += 1;
            }
        }
        self.updated_at = SystemTime::now();
        Ok(guess)
    }

    /// Number of guesses recorded for the question currently on screen.
    pub fn answered_count(&self) -> usize {
        let current = self.machine.question_index();
        self.guesses
            .keys()
            .filter(|key| key.question_index == current)
            .count()
    }

    /// Whether every joined participant has guessed the current question.
    ///
    /// Compares the guess count for the current question against the roster
    /// size, so an empty roster counts as fully answered.
    pub fn all_participants_answered(&self) -> bool {
        self.answered_count() == self.participants.len()
    }

    /// Per-answer guess counts for the question at `question_index`.
    ///
    /// Any in-range question can be tallied, including ones the game has
    /// moved past; the reveal screen asks for the current index.
    pub fn tally(&self, question_index: usize) -> Result<QuestionTally, EngineError> {
        let question = self.quiz.questions.get(question_index).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "question index {question_index} is outside the quiz"
            ))
        })?;

        let mut counts = vec![0u32; question.answers.len()];
        let mut total = 0u32;
        for guess in self.guesses.values() {
            if guess.question_index != question_index {
                continue;
            }
            if let Some(slot) = counts.get_mut(guess.answer_index) {
                *slot += 1;
            }
            total += 1;
        }
        Ok(QuestionTally { counts, total })
    }

    /// Roster sorted for the leaderboard: points descending, ties broken by
    /// alias.
    pub fn standings(&self) -> Vec<Participant> {
        let mut rows: Vec<Participant> = self.participants.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.alias.cmp(&b.alias))
        });
        rows
    }
}
