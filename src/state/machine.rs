use crate::catalog::Quiz;

/// High-level phases a game moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Participants can join; the host has not started the quiz yet.
    Waiting,
    /// The current question is on screen and its answer window is open.
    Question,
    /// The correct answer and the guess tally for the current question are shown.
    Answer,
    /// Final standings are displayed; the game no longer changes phase.
    Leaderboard,
}

/// Phase progression for one game, driven exclusively by [`GameMachine::advance`].
///
/// The machine never advances on its own: `countdown_seconds` is advisory
/// data for whoever drives the game, typically polled by clients that call
/// back when the timer runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMachine {
    phase: GamePhase,
    question_index: usize,
    countdown_seconds: u32,
}

impl GameMachine {
    /// Create a machine in the waiting phase with the given join countdown.
    pub fn new(waiting_countdown: u32) -> Self {
        Self {
            phase: GamePhase::Waiting,
            question_index: 0,
            countdown_seconds: waiting_countdown,
        }
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Index of the current question; meaningful once the waiting phase is left.
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Seconds associated with the current phase: the join countdown while
    /// waiting, the answer window while a question is open.
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Whether the machine has reached the final leaderboard.
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Leaderboard
    }

    /// Move the game to its next phase and return it.
    ///
    /// Waiting and answer phases both resolve through the same boundary rule:
    /// enter the question at `question_index`, or finish when the quiz has no
    /// question left there. Once the leaderboard is reached further calls are
    /// harmless no-ops.
    pub fn advance(&mut self, quiz: &Quiz) -> GamePhase {
        match self.phase {
            GamePhase::Waiting => self.enter_question_or_finish(quiz),
            GamePhase::Question => self.phase = GamePhase::Answer,
            GamePhase::Answer => {
                self.question_index += 1;
                self.enter_question_or_finish(quiz);
            }
            GamePhase::Leaderboard => {}
        }
        self.phase
    }

    /// Whether a guess for the question at `position` is currently accepted.
    ///
    /// Open only while a question is on screen; positions before the current
    /// index are stale and rejected, the current index and anything after it
    /// pass (equality is not enforced).
    pub fn answer_window_valid(&self, position: usize) -> bool {
        self.phase == GamePhase::Question && position >= self.question_index
    }

    fn enter_question_or_finish(&mut self, quiz: &Quiz) {
        match quiz.questions.get(self.question_index) {
            Some(question) => {
                self.phase = GamePhase::Question;
                self.countdown_seconds = question.answer_time;
            }
            None => self.phase = GamePhase::Leaderboard,
        }
    }
}
