/// Public id allocation for joinable game codes.
pub mod allocator;
/// Per-game session aggregate: roster, guesses, and scores.
pub mod game;
/// Phase machine driving a game from waiting to the leaderboard.
pub mod machine;
/// Registry of live games keyed by public id.
pub mod registry;

use std::sync::Arc;

use crate::catalog::QuizCatalog;

pub use self::allocator::PublicIdAllocator;
pub use self::game::{GameSession, Guess, Participant, QuestionTally};
pub use self::machine::{GameMachine, GamePhase};
pub use self::registry::GameRegistry;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state shared by every request handler.
pub struct AppState {
    catalog: QuizCatalog,
    allocator: PublicIdAllocator,
    games: GameRegistry,
    waiting_countdown: u32,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(catalog: QuizCatalog, max_public_id: u32, waiting_countdown: u32) -> SharedState {
        Arc::new(Self {
            catalog,
            allocator: PublicIdAllocator::new(max_public_id),
            games: GameRegistry::new(),
            waiting_countdown,
        })
    }

    /// Read-only catalog games draw their quiz content from.
    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    /// Allocator handing out public game codes.
    pub fn allocator(&self) -> &PublicIdAllocator {
        &self.allocator
    }

    /// Registry of live games.
    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    /// Seconds participants see counting down while a game waits to start.
    pub fn waiting_countdown(&self) -> u32 {
        self.waiting_countdown
    }
}
