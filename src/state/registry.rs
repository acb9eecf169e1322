use dashmap::DashMap;

use crate::state::game::GameSession;

/// Live games keyed by their public id.
///
/// Each entry is guarded by its DashMap shard lock, so a `with_game_mut`
/// closure is a per-game critical section: a guess's duplicate check, window
/// check, insert, and point increment all happen under one lock. Closures
/// must stay synchronous and never await.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: DashMap<u32, GameSession>,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly created session under its public id.
    pub fn insert(&self, session: GameSession) {
        self.games.insert(session.public_id, session);
    }

    /// Drop a game, returning its final session if it existed.
    pub fn remove(&self, public_id: u32) -> Option<GameSession> {
        self.games.remove(&public_id).map(|(_, session)| session)
    }

    /// Whether a game with this public id is live.
    pub fn contains(&self, public_id: u32) -> bool {
        self.games.contains_key(&public_id)
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no game is currently live.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Run `f` with a shared reference to the game, if it exists.
    pub fn with_game<R>(&self, public_id: u32, f: impl FnOnce(&GameSession) -> R) -> Option<R> {
        self.games.get(&public_id).map(|session| f(&session))
    }

    /// Run `f` with a mutable reference to the game, if it exists.
    ///
    /// The closure runs under the entry's shard lock.
    pub fn with_game_mut<R>(
        &self,
        public_id: u32,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Option<R> {
        self.games.get_mut(&public_id).map(|mut session| f(&mut session))
    }
}
