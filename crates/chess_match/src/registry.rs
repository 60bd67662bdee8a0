//! Match registry
//!
//! Concurrency-safe creation, lookup and eviction of matches by
//! identifier. Matches are shared-nothing: each lives behind its own
//! mutex, so one in-flight move attempt serializes with every other
//! access to the same match while different matches proceed in parallel.
//! The registry map itself is only locked for the bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use chess_rules::board::Board;

use crate::game::Game;

/// Shared handle to a single match
pub type MatchHandle = Arc<Mutex<Game>>;

/// Registry of live matches keyed by identifier
#[derive(Default)]
pub struct MatchRegistry {
    games: RwLock<HashMap<Uuid, MatchHandle>>,
}

impl MatchRegistry {
    pub fn new() -> MatchRegistry {
        MatchRegistry::default()
    }

    /// Create a match on the standard layout and return its identifier
    pub fn create(&self) -> Uuid {
        self.insert(Game::new())
    }

    /// Create a match on a custom board
    pub fn create_with_board(&self, board: Board) -> Uuid {
        self.insert(Game::with_board(board))
    }

    /// Register an already-built match
    pub fn insert(&self, game: Game) -> Uuid {
        let id = game.id();
        self.games.write().insert(id, Arc::new(Mutex::new(game)));
        info!(game = %id, "match registered");
        id
    }

    /// Handle to a match, if it is still registered
    ///
    /// The clone is cheap; callers lock the handle for as long as one
    /// move attempt or read needs.
    pub fn find(&self, id: Uuid) -> Option<MatchHandle> {
        self.games.read().get(&id).cloned()
    }

    /// Drop a match from the registry
    ///
    /// Callers still holding a handle keep a working match; it is simply
    /// no longer discoverable.
    pub fn evict(&self, id: Uuid) -> bool {
        let removed = self.games.write().remove(&id).is_some();
        if removed {
            info!(game = %id, "match evicted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}
