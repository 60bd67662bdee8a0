//! Player identity
//!
//! A player is a uuid-backed identity handed out by the embedding session
//! layer. The match only compares identities; names, accounts and
//! sessions are external concerns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque player identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player(Uuid);

impl Player {
    /// Fresh random identity
    pub fn new() -> Player {
        Player(Uuid::new_v4())
    }

    /// Wrap an identity issued elsewhere
    pub fn from_uuid(id: Uuid) -> Player {
        Player(id)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_distinct() {
        assert_ne!(Player::new(), Player::new());
    }

    #[test]
    fn wrapped_identities_compare_by_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(Player::from_uuid(id), Player::from_uuid(id));
    }
}
