//! Match orchestration on top of the `chess_rules` engine
//!
//! This crate owns everything around the board: the match state machine
//! ([`game::Game`]) with turn cycling, promotion pauses, scoring and
//! player assignment, and the concurrency-safe [`registry::MatchRegistry`]
//! that creates, finds and evicts matches by identifier.
//!
//! Transport, authentication and persistence are external collaborators;
//! the match layer emits `tracing` events and leaves notification fan-out
//! to whatever embeds it (the embedding application also installs the
//! tracing subscriber).

pub mod game;
pub mod player;
pub mod registry;

pub use game::{Game, MoveRecord, SpecialRule};
pub use player::Player;
pub use registry::{MatchHandle, MatchRegistry};

// The rule-engine vocabulary the match API speaks
pub use chess_rules::geometry::Square;
pub use chess_rules::king_safety::KingState;
pub use chess_rules::piece::{Piece, PieceKind, Side};
pub use chess_rules::resolver::MoveKind;
