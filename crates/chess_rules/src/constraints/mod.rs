//! Per-archetype move constraints
//!
//! Each archetype implements [`MoveConstraint`] behind one shared trait;
//! the [`ConstraintSet`] is the single immutable lookup table built once
//! and passed explicitly wherever legality is decided (no global state).
//!
//! Every rule is evaluated in one of two modes:
//!
//! - [`MoveMode::Normal`] - a real move: full occupancy rules apply, and a
//!   destination holding the enemy king is never a legal target.
//! - [`MoveMode::AttackProbe`] - used only by the king-safety scan to ask
//!   "does this piece attack that square". Occupancy rules are relaxed:
//!   destination contents are ignored, pawns attack their diagonals
//!   whether or not something stands there, and sliding rays pass through
//!   the square occupied by the king opposing the attacker. The
//!   see-through rule is what lets a rook checking along a rank also claim
//!   the squares behind the king, so the king cannot "block" its own
//!   escape line.

mod king;
mod knight;
mod pawn;
mod sliding;

pub use king::{back_rank, castling_landing, is_queen_side, KingConstraint};
pub use knight::KnightConstraint;
pub use pawn::{bypassed_square, promotion_rank, starting_rank, PawnConstraint};
pub use sliding::{SlidingConstraint, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

use crate::board::Board;
use crate::geometry::Square;
use crate::piece::PieceKind;

/// Evaluation mode for a constraint check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// A real move with full occupancy rules
    Normal,
    /// The king-safety attack scan with relaxed occupancy rules
    AttackProbe,
}

/// Capability shared by all six archetypes
///
/// `from` must hold the moving piece; implementations read its side from
/// the board. Castling and en passant are classified separately by the
/// resolver, since both depend on state beyond piece geometry.
pub trait MoveConstraint {
    fn is_move_valid(&self, from: Square, to: Square, board: &Board, mode: MoveMode) -> bool;
}

/// Immutable table of the six archetype constraints
///
/// Built once (see [`ConstraintSet::standard`]) and passed by reference;
/// replaces a shared static registry so tests and embedders can hold their
/// own instance.
pub struct ConstraintSet {
    king: KingConstraint,
    queen: SlidingConstraint,
    rook: SlidingConstraint,
    bishop: SlidingConstraint,
    knight: KnightConstraint,
    pawn: PawnConstraint,
}

impl ConstraintSet {
    /// The standard chess rule set
    pub fn standard() -> ConstraintSet {
        ConstraintSet {
            king: KingConstraint,
            queen: SlidingConstraint::new(&QUEEN_DIRECTIONS),
            rook: SlidingConstraint::new(&ROOK_DIRECTIONS),
            bishop: SlidingConstraint::new(&BISHOP_DIRECTIONS),
            knight: KnightConstraint,
            pawn: PawnConstraint,
        }
    }

    /// The constraint implementing the given archetype
    pub fn for_kind(&self, kind: PieceKind) -> &dyn MoveConstraint {
        match kind {
            PieceKind::King => &self.king,
            PieceKind::Queen => &self.queen,
            PieceKind::Rook => &self.rook,
            PieceKind::Bishop => &self.bishop,
            PieceKind::Knight => &self.knight,
            PieceKind::Pawn => &self.pawn,
        }
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        ConstraintSet::standard()
    }
}
