//! King constraint and castling geometry
//!
//! The plain king move is a distance-1 step in any direction. Castling is
//! requested by moving the king onto its own rook's square; the full
//! condition chain (unmoved pieces, clear path, unattacked transit) needs
//! the attack scan and is assembled in the resolver. This module owns the
//! geometric half: wing detection and the landing squares of both pieces.

use crate::board::Board;
use crate::geometry::{self, Square};
use crate::piece::Side;

use super::{MoveConstraint, MoveMode};

pub struct KingConstraint;

impl MoveConstraint for KingConstraint {
    fn is_move_valid(&self, from: Square, to: Square, board: &Board, mode: MoveMode) -> bool {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };

        if mode == MoveMode::Normal {
            if let Some(target) = board.piece_at(to) {
                if target.same_side(piece) || target.is_king() {
                    return false;
                }
            }
        }

        geometry::distance_between(from, to) == 1
    }
}

/// Whether a king-onto-rook request is a queen-side castle
///
/// The rook stands west of the king exactly on the queen side.
pub fn is_queen_side(from: Square, to: Square) -> bool {
    geometry::direction_between(from, to) == Some(geometry::Direction::West)
}

/// Landing squares `(king, rook)` after castling for the given side
///
/// `None` for observers, who never own pieces.
pub fn castling_landing(side: Side, queen_side: bool) -> Option<(Square, Square)> {
    let landing = match side {
        Side::White => {
            if queen_side {
                (Square::C1, Square::D1)
            } else {
                (Square::G1, Square::F1)
            }
        }
        Side::Black => {
            if queen_side {
                (Square::C8, Square::D8)
            } else {
                (Square::G8, Square::F8)
            }
        }
        Side::Observer => return None,
    };

    Some(landing)
}

/// The back rank a side castles on
pub fn back_rank(side: Side) -> Option<u8> {
    match side {
        Side::White => Some(1),
        Side::Black => Some(8),
        Side::Observer => None,
    }
}
