//! Pawn constraint
//!
//! The only side-mirrored archetype: white pawns walk north, black pawns
//! south. A forward step needs an empty destination, the double step is
//! reserved to the starting rank with both squares clear, and a diagonal
//! step is only valid as a capture. En passant and promotion are
//! classified by the resolver; this module supplies the rank helpers and
//! the bypassed-square geometry they need.

use crate::board::Board;
use crate::geometry::{self, Direction, Square};
use crate::piece::Side;

use super::{MoveConstraint, MoveMode};

pub struct PawnConstraint;

/// Forward direction and the two attack diagonals for a side
fn compass(side: Side) -> Option<(Direction, [Direction; 2])> {
    match side {
        Side::White => Some((Direction::North, [Direction::NorthWest, Direction::NorthEast])),
        Side::Black => Some((Direction::South, [Direction::SouthWest, Direction::SouthEast])),
        Side::Observer => None,
    }
}

/// The rank a side's pawns double-step from
pub fn starting_rank(side: Side) -> Option<u8> {
    match side {
        Side::White => Some(2),
        Side::Black => Some(7),
        Side::Observer => None,
    }
}

/// The farthest rank, where a pawn must promote
pub fn promotion_rank(side: Side) -> Option<u8> {
    match side {
        Side::White => Some(8),
        Side::Black => Some(1),
        Side::Observer => None,
    }
}

/// The square an en passant capture takes the bypassed pawn from:
/// the destination file on the origin rank
pub fn bypassed_square(from: Square, to: Square) -> Square {
    Square::at(to.file(), from.rank())
}

impl MoveConstraint for PawnConstraint {
    fn is_move_valid(&self, from: Square, to: Square, board: &Board, mode: MoveMode) -> bool {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        let Some((forward, attacks)) = compass(piece.side()) else {
            return false;
        };
        let Some(direction) = geometry::direction_between(from, to) else {
            return false;
        };

        let distance = geometry::distance_between(from, to);

        // The attack scan only ever cares about the diagonals; a pawn
        // threatens them whether or not something stands there.
        if mode == MoveMode::AttackProbe {
            return attacks.contains(&direction) && distance == 1;
        }

        let target = board.piece_at(to);

        if direction == forward {
            if target.is_some() {
                return false;
            }
            return match distance {
                1 => true,
                2 => {
                    Some(from.rank()) == starting_rank(piece.side())
                        && geometry::squares_between(from, to)
                            .iter()
                            .all(|square| board.piece_at(*square).is_none())
                }
                _ => false,
            };
        }

        if attacks.contains(&direction) && distance == 1 {
            return match target {
                Some(victim) => !victim.same_side(piece) && !victim.is_king(),
                // Diagonal onto an empty square is only en passant, which
                // the resolver classifies with board history
                None => false,
            };
        }

        false
    }
}
