//! Knight constraint
//!
//! The knight target pattern is expressed as the circle of radius sqrt(5)
//! around the origin square, with the four straight unit directions
//! excluded as a guard against coordinate edge cases. Knights jump, so no
//! path check is needed.

use crate::board::Board;
use crate::geometry::{self, Direction, Square};

use super::{MoveConstraint, MoveMode};

/// Radius of the knight's move circle, sqrt(5)
pub const KNIGHT_RADIUS: f32 = 2.236_068;

pub struct KnightConstraint;

impl MoveConstraint for KnightConstraint {
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

        let on_circle = geometry::is_on_circle_perimeter(from, to, KNIGHT_RADIUS);
        let orthogonal = geometry::direction_between(from, to)
            .map(Direction::is_orthogonal)
            .unwrap_or(true);

        on_circle && !orthogonal
    }
}
