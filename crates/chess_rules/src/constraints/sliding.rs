//! Sliding piece constraints (rook, bishop, queen)
//!
//! One implementation parameterized by the allowed direction set. A slide
//! is legal when the destination lies in an allowed direction, the two
//! squares are collinear along that ray, and nothing stands strictly
//! between them.
//!
//! In attack-probe mode a blocker that is the king opposing the slider is
//! ignored, so the ray extends through the evaluated king. This is easy to
//! regress and deliberately explicit here: without it a checked king could
//! "shadow" the squares behind it and the safety scan would offer them as
//! escapes.

use crate::board::Board;
use crate::geometry::{self, Direction, Square};

use super::{MoveConstraint, MoveMode};

pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

pub const QUEEN_DIRECTIONS: [Direction; 8] = Direction::ALL;

/// Shared constraint for rook, bishop and queen
pub struct SlidingConstraint {
    directions: &'static [Direction],
}

impl SlidingConstraint {
    pub fn new(directions: &'static [Direction]) -> SlidingConstraint {
        SlidingConstraint { directions }
    }
}

impl MoveConstraint for SlidingConstraint {
    fn is_move_valid(&self, from: Square, to: Square, board: &Board, mode: MoveMode) -> bool {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        let Some(direction) = geometry::direction_between(from, to) else {
            return false;
        };

        if !self.directions.contains(&direction) {
            return false;
        }

        // A diagonal direction only tells the quadrant; the path itself
        // must lie on the ray through `from`.
        let first_step = match geometry::nearest_in_direction(from, direction, 1) {
            Some(step) => step,
            None => return false,
        };
        if !geometry::is_in_line(from, first_step, to) {
            return false;
        }

        for between in geometry::squares_between(from, to) {
            let Some(blocker) = board.piece_at(between) else {
                continue;
            };

            // The evaluated king does not block the ray in probe mode
            let sees_through = mode == MoveMode::AttackProbe
                && blocker.is_king()
                && blocker.side() != piece.side();
            if !sees_through {
                return false;
            }
        }

        match mode {
            MoveMode::AttackProbe => true,
            MoveMode::Normal => match board.piece_at(to) {
                None => true,
                Some(target) => !target.same_side(piece) && !target.is_king(),
            },
        }
    }
}
