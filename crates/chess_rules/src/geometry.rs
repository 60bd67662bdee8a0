//! Board geometry
//!
//! Position algebra for the 8x8 board: squares, compass directions,
//! distances, collinearity and ray walking. Everything else in the crate
//! (move constraints, the king-safety scan) is built on these primitives.
//!
//! ## Coordinate system
//!
//! A [`Square`] carries its file (a-h) and rank (1-8) plus two signed axes
//! used for direction and distance arithmetic: `x = file - 3` and
//! `y = rank - 4`, so a8 is `(-3, 4)` and h1 is `(4, -3)`. Distances are
//! Euclidean over these axes, truncated to an integer; the truncation makes
//! a one- or two-square diagonal displacement equal its file displacement,
//! which the adjacency and pawn checks rely on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// Tolerance for the floating-point slope and circle comparisons
const EPSILON: f32 = 1e-3;

/// One of the 64 board squares
///
/// Internally a 0-63 index (`rank * 8 + file`, a1 = 0, h8 = 63). The type
/// is `Copy` and cannot represent an off-board position, so APIs taking a
/// `Square` need no bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Build a square from a 0-7 file and a 1-8 rank
    pub const fn at(file: u8, rank: u8) -> Square {
        Square((rank - 1) * 8 + file)
    }

    /// Build a square from a 0-63 index, `None` if out of range
    pub fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Build a square from the signed geometry axes, `None` if off-board
    pub fn from_coords(x: i8, y: i8) -> Option<Square> {
        if (-3..=4).contains(&x) && (-3..=4).contains(&y) {
            Some(Square::at((x + 3) as u8, (y + 4) as u8))
        } else {
            None
        }
    }

    /// Linear 0-63 index
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// File as 0-7 (a = 0)
    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank as 1-8
    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8 + 1
    }

    /// Signed x axis, -3 (file a) to 4 (file h)
    #[inline]
    pub fn x(self) -> i8 {
        self.file() as i8 - 3
    }

    /// Signed y axis, -3 (rank 1) to 4 (rank 8)
    #[inline]
    pub fn y(self) -> i8 {
        self.rank() as i8 - 4
    }

    /// Iterate over all 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'A' + self.file()) as char;
        write!(f, "{}{}", file, self.rank())
    }
}

impl FromStr for Square {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(LayoutError::UnknownSquare(s.to_string()));
        }
        let file = match bytes[0].to_ascii_uppercase() {
            f @ b'A'..=b'H' => f - b'A',
            _ => return Err(LayoutError::UnknownSquare(s.to_string())),
        };
        let rank = match bytes[1] {
            r @ b'1'..=b'8' => r - b'0',
            _ => return Err(LayoutError::UnknownSquare(s.to_string())),
        };
        Ok(Square::at(file, rank))
    }
}

// Named constants for every square, mirroring the algebraic board reading
// (a1 bottom-left from white's point of view). Tests and layout code lean
// on these heavily.
#[rustfmt::skip]
impl Square {
    pub const A1: Square = Square::at(0, 1); pub const B1: Square = Square::at(1, 1);
    pub const C1: Square = Square::at(2, 1); pub const D1: Square = Square::at(3, 1);
    pub const E1: Square = Square::at(4, 1); pub const F1: Square = Square::at(5, 1);
    pub const G1: Square = Square::at(6, 1); pub const H1: Square = Square::at(7, 1);
    pub const A2: Square = Square::at(0, 2); pub const B2: Square = Square::at(1, 2);
    pub const C2: Square = Square::at(2, 2); pub const D2: Square = Square::at(3, 2);
    pub const E2: Square = Square::at(4, 2); pub const F2: Square = Square::at(5, 2);
    pub const G2: Square = Square::at(6, 2); pub const H2: Square = Square::at(7, 2);
    pub const A3: Square = Square::at(0, 3); pub const B3: Square = Square::at(1, 3);
    pub const C3: Square = Square::at(2, 3); pub const D3: Square = Square::at(3, 3);
    pub const E3: Square = Square::at(4, 3); pub const F3: Square = Square::at(5, 3);
    pub const G3: Square = Square::at(6, 3); pub const H3: Square = Square::at(7, 3);
    pub const A4: Square = Square::at(0, 4); pub const B4: Square = Square::at(1, 4);
    pub const C4: Square = Square::at(2, 4); pub const D4: Square = Square::at(3, 4);
    pub const E4: Square = Square::at(4, 4); pub const F4: Square = Square::at(5, 4);
    pub const G4: Square = Square::at(6, 4); pub const H4: Square = Square::at(7, 4);
    pub const A5: Square = Square::at(0, 5); pub const B5: Square = Square::at(1, 5);
    pub const C5: Square = Square::at(2, 5); pub const D5: Square = Square::at(3, 5);
    pub const E5: Square = Square::at(4, 5); pub const F5: Square = Square::at(5, 5);
    pub const G5: Square = Square::at(6, 5); pub const H5: Square = Square::at(7, 5);
    pub const A6: Square = Square::at(0, 6); pub const B6: Square = Square::at(1, 6);
    pub const C6: Square = Square::at(2, 6); pub const D6: Square = Square::at(3, 6);
    pub const E6: Square = Square::at(4, 6); pub const F6: Square = Square::at(5, 6);
    pub const G6: Square = Square::at(6, 6); pub const H6: Square = Square::at(7, 6);
    pub const A7: Square = Square::at(0, 7); pub const B7: Square = Square::at(1, 7);
    pub const C7: Square = Square::at(2, 7); pub const D7: Square = Square::at(3, 7);
    pub const E7: Square = Square::at(4, 7); pub const F7: Square = Square::at(5, 7);
    pub const G7: Square = Square::at(6, 7); pub const H7: Square = Square::at(7, 7);
    pub const A8: Square = Square::at(0, 8); pub const B8: Square = Square::at(1, 8);
    pub const C8: Square = Square::at(2, 8); pub const D8: Square = Square::at(3, 8);
    pub const E8: Square = Square::at(4, 8); pub const F8: Square = Square::at(5, 8);
    pub const G8: Square = Square::at(6, 8); pub const H8: Square = Square::at(7, 8);
}

/// One of the 8 compass rays
///
/// North points toward rank 8 (black's side), east toward file h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four straight rays, excluded from the knight pattern
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step along this ray in (x, y) axis terms
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    #[inline]
    pub fn is_orthogonal(self) -> bool {
        Direction::ORTHOGONAL.contains(&self)
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        !self.is_orthogonal()
    }
}

/// Compass direction from `from` to `to`, `None` when they are equal
///
/// A diagonal is reported whenever both axes differ; the result is the
/// quadrant of the displacement, not a collinearity statement. Use
/// [`is_in_line`] or [`squares_between`] when the path itself matters.
pub fn direction_between(from: Square, to: Square) -> Option<Direction> {
    if from == to {
        return None;
    }

    let dx = to.x() - from.x();
    let dy = to.y() - from.y();

    let direction = if dx == 0 {
        if dy > 0 {
            Direction::North
        } else {
            Direction::South
        }
    } else if dy == 0 {
        if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    } else {
        match (dx > 0, dy > 0) {
            (true, true) => Direction::NorthEast,
            (true, false) => Direction::SouthEast,
            (false, true) => Direction::NorthWest,
            (false, false) => Direction::SouthWest,
        }
    };

    Some(direction)
}

/// Euclidean distance over the signed axes, truncated to an integer
///
/// Truncation is load-bearing: a diagonal step is `sqrt(2) -> 1` and a
/// two-square diagonal is `sqrt(8) -> 2`, matching the file/rank distance,
/// so the king adjacency check and the pawn one/two-step checks share one
/// metric with the straight moves.
pub fn distance_between(from: Square, to: Square) -> u32 {
    let dx = (to.x() - from.x()) as f64;
    let dy = (to.y() - from.y()) as f64;

    (dx * dx + dy * dy).sqrt() as u32
}

/// True when `to` lies exactly on the circle of `radius` around `from`
///
/// Compared on squared magnitudes with a small tolerance; used by the
/// knight constraint with radius sqrt(5).
pub fn is_on_circle_perimeter(from: Square, to: Square, radius: f32) -> bool {
    let dx = (to.x() - from.x()) as f32;
    let dy = (to.y() - from.y()) as f32;

    (dx * dx + dy * dy - radius * radius).abs() < EPSILON
}

/// True when `c` lies on the infinite line through `a` and `b`
///
/// Slope/intercept comparison with an epsilon tolerance; the vertical line
/// is handled as the x-equality case.
pub fn is_in_line(a: Square, b: Square, c: Square) -> bool {
    if a == b {
        return false;
    }

    if a.x() == b.x() {
        return c.x() == a.x();
    }

    let m = (a.y() - b.y()) as f32 / (a.x() - b.x()) as f32;
    let intercept = a.y() as f32 - m * a.x() as f32;

    (c.y() as f32 - (m * c.x() as f32 + intercept)).abs() < EPSILON
}

/// The square `steps` rays away from `from` along `direction`, `None` when
/// that walks off the board
pub fn nearest_in_direction(from: Square, direction: Direction, steps: u8) -> Option<Square> {
    let (dx, dy) = direction.delta();
    let steps = steps as i8;

    Square::from_coords(from.x() + dx * steps, from.y() + dy * steps)
}

/// Ordered squares strictly between `a` and `b`, empty unless the two are
/// collinear along one of the 8 rays
pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let Some(direction) = direction_between(a, b) else {
        return Vec::new();
    };

    let mut between = Vec::new();
    let mut current = a;

    while let Some(next) = nearest_in_direction(current, direction, 1) {
        if next == b {
            return between;
        }
        between.push(next);
        current = next;
    }

    // Walked off the board without reaching b: the pair is not collinear
    Vec::new()
}
