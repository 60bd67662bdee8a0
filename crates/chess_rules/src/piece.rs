//! Piece catalog
//!
//! The 12 archetype x side pieces with their point values, display glyphs
//! and predicate helpers. Pieces are plain copyable values; all movement
//! rules live in the `constraints` module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// A playing side, or the non-playing observer role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
    Observer,
}

impl Side {
    /// The opposing playing side; observers have no opponent
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
            Side::Observer => Side::Observer,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        !matches!(self, Side::Observer)
    }
}

/// One of the six piece archetypes, independent of side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Material value in points
    ///
    /// The king is effectively unbounded; it can never be captured, so the
    /// value only matters as an ordering extreme.
    pub fn points(self) -> u16 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => u16::MAX,
        }
    }
}

/// An archetype bound to a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
}

#[rustfmt::skip]
impl Piece {
    pub const W_KING: Piece   = Piece { kind: PieceKind::King,   side: Side::White };
    pub const W_QUEEN: Piece  = Piece { kind: PieceKind::Queen,  side: Side::White };
    pub const W_ROOK: Piece   = Piece { kind: PieceKind::Rook,   side: Side::White };
    pub const W_BISHOP: Piece = Piece { kind: PieceKind::Bishop, side: Side::White };
    pub const W_KNIGHT: Piece = Piece { kind: PieceKind::Knight, side: Side::White };
    pub const W_PAWN: Piece   = Piece { kind: PieceKind::Pawn,   side: Side::White };
    pub const B_KING: Piece   = Piece { kind: PieceKind::King,   side: Side::Black };
    pub const B_QUEEN: Piece  = Piece { kind: PieceKind::Queen,  side: Side::Black };
    pub const B_ROOK: Piece   = Piece { kind: PieceKind::Rook,   side: Side::Black };
    pub const B_BISHOP: Piece = Piece { kind: PieceKind::Bishop, side: Side::Black };
    pub const B_KNIGHT: Piece = Piece { kind: PieceKind::Knight, side: Side::Black };
    pub const B_PAWN: Piece   = Piece { kind: PieceKind::Pawn,   side: Side::Black };
}

impl Piece {
    /// Bind an archetype to a playing side
    pub fn new(kind: PieceKind, side: Side) -> Piece {
        Piece { kind, side }
    }

    /// The king of the given side
    pub fn king_of(side: Side) -> Piece {
        Piece::new(PieceKind::King, side)
    }

    #[inline]
    pub fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn side(self) -> Side {
        self.side
    }

    #[inline]
    pub fn points(self) -> u16 {
        self.kind.points()
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    #[inline]
    pub fn is_rook(self) -> bool {
        self.kind == PieceKind::Rook
    }

    #[inline]
    pub fn is_knight(self) -> bool {
        self.kind == PieceKind::Knight
    }

    #[inline]
    pub fn is_pawn(self) -> bool {
        self.kind == PieceKind::Pawn
    }

    #[inline]
    pub fn same_side(self, other: Piece) -> bool {
        self.side == other.side
    }

    /// Unicode chess glyph for display adapters
    pub fn glyph(self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => '\u{2654}',
            (Side::White, PieceKind::Queen) => '\u{2655}',
            (Side::White, PieceKind::Rook) => '\u{2656}',
            (Side::White, PieceKind::Bishop) => '\u{2657}',
            (Side::White, PieceKind::Knight) => '\u{2658}',
            (Side::White, PieceKind::Pawn) => '\u{2659}',
            (Side::Black, PieceKind::King) => '\u{265A}',
            (Side::Black, PieceKind::Queen) => '\u{265B}',
            (Side::Black, PieceKind::Rook) => '\u{265C}',
            (Side::Black, PieceKind::Bishop) => '\u{265D}',
            (Side::Black, PieceKind::Knight) => '\u{265E}',
            (Side::Black, PieceKind::Pawn) => '\u{265F}',
            (Side::Observer, _) => '?',
        }
    }

    /// Layout notation token, e.g. `W_KING`
    pub fn token(self) -> &'static str {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => "W_KING",
            (Side::White, PieceKind::Queen) => "W_QUEEN",
            (Side::White, PieceKind::Rook) => "W_ROOK",
            (Side::White, PieceKind::Bishop) => "W_BISHOP",
            (Side::White, PieceKind::Knight) => "W_KNIGHT",
            (Side::White, PieceKind::Pawn) => "W_PAWN",
            (Side::Black, PieceKind::King) => "B_KING",
            (Side::Black, PieceKind::Queen) => "B_QUEEN",
            (Side::Black, PieceKind::Rook) => "B_ROOK",
            (Side::Black, PieceKind::Bishop) => "B_BISHOP",
            (Side::Black, PieceKind::Knight) => "B_KNIGHT",
            (Side::Black, PieceKind::Pawn) => "B_PAWN",
            (Side::Observer, _) => "OBSERVER",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Piece {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let piece = match s {
            "W_KING" => Piece::W_KING,
            "W_QUEEN" => Piece::W_QUEEN,
            "W_ROOK" => Piece::W_ROOK,
            "W_BISHOP" => Piece::W_BISHOP,
            "W_KNIGHT" => Piece::W_KNIGHT,
            "W_PAWN" => Piece::W_PAWN,
            "B_KING" => Piece::B_KING,
            "B_QUEEN" => Piece::B_QUEEN,
            "B_ROOK" => Piece::B_ROOK,
            "B_BISHOP" => Piece::B_BISHOP,
            "B_KNIGHT" => Piece::B_KNIGHT,
            "B_PAWN" => Piece::B_PAWN,
            _ => return Err(LayoutError::UnknownPiece(s.to_string())),
        };
        Ok(piece)
    }
}
