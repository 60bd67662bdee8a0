//! Board layouts
//!
//! The standard opening layout plus a compact `SQUARE:PIECE` notation for
//! custom setups and test fixtures, e.g. `"E1:W_KING;E8:B_KING;A1:W_ROOK"`.
//! The notation is deliberately minimal; PGN/FEN parsing belongs to
//! external format adapters that produce the same square-to-piece map.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::geometry::Square;
use crate::piece::Piece;

/// The standard opening layout
pub fn standard() -> HashMap<Square, Piece> {
    let mut layout = HashMap::with_capacity(32);

    let back_rank = [
        Piece::W_ROOK,
        Piece::W_KNIGHT,
        Piece::W_BISHOP,
        Piece::W_QUEEN,
        Piece::W_KING,
        Piece::W_BISHOP,
        Piece::W_KNIGHT,
        Piece::W_ROOK,
    ];

    for (file, white_piece) in back_rank.into_iter().enumerate() {
        let file = file as u8;
        layout.insert(Square::at(file, 1), white_piece);
        layout.insert(Square::at(file, 2), Piece::W_PAWN);
        layout.insert(Square::at(file, 7), Piece::B_PAWN);

        let black_piece = Piece::new(white_piece.kind(), crate::piece::Side::Black);
        layout.insert(Square::at(file, 8), black_piece);
    }

    layout
}

/// Parse the `SQUARE:PIECE` notation into a layout map
///
/// Entries are separated by `;`, surrounding whitespace is ignored and a
/// trailing separator is allowed. Assigning the same square twice is an
/// error rather than a silent overwrite.
pub fn parse(notation: &str) -> Result<HashMap<Square, Piece>, LayoutError> {
    let mut layout = HashMap::new();

    for entry in notation.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (square, piece) = entry
            .split_once(':')
            .ok_or_else(|| LayoutError::MalformedEntry(entry.to_string()))?;

        let square: Square = square.trim().parse()?;
        let piece: Piece = piece.trim().parse()?;

        if layout.insert(square, piece).is_some() {
            return Err(LayoutError::DuplicateSquare(square.to_string()));
        }
    }

    if layout.is_empty() {
        return Err(LayoutError::EmptyLayout);
    }

    Ok(layout)
}

/// Render a layout map back into the notation, squares in board order
pub fn format(layout: &HashMap<Square, Piece>) -> String {
    let mut entries: Vec<(Square, Piece)> = layout.iter().map(|(s, p)| (*s, *p)).collect();
    entries.sort_by_key(|(square, _)| square.index());

    entries
        .iter()
        .map(|(square, piece)| format!("{square}:{piece}"))
        .collect::<Vec<_>>()
        .join(";")
}
