//! Board state
//!
//! A sparse square-to-piece map plus the bookkeeping the rules need:
//! which pieces have left their starting square (castling rights), which
//! pawns have used their double step and when each piece last moved
//! (en passant window). The board itself enforces no movement rules; it
//! only offers raw relocate/remove/put primitives. Legality lives in
//! `constraints`/`resolver`, and the match layer applies moves to a cloned
//! candidate board before committing, so an invalid intermediate state is
//! never observable.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::geometry::{self, Square};
use crate::piece::{Piece, Side};

/// Sparse board with per-square bookkeeping
#[derive(Debug, Clone)]
pub struct Board {
    /// Current piece placement, at most one piece per square
    pieces: HashMap<Square, Piece>,
    /// Starting layout, kept to decide when a piece first leaves home
    starting_layout: HashMap<Square, Piece>,
    /// Whether the piece currently on a square has moved; the flag travels
    /// with the piece
    moved: HashMap<Square, bool>,
    /// Whether the pawn currently on a square has used its double step
    pawn_doubled: HashMap<Square, bool>,
    /// Total move number at which the piece on a square last moved
    move_turns: HashMap<Square, u32>,
    total_moves: u32,
    white_moves: u32,
    black_moves: u32,
}

impl Board {
    /// Board with the standard opening layout
    pub fn standard() -> Board {
        Board::from_layout(crate::layout::standard())
            .expect("standard layout is always valid")
    }

    /// Board from a custom layout map
    ///
    /// The layout becomes the board's starting-layout snapshot. Rejects
    /// layouts giving either side more than one king.
    pub fn from_layout(layout: HashMap<Square, Piece>) -> Result<Board, LayoutError> {
        if layout.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }

        for side in [Side::White, Side::Black] {
            let kings = layout
                .values()
                .filter(|piece| piece.is_king() && piece.side() == side)
                .count();
            if kings > 1 {
                return Err(LayoutError::DuplicateKing(side));
            }
        }

        Ok(Board {
            pieces: layout.clone(),
            starting_layout: layout,
            moved: HashMap::new(),
            pawn_doubled: HashMap::new(),
            move_turns: HashMap::new(),
            total_moves: 0,
            white_moves: 0,
            black_moves: 0,
        })
    }

    /// Board from the `SQUARE:PIECE` layout notation
    pub fn from_notation(notation: &str) -> Result<Board, LayoutError> {
        Board::from_layout(crate::layout::parse(notation)?)
    }

    /// Piece on a square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    /// Square holding the given side's king, if it is on the board
    pub fn king_square(&self, side: Side) -> Option<Square> {
        let king = Piece::king_of(side);
        self.pieces
            .iter()
            .find(|(_, piece)| **piece == king)
            .map(|(square, _)| *square)
    }

    /// All pieces of one side with their squares
    pub fn pieces_of(&self, side: Side) -> Vec<(Square, Piece)> {
        self.pieces
            .iter()
            .filter(|(_, piece)| piece.side() == side)
            .map(|(square, piece)| (*square, *piece))
            .collect()
    }

    /// Whether the piece currently on `square` has moved since the start
    ///
    /// False for empty squares and for custom-layout pieces that were never
    /// part of the starting snapshot on that square.
    pub fn is_piece_moved(&self, square: Square) -> bool {
        self.moved.get(&square).copied().unwrap_or(false)
    }

    /// Whether the pawn currently on `square` has used its double step
    pub fn pawn_double_stepped(&self, square: Square) -> bool {
        self.pawn_doubled.get(&square).copied().unwrap_or(false)
    }

    /// Total move number at which the piece on `square` last moved
    pub fn move_turn(&self, square: Square) -> Option<u32> {
        self.move_turns.get(&square).copied()
    }

    #[inline]
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    #[inline]
    pub fn side_moves(&self, side: Side) -> u32 {
        match side {
            Side::White => self.white_moves,
            Side::Black => self.black_moves,
            Side::Observer => 0,
        }
    }

    /// The starting-layout snapshot
    pub fn starting_layout(&self) -> &HashMap<Square, Piece> {
        &self.starting_layout
    }

    /// Owned copy of the current placement
    pub fn snapshot(&self) -> HashMap<Square, Piece> {
        self.pieces.clone()
    }

    /// Move the piece on `from` to `to`, returning any captured piece
    ///
    /// No legality checks. Bookkeeping travels with the piece: the moved
    /// flag is raised when the piece leaves a square it occupied in the
    /// starting layout, the pawn double-step flag is raised on a
    /// two-square displacement, and the destination records the move
    /// number. A no-op returning `None` when `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.pieces.remove(&from)?;

        let captured = self.pieces.insert(to, piece);
        if captured.is_some() {
            self.clear_square_state(to);
        }

        let was_moved = self.moved.remove(&from).unwrap_or(false)
            || self.starting_layout.get(&from) == Some(&piece);
        self.moved.insert(to, was_moved);

        if piece.is_pawn() {
            // Not sticky: only the latest move counts, so the en passant
            // window closes once the pawn steps again
            self.pawn_doubled.remove(&from);
            self.pawn_doubled
                .insert(to, geometry::distance_between(from, to) == 2);
        }

        self.total_moves += 1;
        match piece.side() {
            Side::White => self.white_moves += 1,
            Side::Black => self.black_moves += 1,
            Side::Observer => {}
        }

        self.move_turns.remove(&from);
        self.move_turns.insert(to, self.total_moves);

        captured
    }

    /// Remove a piece and all its bookkeeping, as for an en passant capture
    pub fn remove_at(&mut self, square: Square) -> Option<Piece> {
        self.clear_square_state(square);
        self.pieces.remove(&square)
    }

    /// Replace the piece on a square, as for a pawn promotion
    ///
    /// The square's bookkeeping is kept: the promoted piece inherits the
    /// pawn's moved flag and move number.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.pieces.insert(square, piece)
    }

    fn clear_square_state(&mut self, square: Square) {
        self.moved.remove(&square);
        self.pawn_doubled.remove(&square);
        self.move_turns.remove(&square);
    }
}
