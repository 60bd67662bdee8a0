//! Constraint resolver
//!
//! Dispatches a requested move to its archetype constraint, enforces
//! ownership, and classifies the result into a [`MoveKind`]. The resolver
//! also owns the two pieces of legality that need more than piece
//! geometry: castling (board history plus the attack scan) and en passant
//! (the bypassed pawn's double-step window). Illegal requests classify as
//! [`MoveKind::MoveNotAllowed`]; nothing here returns errors.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constraints::{
    back_rank, bypassed_square, castling_landing, is_queen_side, promotion_rank, ConstraintSet,
    MoveMode,
};
use crate::geometry::{self, Square};
use crate::piece::{Piece, Side};

/// Classification of a requested move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    Capture,
    Castling,
    EnPassant,
    PawnPromotion,
    MoveNotAllowed,
}

impl MoveKind {
    /// Whether this classification moves a piece at all
    #[inline]
    pub fn is_moved(self) -> bool {
        self != MoveKind::MoveNotAllowed
    }

    /// Castling and en passant relocate or remove a second piece
    #[inline]
    pub fn is_special(self) -> bool {
        matches!(self, MoveKind::Castling | MoveKind::EnPassant)
    }
}

/// Legality dispatch over an immutable constraint table
pub struct Resolver {
    constraints: ConstraintSet,
}

impl Resolver {
    pub fn new(constraints: ConstraintSet) -> Resolver {
        Resolver { constraints }
    }

    /// Whether `side` may move the piece on `from` to `to`
    ///
    /// Observers and mismatched sides are rejected before dispatch. In
    /// [`MoveMode::AttackProbe`] this is the attack reachability question
    /// used by the king-safety scan.
    pub fn is_movable(
        &self,
        from: Square,
        to: Square,
        side: Side,
        board: &Board,
        mode: MoveMode,
    ) -> bool {
        if !side.is_player() || from == to {
            return false;
        }
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        if piece.side() != side {
            return false;
        }

        self.constraints
            .for_kind(piece.kind())
            .is_move_valid(from, to, board, mode)
    }

    /// Classify a requested move
    ///
    /// Castling and en passant are recognized first since their geometry
    /// fails the plain archetype rules (a king stepping onto its own rook,
    /// a pawn stepping diagonally onto an empty square). A pawn reaching
    /// its farthest rank classifies as [`MoveKind::PawnPromotion`] whether
    /// or not the step also captures.
    pub fn classify(&self, from: Square, to: Square, side: Side, board: &Board) -> MoveKind {
        if !side.is_player() || from == to {
            return MoveKind::MoveNotAllowed;
        }
        let Some(piece) = board.piece_at(from) else {
            return MoveKind::MoveNotAllowed;
        };
        if piece.side() != side {
            return MoveKind::MoveNotAllowed;
        }

        if piece.is_king() && self.is_castling(from, to, side, board) {
            return MoveKind::Castling;
        }
        if piece.is_pawn() && self.is_en_passant(from, to, side, board) {
            return MoveKind::EnPassant;
        }

        if !self
            .constraints
            .for_kind(piece.kind())
            .is_move_valid(from, to, board, MoveMode::Normal)
        {
            return MoveKind::MoveNotAllowed;
        }

        if piece.is_pawn() && Some(to.rank()) == promotion_rank(side) {
            return MoveKind::PawnPromotion;
        }

        if board.piece_at(to).is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        }
    }

    /// All pieces of `by_side` whose attack probe reaches `target`
    pub fn attackers_of(
        &self,
        target: Square,
        by_side: Side,
        board: &Board,
    ) -> Vec<(Square, Piece)> {
        board
            .pieces_of(by_side)
            .into_iter()
            .filter(|(square, _)| {
                *square != target
                    && self.is_movable(*square, target, by_side, board, MoveMode::AttackProbe)
            })
            .collect()
    }

    /// Apply an already-classified move to a board
    ///
    /// Returns the captured piece, if any. The caller decides whether the
    /// board is the live one or a candidate clone; `attempt_move` always
    /// applies to a clone first and commits the clone.
    pub fn apply(
        &self,
        board: &mut Board,
        from: Square,
        to: Square,
        side: Side,
        kind: MoveKind,
    ) -> Option<Piece> {
        match kind {
            MoveKind::MoveNotAllowed => None,
            MoveKind::Normal | MoveKind::Capture | MoveKind::PawnPromotion => {
                board.relocate(from, to)
            }
            MoveKind::Castling => {
                let (king_dst, rook_dst) = castling_landing(side, is_queen_side(from, to))?;
                board.relocate(from, king_dst);
                board.relocate(to, rook_dst);
                None
            }
            MoveKind::EnPassant => {
                let bypassed = bypassed_square(from, to);
                board.relocate(from, to);
                board.remove_at(bypassed)
            }
        }
    }

    /// Full castling condition chain
    ///
    /// The request is the king moving onto its own rook. Both pieces must
    /// be unmoved on the side's back rank, the squares between them empty,
    /// the king not currently in check, and neither the king's transit
    /// squares nor its landing square attacked. Self-check after the rook
    /// relocation is re-validated by the match layer like any other move.
    fn is_castling(&self, from: Square, to: Square, side: Side, board: &Board) -> bool {
        let Some(king) = board.piece_at(from) else {
            return false;
        };
        let Some(rook) = board.piece_at(to) else {
            return false;
        };
        if !(king.is_king() && rook.is_rook() && rook.same_side(king)) {
            return false;
        }

        let Some(rank) = back_rank(side) else {
            return false;
        };
        if from.rank() != rank || to.rank() != rank {
            return false;
        }

        if board.is_piece_moved(from) || board.is_piece_moved(to) {
            return false;
        }

        // A rook directly beside the king leaves no gap; that request is a
        // plain (and illegal) king move, not a castle
        let gap = geometry::squares_between(from, to);
        if gap.is_empty() {
            return false;
        }
        if gap.iter().any(|square| board.piece_at(*square).is_some()) {
            return false;
        }

        let Some((king_dst, _)) = castling_landing(side, is_queen_side(from, to)) else {
            return false;
        };

        let enemy = side.other();
        if !self.attackers_of(from, enemy, board).is_empty() {
            return false;
        }

        let mut king_path = geometry::squares_between(from, king_dst);
        king_path.push(king_dst);
        king_path
            .iter()
            .all(|square| self.attackers_of(*square, enemy, board).is_empty())
    }

    /// En passant: a diagonal pawn step onto an empty square, bypassing an
    /// enemy pawn whose double step was the most recent move on the board
    fn is_en_passant(&self, from: Square, to: Square, side: Side, board: &Board) -> bool {
        let Some(pawn) = board.piece_at(from) else {
            return false;
        };
        if !pawn.is_pawn() || board.piece_at(to).is_some() {
            return false;
        }

        // Must be one of this side's attack diagonals
        if !self.is_movable(from, to, side, board, MoveMode::AttackProbe) {
            return false;
        }

        let bypassed = bypassed_square(from, to);
        let Some(victim) = board.piece_at(bypassed) else {
            return false;
        };

        victim.is_pawn()
            && victim.side() != side
            && board.pawn_double_stepped(bypassed)
            && board.move_turn(bypassed) == Some(board.total_moves())
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new(ConstraintSet::standard())
    }
}
