//! King-safety evaluation
//!
//! Decides OK / CHECK / CHECKMATE / STALEMATE for a side on a board. The
//! scan collects every enemy piece whose attack probe reaches the king,
//! then searches for a way out in the order the rules allow one:
//!
//! 1. an adjacent escape square the king can step or capture onto without
//!    remaining attacked,
//! 2. with exactly one attacker, an ally capture of that attacker,
//! 3. with exactly one non-knight attacker, an ally block of the ray
//!    between attacker and king (knights cannot be blocked).
//!
//! Any hit downgrades the verdict to CHECK; none leaves CHECKMATE. With no
//! attackers at all, a side that still has no legal move anywhere is
//! STALEMATE. Every hypothetical is evaluated on a candidate clone of the
//! board, so the live board is never mutated mid-scan, and a pinned
//! would-be rescuer is recognized as no rescue at all.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::geometry::{self, Direction, Square};
use crate::piece::Side;
use crate::resolver::{MoveKind, Resolver};

/// Verdict of the king-safety scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KingState {
    Ok,
    Check,
    Checkmate,
    Stalemate,
}

/// King-safety scanner borrowing the resolver's constraint table
pub struct KingSafety<'a> {
    resolver: &'a Resolver,
}

impl<'a> KingSafety<'a> {
    pub fn new(resolver: &'a Resolver) -> KingSafety<'a> {
        KingSafety { resolver }
    }

    /// Whether the side's king is currently attacked
    ///
    /// The cheap variant of [`KingSafety::king_state`] used to validate a
    /// mover's own king after a candidate move. A side without a king on
    /// the board cannot be checked.
    pub fn is_king_checked(&self, side: Side, board: &Board) -> bool {
        match board.king_square(side) {
            Some(king) => !self.resolver.attackers_of(king, side.other(), board).is_empty(),
            None => false,
        }
    }

    /// Full verdict for a side
    pub fn king_state(&self, side: Side, board: &Board) -> KingState {
        let Some(king) = board.king_square(side) else {
            return KingState::Ok;
        };

        let attackers = self.resolver.attackers_of(king, side.other(), board);

        if attackers.is_empty() {
            return if self.has_any_legal_move(side, board) {
                KingState::Ok
            } else {
                KingState::Stalemate
            };
        }

        if self.escape_exists(king, side, board) {
            return KingState::Check;
        }

        // Two simultaneous attackers cannot both be answered by one ally
        // move; only the king could have saved the position.
        if let [(attacker_square, attacker)] = attackers.as_slice() {
            if self.ally_can_capture(*attacker_square, side, board) {
                return KingState::Check;
            }
            if !attacker.is_knight() && self.ally_can_block(*attacker_square, king, side, board) {
                return KingState::Check;
            }
        }

        KingState::Checkmate
    }

    /// Whether the side has any legal move at all
    ///
    /// Kings are scanned over their 8 adjacent squares with the escape
    /// logic; every other piece is scanned over the full board. Each
    /// candidate is validated for self-check, so a position whose only
    /// moves are pinned-piece moves counts as having none.
    pub fn has_any_legal_move(&self, side: Side, board: &Board) -> bool {
        for (from, piece) in board.pieces_of(side) {
            if piece.is_king() {
                let escapes = Direction::ALL.iter().any(|direction| {
                    geometry::nearest_in_direction(from, *direction, 1)
                        .is_some_and(|to| self.move_keeps_king_safe(from, to, side, board))
                });
                if escapes {
                    return true;
                }
            } else if Square::all().any(|to| self.move_keeps_king_safe(from, to, side, board)) {
                return true;
            }
        }

        false
    }

    /// Every square the piece on `from` may legally move to
    ///
    /// The king enumerates its escape squares; other archetypes
    /// brute-force the 64 squares through the resolver. Both filter moves
    /// that would leave the mover's own king attacked.
    pub fn legal_destinations(&self, from: Square, side: Side, board: &Board) -> Vec<Square> {
        let Some(piece) = board.piece_at(from) else {
            return Vec::new();
        };
        if !side.is_player() || piece.side() != side {
            return Vec::new();
        }

        if piece.is_king() {
            Direction::ALL
                .iter()
                .filter_map(|direction| geometry::nearest_in_direction(from, *direction, 1))
                .filter(|to| self.move_keeps_king_safe(from, *to, side, board))
                .collect()
        } else {
            Square::all()
                .filter(|to| self.move_keeps_king_safe(from, *to, side, board))
                .collect()
        }
    }

    /// Classify, apply to a candidate clone, and verify the mover's king
    /// is not attacked afterwards
    fn move_keeps_king_safe(&self, from: Square, to: Square, side: Side, board: &Board) -> bool {
        let kind = self.resolver.classify(from, to, side, board);
        if kind == MoveKind::MoveNotAllowed {
            return false;
        }

        let mut candidate = board.clone();
        self.resolver.apply(&mut candidate, from, to, side, kind);

        !self.is_king_checked(side, &candidate)
    }

    fn escape_exists(&self, king: Square, side: Side, board: &Board) -> bool {
        Direction::ALL.iter().any(|direction| {
            geometry::nearest_in_direction(king, *direction, 1)
                .is_some_and(|to| self.move_keeps_king_safe(king, to, side, board))
        })
    }

    /// Whether any ally other than the king can capture the attacker
    fn ally_can_capture(&self, attacker_square: Square, side: Side, board: &Board) -> bool {
        board
            .pieces_of(side)
            .into_iter()
            .filter(|(_, piece)| !piece.is_king())
            .any(|(from, _)| self.move_keeps_king_safe(from, attacker_square, side, board))
    }

    /// Whether any ally other than the king can interpose on the ray
    /// between the attacker and the king
    fn ally_can_block(
        &self,
        attacker_square: Square,
        king: Square,
        side: Side,
        board: &Board,
    ) -> bool {
        let ray = geometry::squares_between(attacker_square, king);
        if ray.is_empty() {
            return false;
        }

        board
            .pieces_of(side)
            .into_iter()
            .filter(|(_, piece)| !piece.is_king())
            .any(|(from, _)| {
                ray.iter()
                    .any(|to| self.move_keeps_king_safe(from, *to, side, board))
            })
    }
}
