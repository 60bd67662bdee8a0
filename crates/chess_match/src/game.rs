//! Match state machine
//!
//! A [`Game`] owns a board and orchestrates everything around it: turn
//! cycling, move validation and commit, the promotion pause, scoring,
//! player-to-side assignment and the end/draw transitions.
//!
//! ## Commit discipline
//!
//! [`Game::attempt_move`] never mutates the live board while deciding.
//! The move is classified, applied to a candidate clone, the candidate is
//! validated for mover self-check, and only then swapped in. A concurrent
//! reader holding the match lock between calls can therefore never
//! observe a half-applied or rolled-back position.
//!
//! ## Failure semantics
//!
//! Rule violations are values: an illegal request returns
//! [`MoveKind::MoveNotAllowed`], promotion and assignment return `false`.
//! Acting on an ended, drawn or paused match is a no-op with a negative
//! result, never an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use chess_rules::board::Board;
use chess_rules::constraints::ConstraintSet;
use chess_rules::geometry::Square;
use chess_rules::king_safety::{KingSafety, KingState};
use chess_rules::piece::{Piece, PieceKind, Side};
use chess_rules::resolver::{MoveKind, Resolver};

use crate::player::Player;

/// Toggleable rules relaxing standard legality for custom setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialRule {
    /// Any side may move at any time
    NoPlayerTurn,
    /// King safety is never evaluated: self-checking moves commit and the
    /// match never ends by mate or stalemate
    NoCheckOrCheckmate,
}

/// One committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub side: Side,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
}

/// A pawn waiting on its promotion choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    to: Square,
    side: Side,
}

/// A single match: board, flow state, players and score
pub struct Game {
    id: Uuid,
    board: Board,
    resolver: Resolver,
    side_to_move: Side,
    player_white: Option<Player>,
    player_black: Option<Player>,
    observers: Vec<Player>,
    special_rules: HashSet<SpecialRule>,
    pending_promotion: Option<PendingPromotion>,
    history: Vec<MoveRecord>,
    white_score: u16,
    black_score: u16,
    ended: bool,
    drawn: bool,
    allow_other_to_join: bool,
    allow_observers: bool,
}

impl Game {
    /// New match on the standard opening layout
    pub fn new() -> Game {
        Game::with_board(Board::standard())
    }

    /// New match on a custom board
    pub fn with_board(board: Board) -> Game {
        Game {
            id: Uuid::new_v4(),
            board,
            resolver: Resolver::new(ConstraintSet::standard()),
            side_to_move: Side::White,
            player_white: None,
            player_black: None,
            observers: Vec::new(),
            special_rules: HashSet::new(),
            pending_promotion: None,
            history: Vec::new(),
            white_score: 0,
            black_score: 0,
            ended: false,
            drawn: false,
            allow_other_to_join: true,
            allow_observers: true,
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.pending_promotion.is_some()
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Accumulated capture points as `(white, black)`
    #[inline]
    pub fn scores(&self) -> (u16, u16) {
        (self.white_score, self.black_score)
    }

    /// Committed moves in order
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn add_special_rule(&mut self, rule: SpecialRule) {
        self.special_rules.insert(rule);
    }

    pub fn has_rule(&self, rule: SpecialRule) -> bool {
        self.special_rules.contains(&rule)
    }

    #[inline]
    pub fn allow_other_to_join(&self) -> bool {
        self.allow_other_to_join
    }

    pub fn set_allow_other_to_join(&mut self, allow: bool) {
        self.allow_other_to_join = allow;
    }

    #[inline]
    pub fn allow_observers(&self) -> bool {
        self.allow_observers
    }

    pub fn set_allow_observers(&mut self, allow: bool) {
        self.allow_observers = allow;
    }

    /// Owned copy of the current placement
    pub fn snapshot(&self) -> HashMap<Square, Piece> {
        self.board.snapshot()
    }

    /// The underlying board, read-only
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Attempt a move for `side`
    ///
    /// Rejected without any state change when the match is over or paused,
    /// when it is not `side`'s turn (unless [`SpecialRule::NoPlayerTurn`]
    /// is set), when the resolver refuses the move, or when the committed
    /// position would leave the mover's own king attacked.
    pub fn attempt_move(&mut self, from: Square, to: Square, side: Side) -> MoveKind {
        if self.ended || self.drawn {
            debug!(game = %self.id, %from, %to, "move rejected: match is over");
            return MoveKind::MoveNotAllowed;
        }
        if self.pending_promotion.is_some() {
            debug!(game = %self.id, %from, %to, "move rejected: promotion pending");
            return MoveKind::MoveNotAllowed;
        }
        if !self.is_player_turn(side) {
            debug!(game = %self.id, %from, %to, ?side, "move rejected: not this side's turn");
            return MoveKind::MoveNotAllowed;
        }

        let kind = self.resolver.classify(from, to, side, &self.board);
        if kind == MoveKind::MoveNotAllowed {
            debug!(game = %self.id, %from, %to, ?side, "move rejected by constraints");
            return MoveKind::MoveNotAllowed;
        }

        // Candidate, validate, commit. A move may never leave one's own
        // king in check.
        let mut candidate = self.board.clone();
        let captured = self.resolver.apply(&mut candidate, from, to, side, kind);

        if !self.has_rule(SpecialRule::NoCheckOrCheckmate) {
            let safety = KingSafety::new(&self.resolver);
            if safety.is_king_checked(side, &candidate) {
                debug!(game = %self.id, %from, %to, ?side, "move rejected: own king left in check");
                return MoveKind::MoveNotAllowed;
            }
        }

        self.board = candidate;

        if let Some(victim) = captured {
            self.credit_capture(side, victim);
        }
        self.history.push(MoveRecord { from, to, side, kind, captured });
        info!(game = %self.id, %from, %to, ?side, ?kind, "move committed");

        if kind == MoveKind::PawnPromotion {
            // The mover keeps the turn until the promotion is resolved;
            // every other move is rejected meanwhile.
            self.pending_promotion = Some(PendingPromotion { to, side });
            return kind;
        }

        self.side_to_move = self.side_to_move.other();
        self.evaluate_end_of_game(side.other());

        kind
    }

    /// Resolve a pending promotion by naming the replacement archetype
    ///
    /// Valid only while the match is paused on a promotion for `side` at
    /// `square`; kings and pawns are no promotion targets. Returns to the
    /// normal turn flow on success.
    pub fn resolve_promotion(&mut self, square: Square, kind: PieceKind, side: Side) -> bool {
        if self.ended || self.drawn {
            return false;
        }
        if matches!(kind, PieceKind::King | PieceKind::Pawn) {
            return false;
        }
        let Some(pending) = self.pending_promotion else {
            return false;
        };
        if pending.to != square || pending.side != side {
            return false;
        }

        self.board.put(square, Piece::new(kind, side));
        self.pending_promotion = None;
        info!(game = %self.id, %square, ?side, ?kind, "promotion resolved");

        self.side_to_move = side.other();
        self.evaluate_end_of_game(side.other());

        true
    }

    /// Assign a player to a side, or to the observer role
    ///
    /// At most one non-observer player per side; reassigning removes the
    /// player from any prior role first. Rejected once the match ended.
    pub fn assign_player_to_side(&mut self, player: Player, side: Side) -> bool {
        if self.ended || self.drawn {
            return false;
        }

        match side {
            Side::White => {
                self.release(player);
                if self.player_white.is_some() {
                    return false;
                }
                self.player_white = Some(player);
                true
            }
            Side::Black => {
                self.release(player);
                if self.player_black.is_some() {
                    return false;
                }
                self.player_black = Some(player);
                true
            }
            Side::Observer => {
                self.release(player);
                self.observers.push(player);
                true
            }
        }
    }

    /// The side a player currently occupies, if any
    pub fn player_side(&self, player: Player) -> Option<Side> {
        if self.player_white == Some(player) {
            Some(Side::White)
        } else if self.player_black == Some(player) {
            Some(Side::Black)
        } else if self.observers.contains(&player) {
            Some(Side::Observer)
        } else {
            None
        }
    }

    pub fn has_player(&self, player: Player) -> bool {
        self.player_side(player).is_some()
    }

    /// King-safety verdict for a side on the current board
    pub fn king_status(&self, side: Side) -> KingState {
        if self.has_rule(SpecialRule::NoCheckOrCheckmate) {
            return KingState::Ok;
        }

        KingSafety::new(&self.resolver).king_state(side, &self.board)
    }

    /// Every square the piece on `from` may legally move to for `side`
    pub fn legal_destinations(&self, from: Square, side: Side) -> Vec<Square> {
        KingSafety::new(&self.resolver).legal_destinations(from, side, &self.board)
    }

    fn is_player_turn(&self, side: Side) -> bool {
        if self.has_rule(SpecialRule::NoPlayerTurn) {
            return side.is_player();
        }

        side == self.side_to_move
    }

    fn credit_capture(&mut self, side: Side, victim: Piece) {
        match side {
            Side::White => self.white_score += victim.points(),
            Side::Black => self.black_score += victim.points(),
            Side::Observer => {}
        }
    }

    /// Checkmate ends the match, stalemate draws it; the caller learns of
    /// the transition by diffing state or asking [`Game::king_status`]
    fn evaluate_end_of_game(&mut self, side: Side) {
        if self.has_rule(SpecialRule::NoCheckOrCheckmate) {
            return;
        }

        match KingSafety::new(&self.resolver).king_state(side, &self.board) {
            KingState::Checkmate => {
                self.ended = true;
                info!(game = %self.id, ?side, "checkmate, match over");
            }
            KingState::Stalemate => {
                self.drawn = true;
                info!(game = %self.id, ?side, "stalemate, match drawn");
            }
            KingState::Check => {
                debug!(game = %self.id, ?side, "check");
            }
            KingState::Ok => {}
        }
    }

    /// Drop the player from both side slots and the observer list
    fn release(&mut self, player: Player) {
        if self.player_white == Some(player) {
            self.player_white = None;
        }
        if self.player_black == Some(player) {
            self.player_black = None;
        }
        self.observers.retain(|observer| *observer != player);
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
