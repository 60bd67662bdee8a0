//! Match flow integration tests
//!
//! Turn alternation, commit/reject semantics, scoring, special rules,
//! player assignment and the end/draw transitions.

use chess_match::{Game, KingState, MoveKind, Piece, Player, Side, SpecialRule, Square};
use chess_rules::board::Board;

// ============================================================================
// Turn alternation and basic commits
// ============================================================================

#[test]
fn white_opens_and_the_turn_alternates() {
    let mut game = Game::new();

    assert_eq!(game.side_to_move(), Side::White);
    assert_eq!(
        game.attempt_move(Square::E7, Square::E5, Side::Black),
        MoveKind::MoveNotAllowed,
        "black may not open"
    );

    assert_eq!(game.attempt_move(Square::E2, Square::E4, Side::White), MoveKind::Normal);
    assert_eq!(game.snapshot().get(&Square::E4), Some(&Piece::W_PAWN));
    assert_eq!(game.snapshot().get(&Square::E2), None);
    assert_eq!(game.side_to_move(), Side::Black);

    assert_eq!(
        game.attempt_move(Square::D2, Square::D4, Side::White),
        MoveKind::MoveNotAllowed,
        "white may not move twice in a row"
    );
    assert_eq!(game.attempt_move(Square::E7, Square::E5, Side::Black), MoveKind::Normal);
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn a_rejected_move_changes_nothing() {
    let mut game = Game::new();
    let before = game.snapshot();

    assert_eq!(
        game.attempt_move(Square::E2, Square::E5, Side::White),
        MoveKind::MoveNotAllowed
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.side_to_move(), Side::White);
    assert!(game.history().is_empty());
}

#[test]
fn observers_never_move() {
    let mut game = Game::new();
    game.add_special_rule(SpecialRule::NoPlayerTurn);

    assert_eq!(
        game.attempt_move(Square::E2, Square::E4, Side::Observer),
        MoveKind::MoveNotAllowed
    );
}

#[test]
fn history_records_committed_moves_in_order() {
    let mut game = Game::new();

    game.attempt_move(Square::E2, Square::E4, Side::White);
    game.attempt_move(Square::D7, Square::D5, Side::Black);
    game.attempt_move(Square::E4, Square::D5, Side::White);

    let kinds: Vec<MoveKind> = game.history().iter().map(|record| record.kind).collect();
    assert_eq!(kinds, vec![MoveKind::Normal, MoveKind::Normal, MoveKind::Capture]);
    assert_eq!(game.history()[2].captured, Some(Piece::B_PAWN));
}

// ============================================================================
// Self-check protection
// ============================================================================

#[test]
fn a_move_baring_the_own_king_never_commits() {
    // The E2 rook is the only thing between the king and the E8 rook
    let board = Board::from_notation("E1:W_KING;E2:W_ROOK;E8:B_ROOK;H8:B_KING").unwrap();
    let mut game = Game::with_board(board);

    assert_eq!(
        game.attempt_move(Square::E2, Square::A2, Side::White),
        MoveKind::MoveNotAllowed
    );
    assert_eq!(game.snapshot().get(&Square::E2), Some(&Piece::W_ROOK), "nothing moved");

    // Along the pin ray the rook is free
    assert_eq!(game.attempt_move(Square::E2, Square::E5, Side::White), MoveKind::Normal);
}

#[test]
fn each_side_keeps_exactly_one_king_through_a_full_game() {
    let mut game = Game::new();

    // Fool's mate
    game.attempt_move(Square::F2, Square::F3, Side::White);
    game.attempt_move(Square::E7, Square::E5, Side::Black);
    game.attempt_move(Square::G2, Square::G4, Side::White);
    game.attempt_move(Square::D8, Square::H4, Side::Black);

    let snapshot = game.snapshot();
    for side in [Side::White, Side::Black] {
        let kings = snapshot
            .values()
            .filter(|piece| piece.is_king() && piece.side() == side)
            .count();
        assert_eq!(kings, 1);
    }
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn captures_credit_the_captured_points() {
    let board =
        Board::from_notation("E1:W_KING;E8:B_KING;D4:W_ROOK;D7:B_QUEEN;A4:B_PAWN").unwrap();
    let mut game = Game::with_board(board);
    game.add_special_rule(SpecialRule::NoPlayerTurn);

    assert_eq!(game.attempt_move(Square::D4, Square::D7, Side::White), MoveKind::Capture);
    assert_eq!(game.scores(), (9, 0));

    assert_eq!(game.attempt_move(Square::A4, Square::A3, Side::Black), MoveKind::Normal);
    assert_eq!(game.scores(), (9, 0), "plain moves score nothing");
}

#[test]
fn en_passant_scores_a_single_pawn() {
    let mut game = Game::new();
    game.add_special_rule(SpecialRule::NoPlayerTurn);

    game.attempt_move(Square::H2, Square::H4, Side::White);
    game.attempt_move(Square::H4, Square::H5, Side::White);
    game.attempt_move(Square::G7, Square::G5, Side::Black);

    assert_eq!(
        game.attempt_move(Square::H5, Square::G6, Side::White),
        MoveKind::EnPassant
    );
    assert_eq!(game.snapshot().get(&Square::G6), Some(&Piece::W_PAWN));
    assert_eq!(game.snapshot().get(&Square::G5), None);
    assert_eq!(game.scores(), (1, 0));
}

// ============================================================================
// Special rules
// ============================================================================

#[test]
fn no_player_turn_lets_one_side_move_repeatedly() {
    let mut game = Game::new();
    game.add_special_rule(SpecialRule::NoPlayerTurn);

    assert_eq!(game.attempt_move(Square::E2, Square::E4, Side::White), MoveKind::Normal);
    assert_eq!(game.attempt_move(Square::E4, Square::E5, Side::White), MoveKind::Normal);
}

#[test]
fn no_check_rule_disables_king_safety_entirely() {
    let board = Board::from_notation("E1:W_KING;E2:W_ROOK;E8:B_ROOK;H8:B_KING").unwrap();
    let mut game = Game::with_board(board);
    game.add_special_rule(SpecialRule::NoCheckOrCheckmate);
    game.add_special_rule(SpecialRule::NoPlayerTurn);

    // Abandoning the pin commits under the relaxed rules
    assert_eq!(game.attempt_move(Square::E2, Square::A2, Side::White), MoveKind::Normal);
    assert_eq!(game.king_status(Side::White), KingState::Ok);
    assert!(!game.is_ended());
}

// ============================================================================
// End and draw transitions
// ============================================================================

#[test]
fn checkmate_ends_the_match() {
    let mut game = Game::new();

    // Fool's mate
    game.attempt_move(Square::F2, Square::F3, Side::White);
    game.attempt_move(Square::E7, Square::E5, Side::Black);
    game.attempt_move(Square::G2, Square::G4, Side::White);
    assert_eq!(game.attempt_move(Square::D8, Square::H4, Side::Black), MoveKind::Normal);

    assert!(game.is_ended());
    assert_eq!(game.king_status(Side::White), KingState::Checkmate);
    assert_eq!(
        game.attempt_move(Square::A2, Square::A3, Side::White),
        MoveKind::MoveNotAllowed,
        "an ended match accepts no further moves"
    );
}

#[test]
fn stalemate_draws_the_match() {
    let board = Board::from_notation("A8:B_KING;E7:W_QUEEN;E1:W_KING").unwrap();
    let mut game = Game::with_board(board);

    assert_eq!(game.king_status(Side::Black), KingState::Ok, "B8 is still free");
    assert_eq!(game.attempt_move(Square::E7, Square::C7, Side::White), MoveKind::Normal);

    assert!(game.is_drawn());
    assert!(!game.is_ended());
    assert_eq!(game.king_status(Side::Black), KingState::Stalemate);
    assert_eq!(
        game.attempt_move(Square::A8, Square::B8, Side::Black),
        MoveKind::MoveNotAllowed
    );
}

// ============================================================================
// Player assignment
// ============================================================================

#[test]
fn one_non_observer_player_per_side() {
    let mut game = Game::new();
    let alice = Player::new();
    let bob = Player::new();

    assert!(game.assign_player_to_side(alice, Side::White));
    assert!(!game.assign_player_to_side(bob, Side::White), "white is taken");
    assert!(game.assign_player_to_side(bob, Side::Black));

    assert_eq!(game.player_side(alice), Some(Side::White));
    assert_eq!(game.player_side(bob), Some(Side::Black));
}

#[test]
fn reassignment_releases_the_previous_role() {
    let mut game = Game::new();
    let alice = Player::new();
    let bob = Player::new();

    assert!(game.assign_player_to_side(alice, Side::White));
    assert!(game.assign_player_to_side(alice, Side::Black));
    assert_eq!(game.player_side(alice), Some(Side::Black));

    // White is free again
    assert!(game.assign_player_to_side(bob, Side::White));

    // Moving to the observer list clears the side slot
    assert!(game.assign_player_to_side(alice, Side::Observer));
    assert_eq!(game.player_side(alice), Some(Side::Observer));
    let carol = Player::new();
    assert!(game.assign_player_to_side(carol, Side::Black));
}

#[test]
fn assignment_is_rejected_once_the_match_ended() {
    let mut game = Game::new();

    game.attempt_move(Square::F2, Square::F3, Side::White);
    game.attempt_move(Square::E7, Square::E5, Side::Black);
    game.attempt_move(Square::G2, Square::G4, Side::White);
    game.attempt_move(Square::D8, Square::H4, Side::Black);
    assert!(game.is_ended());

    assert!(!game.assign_player_to_side(Player::new(), Side::White));
}

// ============================================================================
// Snapshot and serialization
// ============================================================================

#[test]
fn snapshots_are_detached_copies() {
    let mut game = Game::new();
    let before = game.snapshot();

    game.attempt_move(Square::E2, Square::E4, Side::White);

    assert_eq!(before.get(&Square::E2), Some(&Piece::W_PAWN));
    assert_eq!(game.snapshot().get(&Square::E2), None);
}

#[test]
fn history_serializes_for_external_adapters() {
    let mut game = Game::new();
    game.attempt_move(Square::E2, Square::E4, Side::White);
    game.attempt_move(Square::D7, Square::D5, Side::Black);
    game.attempt_move(Square::E4, Square::D5, Side::White);

    let json = serde_json::to_string(game.history()).unwrap();
    let parsed: Vec<chess_match::MoveRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_slice(), game.history());
}
