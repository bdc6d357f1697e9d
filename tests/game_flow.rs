mod common;

use common::*;
use gyroad::board::GameStatus;
use gyroad::error::{ActionError, SetupError};
use gyroad::game::{Game, Phase};
use gyroad::piece::{Orientation, PieceKind};
use gyroad::rules::GyroadRules;
use gyroad::side::Side;
use pretty_assertions::assert_eq;

use PieceKind::*;
use Side::*;


#[test]
fn setup_rejects_bad_placements() {
    let out_of_bounds = Game::from_placements(GyroadRules::standard(), &[(Disc, South, 7, 3)]);
    assert_eq!(out_of_bounds.unwrap_err(), SetupError::PositionOutOfBounds { x: 7, y: 3 });
    let duplicate = Game::from_placements(
        GyroadRules::standard(),
        &[(Disc, South, 3, 3), (Crown, North, 3, 3)],
    );
    assert_eq!(duplicate.unwrap_err(), SetupError::SquareOccupied(coord("d4")));
}

#[test]
fn selection_rejections_leave_state_unchanged() {
    let mut game = standard_game();
    assert_eq!(game.commit_move(coord("d4")).unwrap_err(), ActionError::NothingSelected);
    assert_eq!(game.select(coord("d4"), South).unwrap_err(), ActionError::SquareEmpty);
    assert_eq!(game.select(coord("d2"), South).unwrap_err(), ActionError::WrongSide);
    assert_eq!(game.select(coord("d7"), North).unwrap_err(), ActionError::WrongSide);
    assert_eq!(game.phase(), Phase::Idle);

    let selection = game.select(coord("d7"), South).unwrap();
    assert_eq!(selection.piece.kind, PawnCross);
    assert_eq!(game.phase(), Phase::Selected { at: coord("d7") });
    // Another piece cannot be grabbed while a selection is active, but
    // re-selecting the same piece just recomputes its highlights.
    assert_eq!(game.select(coord("c7"), South).unwrap_err(), ActionError::SelectionActive);
    assert_eq!(game.select(coord("d7"), South).unwrap(), selection);
    assert_eq!(game.selection(), Some(selection));

    game.deselect().unwrap();
    assert_eq!(game.phase(), Phase::Idle);
    game.select(coord("c7"), South).unwrap();
}

#[test]
fn move_commit_swaps_and_hands_over_the_turn() {
    let mut game = custom_game(&[
        (Disc, South, 3, 3),     // d4
        (Triangle, North, 3, 2), // d3
    ]);
    game.select(coord("d4"), South).unwrap();
    assert_eq!(
        game.commit_move(coord("a1")).unwrap_err(),
        ActionError::DestinationUnreachable
    );
    assert_eq!(game.phase(), Phase::Selected { at: coord("d4") });

    let outcome = game.commit_move(coord("d3")).unwrap();
    assert_eq!(outcome.path, vec![coord("d4"), coord("d3")]);
    assert!(outcome.turn_ended);
    assert_eq!(outcome.status, GameStatus::Active);
    assert!(outcome.swapped_with.is_some());
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.active_side(), North);
    assert_eq!(game.board().piece_at(coord("d3")).unwrap().kind, Disc);
    assert_eq!(game.board().piece_at(coord("d4")).unwrap().kind, Triangle);
    // The displaced piece is free to act on its owner's turn.
    game.select(coord("d4"), North).unwrap();
}

#[test]
fn move_commit_travels_the_relay_chain() {
    let mut game = custom_game(&[
        (Disc, South, 3, 3),     // d4
        (Triangle, South, 3, 2), // d3
    ]);
    game.select(coord("d4"), South).unwrap();
    let outcome = game.commit_move(coord("d2")).unwrap();
    assert_eq!(outcome.path, vec![coord("d4"), coord("d3"), coord("d2")]);
    assert_eq!(outcome.swapped_with, None);
    // The relay piece itself never moved.
    assert_eq!(game.board().piece_at(coord("d3")).unwrap().kind, Triangle);
    assert_eq!(game.board().piece_at(coord("d2")).unwrap().kind, Disc);
    assert_eq!(game.board().piece_at(coord("d4")), None);
}

#[test]
fn rotation_spends_budget_and_locks_the_piece() {
    let mut game = custom_game(&[
        (Disc, South, 3, 3), // d4
        (Disc, South, 1, 3), // b4
        (Disc, South, 5, 3), // f4
    ]);
    assert_eq!(game.board().rotation_budget(), 2);

    game.select(coord("d4"), South).unwrap();
    game.begin_rotate().unwrap();
    assert_eq!(game.rotate_step().unwrap(), Orientation::Deg270);
    game.confirm_rotate().unwrap();
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.board().rotation_budget(), 1);
    assert_eq!(game.active_side(), South);  // rotation does not end the turn
    let disc = game.board().piece_at(coord("d4")).unwrap();
    assert_eq!(disc.orientation, Orientation::Deg270);
    assert!(disc.rotated_this_turn);
    // A quarter turn re-aims the disc: its up/up*2 lances now point east.
    assert_eq!(
        game.available_squares(coord("d4")),
        vec![coord("e4"), coord("f4"), coord("d3"), coord("d5")]
    );
    assert_eq!(
        game.select(coord("d4"), South).unwrap_err(),
        ActionError::PieceAlreadyRotated
    );

    game.select(coord("b4"), South).unwrap();
    game.begin_rotate().unwrap();
    game.rotate_step().unwrap();
    game.confirm_rotate().unwrap();
    assert_eq!(game.board().rotation_budget(), 0);

    game.select(coord("f4"), South).unwrap();
    assert_eq!(game.begin_rotate().unwrap_err(), ActionError::NoRotationsLeft);
    assert_eq!(game.phase(), Phase::Selected { at: coord("f4") });
    assert_eq!(
        game.board().piece_at(coord("f4")).unwrap().orientation,
        Orientation::Deg0
    );
}

#[test]
fn rotation_cancel_restores_the_orientation() {
    let mut game = custom_game(&[(Crown, South, 3, 3)]);
    game.select(coord("d4"), South).unwrap();
    game.begin_rotate().unwrap();
    game.rotate_step().unwrap();
    game.rotate_step().unwrap();
    // Selection and move commands stay locked out until Done or Cancel.
    assert_eq!(game.select(coord("d4"), South).unwrap_err(), ActionError::RotationInProgress);
    assert_eq!(game.deselect().unwrap_err(), ActionError::RotationInProgress);
    assert_eq!(game.commit_move(coord("d3")).unwrap_err(), ActionError::RotationInProgress);
    let selection = game.cancel_rotate().unwrap();
    assert_eq!(selection.piece.orientation, Orientation::Deg0);
    assert_eq!(game.phase(), Phase::Selected { at: coord("d4") });
    assert_eq!(game.board().rotation_budget(), 2);
    assert!(!game.board().piece_at(coord("d4")).unwrap().rotated_this_turn);
    // Nothing was spent; the rotation can start over.
    game.begin_rotate().unwrap();
}

#[test]
fn pawns_do_not_rotate() {
    let mut game = standard_game();
    for at in [coord("c7"), coord("d7")] {
        game.select(at, South).unwrap();
        assert_eq!(game.begin_rotate().unwrap_err(), ActionError::NotRotatable);
        game.deselect().unwrap();
    }
    assert_eq!(game.rotate_step().unwrap_err(), ActionError::RotationNotStarted);
    assert_eq!(game.confirm_rotate().unwrap_err(), ActionError::RotationNotStarted);
}

#[test]
fn four_confirmed_rotations_make_a_full_circle() {
    let mut game = custom_game_with_rules(
        GyroadRules { rotations_per_turn: 4, ..GyroadRules::standard() },
        &[(Diamond, South, 3, 3), (Diamond, North, 3, 0)],
    );
    let original = game.board().piece_at(coord("d4")).unwrap();
    for _ in 0..4 {
        game.select(coord("d4"), South).unwrap();
        game.begin_rotate().unwrap();
        game.rotate_step().unwrap();
        game.confirm_rotate().unwrap();
        // The lock applies for the rest of the turn; hand the turn around
        // to rotate the same piece again.
        game.end_turn_if_idle().unwrap();
        game.end_turn_if_idle().unwrap();
    }
    let back = game.board().piece_at(coord("d4")).unwrap();
    assert_eq!(back.orientation, original.orientation);
    assert_eq!(back.resolved_offsets(), original.resolved_offsets());
}

#[test]
fn end_turn_if_idle_requires_idle() {
    let mut game = standard_game();
    game.select(coord("c7"), South).unwrap();
    assert_eq!(game.end_turn_if_idle().unwrap_err(), ActionError::SelectionActive);
    game.deselect().unwrap();
    assert_eq!(game.end_turn_if_idle().unwrap(), North);
    assert_eq!(game.board().rotation_budget(), 2);
    game.select(coord("d2"), North).unwrap();
}

#[test]
fn promotion_ends_the_game_at_the_threshold() {
    let mut game = custom_game_with_rules(
        GyroadRules { win_threshold: 1, ..GyroadRules::standard() },
        &[
            (PawnLeft, South, 1, 1), // b2
            (Disc, South, 2, 1),     // c2
        ],
    );
    game.select(coord("b2"), South).unwrap();
    let outcome = game.commit_move(coord("c1")).unwrap();
    assert_eq!(outcome.path, vec![coord("b2"), coord("c2"), coord("c1")]);
    assert_eq!(outcome.promotions.len(), 1);
    assert_eq!(outcome.promotions[0].at, coord("c1"));
    assert_eq!(outcome.promotions[0].side, South);
    assert_eq!(outcome.status, GameStatus::Victory(South));
    // The promoted pawn is off the board, and the game accepts no further
    // commands.
    assert_eq!(game.board().piece_at(coord("c1")), None);
    assert_eq!(game.board().score(South), 1);
    assert_eq!(game.select(coord("c2"), North).unwrap_err(), ActionError::GameOver);
    assert_eq!(game.end_turn_if_idle().unwrap_err(), ActionError::GameOver);
}

#[test]
fn game_state_round_trips_through_serde() {
    let mut game = custom_game_with_rules(
        GyroadRules::short_match(),
        &[
            (Disc, South, 3, 3),     // d4
            (Triangle, North, 3, 2), // d3
            (Crown, North, 0, 0),    // a1
        ],
    );
    game.select(coord("d4"), South).unwrap();
    game.commit_move(coord("d3")).unwrap();
    game.select(coord("d4"), North).unwrap();

    let encoded = serde_json::to_string(&game).unwrap();
    let decoded: Game = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, game);
    assert_eq!(decoded.phase(), Phase::Selected { at: coord("d4") });
}
