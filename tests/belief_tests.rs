use rps3_ai::{
    board::{standard_layout, PIECES_PER_SIDE},
    topology::{CELL_COUNT, CENTER},
    BeliefState, Color, Error, Move, MoveReport, Outcome, PieceType, Side, Square,
};

use PieceType::{Paper as P, Rock as R, Scissors as S};

const GROUPED_LAYOUT: [PieceType; PIECES_PER_SIDE] = [R, R, R, P, P, P, S, S, S];

fn blue_view() -> BeliefState {
    BeliefState::init_board_layout(Color::Blue, &standard_layout()).unwrap()
}

fn own(kind: PieceType) -> Square {
    Square::Own {
        kind,
        revealed: false,
    }
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn test_initial_hash() {
    let state = blue_view();
    assert_eq!(
        state.get_hash(),
        "PRPPPSPRPPPSPRPPPSOUOUOUOUOUOUOUOUOU0000000000-000"
    );
}

#[test]
fn test_red_side_layout() {
    let state = BeliefState::init_board_layout(Color::Red, &standard_layout()).unwrap();
    assert_eq!(state.square(0), Square::Enemy(None));
    assert_eq!(state.square(9), own(R));
    assert_eq!(state.possible_moves(Side::Player)[0], Move::new(9, 8));
}

#[test]
fn test_bad_layout_is_rejected() {
    assert!(matches!(
        BeliefState::init_board_layout(Color::Blue, &[R, R, R, R, R, R, S, S, S]),
        Err(Error::Setup(_))
    ));
}

#[test]
fn test_default_board_probabilities_and_counts() {
    let state = blue_view();
    for p in state.get_opponent_piece_probabilities() {
        assert_close(p, 1.0 / 3.0);
    }
    assert_eq!(state.enemy_counts(), [0, 0, 0]);
    assert_eq!(state.unknown_enemies(), 9);
    assert_eq!(state.own_counts(), [3, 3, 3]);
}

#[test]
fn test_empty_board_probabilities_and_counts() {
    let state = BeliefState::new();
    assert_eq!(state.get_opponent_piece_probabilities(), [0.0; 3]);
    assert_eq!(state.enemy_counts(), [0, 0, 0]);
    assert_eq!(state.unknown_enemies(), 0);
}

#[test]
fn test_clones_are_independent() {
    let original = blue_view();
    let mut copy = original.clone();
    copy.apply_move(0, 18, Outcome::Move, None).unwrap();
    assert_eq!(original.square(0), own(R));
    assert_eq!(original.turns(), 0);
    assert_ne!(original.get_hash(), copy.get_hash());
}

#[test]
fn test_movement_shifts_the_piece() {
    let mut state = blue_view();
    state.apply_report(&MoveReport::movement(0, 18)).unwrap();
    assert_eq!(state.square(0), Square::Empty);
    assert_eq!(state.square(18), own(R));
    assert_eq!(state.turns(), 1);

    state.apply_move(17, 26, Outcome::Move, None).unwrap();
    assert_eq!(state.square(26), Square::Enemy(None));
    assert_eq!(state.square(17), Square::Empty);
}

#[test]
fn test_player_tie_reveals_both_pieces() {
    let mut state = blue_view();
    state.apply_move(8, 9, Outcome::Tie, Some(S)).unwrap();
    assert_eq!(
        state.square(8),
        Square::Own {
            kind: S,
            revealed: true
        }
    );
    assert_eq!(state.square(9), Square::Enemy(Some(S)));
    assert_eq!(state.enemy_counts(), [0, 0, 1]);
    assert_eq!(state.unknown_enemies(), 8);
    assert_eq!(state.own_reveals(), [0, 0, 1]);
    assert!(state.get_hash().starts_with("PRPPPSPRPPPSPRPPPS!OS"));
}

#[test]
fn test_player_win_captures() {
    let mut state = blue_view();
    state.apply_move(0, 17, Outcome::Win, Some(S)).unwrap();
    assert_eq!(state.captures(), [0, 0, 1]);
    assert_eq!(state.enemy_counts(), [0, 0, 1]);
    assert_eq!(state.unknown_enemies(), 8);
    assert_eq!(state.square(0), Square::Empty);
    assert_eq!(
        state.square(17),
        Square::Own {
            kind: R,
            revealed: true
        }
    );
    assert!(state.get_hash().ends_with("-001"));
}

#[test]
fn test_player_loss_reveals_the_defender() {
    let mut state = blue_view();
    state.apply_move(0, 17, Outcome::Loss, Some(P)).unwrap();
    assert_eq!(state.own_counts(), [2, 3, 3]);
    assert_eq!(state.own_reveals(), [1, 0, 0]);
    assert_eq!(state.square(0), Square::Empty);
    assert_eq!(state.square(17), Square::Enemy(Some(P)));
    assert_eq!(state.enemy_counts(), [0, 1, 0]);
    assert_eq!(state.captures(), [0, 0, 0]);
}

#[test]
fn test_enemy_win_takes_our_cell() {
    let mut state = blue_view();
    state.apply_move(17, 0, Outcome::Win, Some(P)).unwrap();
    assert_eq!(state.own_counts(), [2, 3, 3]);
    assert_eq!(state.square(0), Square::Enemy(Some(P)));
    assert_eq!(state.square(17), Square::Empty);
    assert_eq!(state.enemy_counts(), [0, 1, 0]);
    assert_eq!(state.unknown_enemies(), 8);
    assert_eq!(state.own_lost(), 1);
}

#[test]
fn test_enemy_loss_counts_as_capture() {
    let mut state = blue_view();
    state.apply_move(9, 8, Outcome::Loss, Some(P)).unwrap();
    assert_eq!(state.captures(), [0, 1, 0]);
    assert_eq!(state.square(9), Square::Empty);
    assert_eq!(
        state.square(8),
        Square::Own {
            kind: S,
            revealed: true
        }
    );
    assert_eq!(state.unknown_enemies(), 8);
    assert_eq!(state.enemy_total(), 9);
}

#[test]
fn test_inconsistent_reports_are_rejected() {
    let mut state = blue_view();
    assert!(matches!(
        state.apply_move(20, 21, Outcome::Move, None),
        Err(Error::InconsistentReport(_))
    ));
    assert!(matches!(
        state.apply_move(0, 17, Outcome::Win, None),
        Err(Error::InconsistentReport(_))
    ));
    assert!(matches!(
        state.apply_move(0, CELL_COUNT, Outcome::Move, None),
        Err(Error::InconsistentReport(_))
    ));
}

#[test]
fn test_rejected_reports_leave_the_state_untouched() {
    let mut state = blue_view();
    state.apply_move(0, 18, Outcome::Move, None).unwrap();
    let before = state.clone();

    let reports = [
        // tie against an unknown piece without its type
        (1, 17, Outcome::Tie, None),
        // the enemy side of a tie is revealed before the own side is missing
        (9, 19, Outcome::Tie, Some(S)),
        (1, 17, Outcome::Win, None),
        (9, 22, Outcome::Win, Some(S)),
        (9, 8, Outcome::Loss, None),
        (20, 21, Outcome::Move, None),
        (18, CELL_COUNT, Outcome::Move, None),
    ];
    for (from, to, outcome, other_hand) in reports {
        let result = state.apply_move(from, to, outcome, other_hand);
        assert!(
            matches!(result, Err(Error::InconsistentReport(_))),
            "{from}:{to} {outcome:?} was accepted"
        );
        assert_eq!(state, before, "{from}:{to} {outcome:?} changed the state");
    }
    assert_eq!(state.turns(), 1);

    let next = state.after_move(18, 19, Outcome::Move, None).unwrap();
    assert_eq!(state, before);
    assert_eq!(next.square(19), own(R));
    assert_eq!(next.turns(), 2);
}

#[test]
fn test_hash_depends_only_on_board_and_captures() {
    let mut a = blue_view();
    a.apply_move(0, 18, Outcome::Move, None).unwrap();
    a.apply_move(17, 26, Outcome::Move, None).unwrap();

    let mut b = blue_view();
    b.apply_move(17, 26, Outcome::Move, None).unwrap();
    b.apply_move(0, 18, Outcome::Move, None).unwrap();

    assert_eq!(a.get_hash(), b.get_hash());
}

#[test]
fn test_piece_moves_skip_own_pieces() {
    let state = blue_view();
    assert_eq!(
        state.piece_moves(0),
        vec![Move::new(0, 17), Move::new(0, 18)]
    );
    assert!(state.piece_moves(20).is_empty());
    let enemy_moves = state.possible_moves(Side::Opponent);
    assert_eq!(enemy_moves.first(), Some(&Move::new(9, 8)));
    assert_eq!(enemy_moves.len(), 11);
}

#[test]
fn test_match_not_over_at_start() {
    assert_eq!(blue_view().is_match_over(), (0.0, None));
}

#[test]
fn test_player_wins_by_center() {
    let mut squares = *blue_view().squares();
    for cell in 9..12 {
        squares[cell] = Square::Empty;
    }
    squares[2] = Square::Empty;
    squares[CENTER] = own(S);
    let state = BeliefState::from_squares(squares, [3, 0, 0]);
    assert_eq!(state.enemy_counts(), [3, 0, 0]);
    assert_eq!(state.unknown_enemies(), 6);
    assert_eq!(state.is_match_over(), (1.0, Some(Side::Player)));
}

#[test]
fn test_opponent_wins_by_known_center() {
    let mut squares = *blue_view().squares();
    for cell in [0, 3, 6, 9] {
        squares[cell] = Square::Empty;
    }
    squares[CENTER] = Square::Enemy(Some(S));
    let state = BeliefState::from_squares(squares, [0, 0, 0]);
    assert_eq!(state.own_counts(), [0, 3, 3]);
    assert_eq!(state.is_match_over(), (1.0, Some(Side::Opponent)));
}

#[test]
fn test_opponent_center_with_one_lost_type() {
    let mut state = BeliefState::init_board_layout(Color::Blue, &GROUPED_LAYOUT).unwrap();
    state.apply_move(17, 0, Outcome::Win, Some(P)).unwrap(); // opponent
    state.apply_move(1, 0, Outcome::Loss, Some(P)).unwrap(); // player
    state.apply_move(0, 1, Outcome::Move, None).unwrap(); // opponent
    state.apply_move(2, 1, Outcome::Loss, Some(P)).unwrap(); // player
    state.apply_move(9, 22, Outcome::Move, None).unwrap(); // opponent
    state.apply_move(3, 2, Outcome::Move, None).unwrap(); // player
    state.apply_move(22, CENTER, Outcome::Move, None).unwrap(); // opponent

    let probabilities = state.get_opponent_piece_probabilities();
    let (probability, winner) = state.is_match_over();
    assert_eq!(state.own_counts(), [0, 3, 3]);
    assert_close(probability, probabilities[2]);
    assert_close(probability, 3.0 / 8.0);
    assert_eq!(winner, Some(Side::Opponent));
}

#[test]
fn test_opponent_center_with_two_lost_types() {
    let mut state = BeliefState::init_board_layout(Color::Blue, &GROUPED_LAYOUT).unwrap();
    state.apply_move(17, 0, Outcome::Win, Some(P)).unwrap(); // opponent
    state.apply_move(1, 0, Outcome::Loss, Some(P)).unwrap(); // player
    state.apply_move(0, 1, Outcome::Move, None).unwrap(); // opponent
    state.apply_move(2, 1, Outcome::Loss, Some(P)).unwrap(); // player
    state.apply_move(9, 8, Outcome::Win, Some(R)).unwrap(); // opponent
    state.apply_move(7, 8, Outcome::Loss, Some(R)).unwrap(); // player
    state.apply_move(8, 7, Outcome::Move, None).unwrap(); // opponent
    state.apply_move(6, 7, Outcome::Loss, Some(R)).unwrap(); // player
    state.apply_move(13, 24, Outcome::Move, None).unwrap(); // opponent
    state.apply_move(3, 2, Outcome::Move, None).unwrap(); // player
    state.apply_move(24, CENTER, Outcome::Move, None).unwrap(); // opponent

    let probabilities = state.get_opponent_piece_probabilities();
    let (probability, winner) = state.is_match_over();
    assert_eq!(state.own_counts(), [0, 3, 0]);
    assert_close(probability, probabilities[1] + probabilities[2]);
    assert_close(probability, 5.0 / 7.0);
    assert_eq!(winner, Some(Side::Opponent));
}

#[test]
fn test_player_wins_when_enemy_is_wiped_out() {
    let mut squares = *blue_view().squares();
    for cell in 9..18 {
        squares[cell] = Square::Empty;
    }
    let state = BeliefState::from_squares(squares, [3, 3, 3]);
    assert_eq!(state.is_match_over(), (1.0, Some(Side::Player)));
}

#[test]
fn test_opponent_wins_when_we_are_wiped_out() {
    let mut squares = *blue_view().squares();
    for cell in 0..9 {
        squares[cell] = Square::Empty;
    }
    let state = BeliefState::from_squares(squares, [0, 0, 0]);
    assert_eq!(state.is_match_over(), (1.0, Some(Side::Opponent)));
}

#[test]
fn test_display_renders_the_board() {
    let mut state = blue_view();
    state.apply_move(8, 9, Outcome::Tie, Some(S)).unwrap();
    let rendered = state.to_string();
    assert!(rendered.contains("PS!"));
    assert!(rendered.contains("OS"));
    assert!(rendered.contains("Turns: 1"));
    assert!(!rendered.contains("I4"));
}
