//! Tests for the session controller lifecycle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tictactoe_core::{GameResult, Mark, Mode, MoveOutcome, Session};

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

#[test]
fn test_reset_restores_initial_state() {
    let mut session = Session::new(Mode::TwoPlayer);
    session.request_move(0);
    session.request_move(4);

    session.start_or_reset(Mode::TwoPlayer);

    assert!(session.board().is_blank());
    assert_eq!(session.to_move(), Mark::X);
    assert_eq!(session.result(), GameResult::InProgress);
    assert!(session.is_active());
}

#[test]
fn test_reset_after_win() {
    let mut session = Session::new(Mode::TwoPlayer);
    for idx in [0, 3, 1, 4, 2] {
        session.request_move(idx);
    }
    assert!(!session.is_active());

    session.start_or_reset(Mode::SinglePlayer);

    assert!(session.board().is_blank());
    assert_eq!(session.to_move(), Mark::X);
    assert_eq!(session.result(), GameResult::InProgress);
    assert!(session.is_active());
    assert_eq!(session.mode(), Mode::SinglePlayer);
}

#[test]
fn test_single_player_center_opening() {
    let mut session = Session::new(Mode::SinglePlayer);

    let outcome = session.request_move(4);

    assert_eq!(
        outcome,
        MoveOutcome::Applied {
            result: GameResult::InProgress,
            computer_reply_due: true,
        }
    );
    assert_eq!(session.to_move(), Mark::O);
    assert!(session.computer_reply_due());
}

#[test]
fn test_planned_reply_applies_once() {
    let mut session = Session::new(Mode::SinglePlayer);
    session.request_move(4);

    let planned = session
        .plan_computer_reply(&mut rng())
        .expect("reply is due");

    assert!(session.apply_planned(planned));
    assert_eq!(session.to_move(), Mark::X);
    assert!(!session.computer_reply_due());

    // Replaying the same plan must not touch the board.
    let before = session.clone();
    assert!(!session.apply_planned(planned));
    assert_eq!(session, before);
}

#[test]
fn test_reset_cancels_planned_reply() {
    let mut session = Session::new(Mode::SinglePlayer);
    session.request_move(4);
    let planned = session
        .plan_computer_reply(&mut rng())
        .expect("reply is due");

    // Restart fires before the delayed move lands.
    session.start_or_reset(Mode::SinglePlayer);

    assert!(!session.apply_planned(planned));
    assert!(session.board().is_blank());
    assert_eq!(session.to_move(), Mark::X);
}

#[test]
fn test_mode_change_cancels_planned_reply() {
    let mut session = Session::new(Mode::SinglePlayer);
    session.request_move(4);
    let planned = session
        .plan_computer_reply(&mut rng())
        .expect("reply is due");

    session.start_or_reset(Mode::TwoPlayer);

    assert!(!session.apply_planned(planned));
    assert!(session.board().is_blank());
    assert_eq!(session.mode(), Mode::TwoPlayer);
}

#[test]
fn test_no_reply_planned_in_two_player() {
    let mut session = Session::new(Mode::TwoPlayer);
    session.request_move(4);
    assert!(session.plan_computer_reply(&mut rng()).is_none());
}

#[test]
fn test_mode_switch_gating() {
    let mut session = Session::new(Mode::TwoPlayer);
    assert!(session.mode_switch_allowed());

    session.request_move(0);
    assert!(!session.mode_switch_allowed());

    // Finish the game: X takes the top row.
    for idx in [3, 1, 4, 2] {
        session.request_move(idx);
    }
    assert_eq!(session.result(), GameResult::Winner(Mark::X));
    assert!(session.mode_switch_allowed());
}

#[test]
fn test_single_player_game_runs_to_completion() {
    let mut session = Session::new(Mode::SinglePlayer);
    let mut rng = rng();

    for _ in 0..9 {
        if !session.is_active() {
            break;
        }
        // Human plays the first open cell, then lets the computer reply.
        let open = tictactoe_core::engine::available_moves(session.board());
        let outcome = session.request_move(open[0]);
        if let MoveOutcome::Applied {
            computer_reply_due: true,
            ..
        } = outcome
        {
            let planned = session
                .plan_computer_reply(&mut rng)
                .expect("board is not full");
            assert!(session.apply_planned(planned));
        }
    }

    assert!(session.result().is_terminal());
    assert!(!session.is_active());
}
