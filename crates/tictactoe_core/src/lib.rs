//! Pure tic-tac-toe logic: board types, stateless rules, and the session
//! controller. No UI or async code lives here; the terminal front end in
//! `tictactoe_tui` drives this crate through [`Session`].

#![warn(missing_docs)]

pub mod engine;
mod session;
mod types;

pub use session::{
    MoveOutcome, PlannedMove, RejectReason, Session, COMPUTER_MARK, HUMAN_MARK,
};
pub use types::{Board, Cell, GameResult, Mark, Mode};
