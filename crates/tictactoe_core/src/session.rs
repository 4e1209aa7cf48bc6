//! Session state machine: the single mutable aggregate behind the UI.
//!
//! The session moves through `Empty -> InProgress -> {WonByX, WonByO, Draw}`.
//! Terminal states accept no moves; the only way out is [`Session::start_or_reset`].
//! Presentation layers read snapshots and mutate only through the methods here.

use crate::engine;
use crate::types::{Board, Cell, GameResult, Mark, Mode};
use rand::Rng;
use tracing::{debug, instrument};

/// Why a move request was ignored.
///
/// Rejections are silent no-ops rather than errors: input arriving from a
/// control the UI should have disabled is expected and harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RejectReason {
    /// The game has concluded; reset first.
    #[display("session is inactive")]
    SessionInactive,
    /// The target cell already holds a mark.
    #[display("cell is already occupied")]
    CellOccupied,
    /// Single-player mode and it is the computer's turn.
    #[display("not your turn")]
    NotYourTurn,
    /// Index outside 0-8. A caller precondition, tolerated defensively.
    #[display("index out of range")]
    OutOfRange,
}

/// Result of [`Session::request_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mark was placed.
    Applied {
        /// New result after the move.
        result: GameResult,
        /// True when the session now expects a computer reply.
        computer_reply_due: bool,
    },
    /// Nothing changed.
    Rejected(RejectReason),
}

/// A computer move chosen now but applied later, after the cosmetic delay.
///
/// Tagged with the session generation at planning time so a reset or mode
/// change in the interim invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    index: usize,
    generation: u64,
}

impl PlannedMove {
    /// The board index the computer intends to play.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Live game state. Owned by one controller loop; every mutation goes
/// through [`Session::start_or_reset`], [`Session::request_move`], or the
/// planned-move pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: Board,
    to_move: Mark,
    mode: Mode,
    result: GameResult,
    active: bool,
    generation: u64,
    pending: Option<PlannedMove>,
}

/// The human always plays X in single-player mode; the computer replies as O.
pub const HUMAN_MARK: Mark = Mark::X;

/// The computer's mark in single-player mode.
pub const COMPUTER_MARK: Mark = Mark::O;

impl Session {
    /// Creates a session with an empty board, X to move, in the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            mode,
            result: GameResult::InProgress,
            active: true,
            generation: 0,
            pending: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the result derived from the board at the last mutation.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// False once the game has concluded.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when the mode selector may be used: before the first move or
    /// after the game has concluded. The session only answers the query;
    /// enforcement is the presentation layer's job.
    pub fn mode_switch_allowed(&self) -> bool {
        self.board.is_blank() || self.result.is_terminal()
    }

    /// Resets to an empty board in `mode`, X to move, game active.
    ///
    /// Callable at any time; always succeeds. Cancels any planned computer
    /// move by advancing the generation.
    #[instrument(skip(self))]
    pub fn start_or_reset(&mut self, mode: Mode) {
        debug!(?mode, "resetting session");
        self.board = Board::new();
        self.to_move = Mark::X;
        self.mode = mode;
        self.result = GameResult::InProgress;
        self.active = true;
        self.generation += 1;
        self.pending = None;
    }

    /// Handles a human move request at `idx`.
    ///
    /// Rejected without state change when the session is inactive, the cell
    /// is occupied, the index is out of range, or (single-player) it is not
    /// the human's turn. Otherwise places the active mark, flips the turn,
    /// and re-evaluates the board.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, idx: usize) -> MoveOutcome {
        if !self.active {
            return MoveOutcome::Rejected(RejectReason::SessionInactive);
        }
        if idx >= 9 {
            return MoveOutcome::Rejected(RejectReason::OutOfRange);
        }
        if self.mode == Mode::SinglePlayer && self.to_move != HUMAN_MARK {
            return MoveOutcome::Rejected(RejectReason::NotYourTurn);
        }
        if !self.board.is_empty_at(idx) {
            return MoveOutcome::Rejected(RejectReason::CellOccupied);
        }

        self.apply(idx)
    }

    /// Chooses the computer's reply and records it as the single pending
    /// planned move. Returns `None` when no reply is due, or when the
    /// engine has no move to offer (full board, tolerated defensively).
    #[instrument(skip(self, rng))]
    pub fn plan_computer_reply(&mut self, rng: &mut impl Rng) -> Option<PlannedMove> {
        if !self.computer_reply_due() {
            return None;
        }
        let index =
            engine::select_computer_move(&self.board, COMPUTER_MARK, HUMAN_MARK, rng)?;
        let planned = PlannedMove {
            index,
            generation: self.generation,
        };
        debug!(index, "planned computer reply");
        self.pending = Some(planned);
        Some(planned)
    }

    /// Applies a previously planned computer move.
    ///
    /// The plan is re-validated against the current session: the generation
    /// must match, a reply must still be due, and the target cell must
    /// still be empty. A stale plan is dropped without touching the board.
    /// Returns whether the move was applied.
    #[instrument(skip(self))]
    pub fn apply_planned(&mut self, planned: PlannedMove) -> bool {
        if self.pending != Some(planned) || planned.generation != self.generation {
            debug!("dropping stale planned move");
            return false;
        }
        self.pending = None;
        if !self.computer_reply_due() || !self.board.is_empty_at(planned.index) {
            debug!("planned move no longer valid");
            return false;
        }
        matches!(self.apply(planned.index), MoveOutcome::Applied { .. })
    }

    /// True when the session expects the computer to move next.
    pub fn computer_reply_due(&self) -> bool {
        self.active
            && self.mode == Mode::SinglePlayer
            && self.to_move == COMPUTER_MARK
            && self.result == GameResult::InProgress
    }

    /// Shared move-application path for human and computer moves: place,
    /// flip, re-evaluate, deactivate on a terminal result.
    fn apply(&mut self, idx: usize) -> MoveOutcome {
        let mark = self.to_move;
        self.board.set(idx, Cell::Taken(mark));
        self.to_move = mark.opponent();
        self.result = engine::evaluate(&self.board);
        self.generation += 1;
        if self.result.is_terminal() {
            self.active = false;
            self.pending = None;
        }
        debug!(idx, %mark, result = ?self.result, "move applied");
        MoveOutcome::Applied {
            result: self.result,
            computer_reply_due: self.computer_reply_due(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
