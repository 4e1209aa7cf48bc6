//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// X (moves first).
    X,
    /// O (moves second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark placed yet.
    Empty,
    /// Cell claimed by a player.
    Taken(Mark),
}

/// 3x3 board in row-major order: indices 0-2 top row, 3-5 middle, 6-8 bottom.
///
/// Cells are monotonic within a game: once taken they stay taken until the
/// whole board is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Returns the cell at `idx`, or `None` when `idx` is out of range.
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }

    /// Places `cell` at `idx`. Out-of-range indices are ignored; occupied
    /// cells are never silently overwritten by the session layer, which
    /// validates before calling.
    pub fn set(&mut self, idx: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    /// True when the cell at `idx` exists and holds no mark.
    pub fn is_empty_at(&self, idx: usize) -> bool {
        matches!(self.get(idx), Some(Cell::Empty))
    }

    /// True when every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// True when no cell holds a mark.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// All nine cells in index order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of evaluating a board. Always derived from the board itself,
/// never stored with independent authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Moves remain and nobody has three in a row.
    InProgress,
    /// The given mark completed a line.
    Winner(Mark),
    /// Full board, no line.
    Draw,
}

impl GameResult {
    /// True for `Winner` and `Draw`.
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Who the opponent is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Mode {
    /// One human (always X) against the computer.
    SinglePlayer,
    /// Two humans sharing the keyboard.
    TwoPlayer,
}

impl Mode {
    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::SinglePlayer => "You vs Computer",
            Mode::TwoPlayer => "Two Players",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::SinglePlayer
    }
}
