//! Stateless game rules: terminal detection and the computer opponent.
//!
//! Every function here is a pure function of its inputs. The computer's
//! move selection takes the randomness source as a parameter so callers
//! that need reproducibility can pass a seeded generator.

use crate::types::{Board, Cell, GameResult, Mark};
use rand::Rng;
use tracing::instrument;

/// The eight winning triples, checked in fixed order: rows, columns,
/// diagonals. The order is load-bearing: a board constructed with two
/// simultaneous lines resolves to the first matching triple.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

const CORNERS: [usize; 4] = [0, 2, 6, 8];
const CENTER: usize = 4;

/// Evaluates a board to its result.
///
/// Returns `Winner` for the first triple whose three cells share one mark,
/// `Draw` on a full board with no such triple, `InProgress` otherwise.
#[instrument]
pub fn evaluate(board: &Board) -> GameResult {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Some(Cell::Taken(mark)) = cell {
            if cell == board.get(b) && cell == board.get(c) {
                return GameResult::Winner(mark);
            }
        }
    }

    if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}

/// Empty cell indices in ascending order.
pub fn available_moves(board: &Board) -> Vec<usize> {
    (0..9).filter(|&idx| board.is_empty_at(idx)).collect()
}

/// Picks the computer's move, or `None` on a full board.
///
/// Fixed priority, first rule that applies wins:
/// 1. complete the computer's own line;
/// 2. block the opponent's line;
/// 3. take the center;
/// 4. take a random empty corner;
/// 5. take any random empty cell.
///
/// Rules 1-2 scan available indices in ascending order, so they are
/// deterministic for a given board. Rules 4-5 draw from `rng`.
#[instrument(skip(rng))]
pub fn select_computer_move(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut impl Rng,
) -> Option<usize> {
    let open = available_moves(board);
    if open.is_empty() {
        return None;
    }

    // One-ply lookahead: win now if possible, otherwise deny the opponent.
    if let Some(idx) = winning_move(board, computer, &open) {
        return Some(idx);
    }
    if let Some(idx) = winning_move(board, opponent, &open) {
        return Some(idx);
    }

    if board.is_empty_at(CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&idx| board.is_empty_at(idx))
        .collect();
    if !corners.is_empty() {
        return Some(corners[rng.random_range(0..corners.len())]);
    }

    Some(open[rng.random_range(0..open.len())])
}

/// Returns the lowest open index that would complete a line for `mark`.
fn winning_move(board: &Board, mark: Mark, open: &[usize]) -> Option<usize> {
    open.iter().copied().find(|&idx| {
        let mut probe = *board;
        probe.set(idx, Cell::Taken(mark));
        evaluate(&probe) == GameResult::Winner(mark)
    })
}
