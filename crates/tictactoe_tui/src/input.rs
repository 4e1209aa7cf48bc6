//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves the cursor (a board index, 0-8) one cell in the arrow direction,
/// staying put at the grid edges.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let row = cursor / 3;
    let col = cursor % 3;

    let (row, col) = match key {
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        _ => (row, col),
    };

    row * 3 + col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(move_cursor(4, KeyCode::Left), 3);
        assert_eq!(move_cursor(4, KeyCode::Right), 5);
        assert_eq!(move_cursor(4, KeyCode::Up), 1);
        assert_eq!(move_cursor(4, KeyCode::Down), 7);
    }

    #[test]
    fn test_clamps_at_edges() {
        assert_eq!(move_cursor(0, KeyCode::Left), 0);
        assert_eq!(move_cursor(0, KeyCode::Up), 0);
        assert_eq!(move_cursor(8, KeyCode::Right), 8);
        assert_eq!(move_cursor(8, KeyCode::Down), 8);
    }

    #[test]
    fn test_ignores_other_keys() {
        assert_eq!(move_cursor(5, KeyCode::Enter), 5);
    }
}
