//! Application state and key handling.

use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tictactoe_core::{Mode, MoveOutcome, PlannedMove, Session};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::input;

/// How long the computer "thinks" before its move lands. Purely cosmetic:
/// it lets the human see their own mark appear first.
pub const COMPUTER_DELAY: Duration = Duration::from_millis(500);

/// Main application state: the session plus presentation-only bits.
pub struct App {
    session: Session,
    cursor: usize,
    rng: StdRng,
}

impl App {
    /// Creates the app with a fresh single-player session.
    pub fn new() -> Self {
        Self {
            session: Session::new(Mode::default()),
            cursor: 4,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Returns the live session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the cursor position (board index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handles one key press. Deferred computer replies are sent through
    /// `reply_tx` after [`COMPUTER_DELAY`].
    pub fn handle_key(&mut self, key: KeyCode, reply_tx: &mpsc::UnboundedSender<PlannedMove>) {
        match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = input::move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.play(self.cursor, reply_tx);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // Digit entry: keys 1-9 map to cells 0-8.
                if let Some(digit) = c.to_digit(10) {
                    if (1..=9).contains(&digit) {
                        self.play(digit as usize - 1, reply_tx);
                    }
                }
            }
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char('r') => {
                info!("restart requested");
                self.session.start_or_reset(self.session.mode());
            }
            _ => {}
        }
    }

    /// Applies a deferred computer reply. The session re-validates the
    /// plan, so a reply raced by a reset or mode change is a no-op.
    pub fn complete_computer_reply(&mut self, planned: PlannedMove) {
        let applied = self.session.apply_planned(planned);
        debug!(index = planned.index(), applied, "computer reply arrived");
    }

    fn play(&mut self, idx: usize, reply_tx: &mpsc::UnboundedSender<PlannedMove>) {
        match self.session.request_move(idx) {
            MoveOutcome::Applied {
                computer_reply_due: true,
                ..
            } => {
                if let Some(planned) = self.session.plan_computer_reply(&mut self.rng) {
                    let tx = reply_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(COMPUTER_DELAY).await;
                        let _ = tx.send(planned);
                    });
                }
            }
            MoveOutcome::Applied { .. } => {}
            MoveOutcome::Rejected(reason) => {
                // Input from a disabled control; expected and harmless.
                debug!(idx, %reason, "move ignored");
            }
        }
    }

    /// Switches between the two modes, resetting the session. Gated on the
    /// session's own query so a game in progress is never abandoned.
    fn toggle_mode(&mut self) {
        if !self.session.mode_switch_allowed() {
            debug!("mode switch ignored mid-game");
            return;
        }
        let next = match self.session.mode() {
            Mode::SinglePlayer => Mode::TwoPlayer,
            Mode::TwoPlayer => Mode::SinglePlayer,
        };
        info!(?next, "switching mode");
        self.session.start_or_reset(next);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{GameResult, Mark};

    fn channel() -> (
        mpsc::UnboundedSender<PlannedMove>,
        mpsc::UnboundedReceiver<PlannedMove>,
    ) {
        mpsc::unbounded_channel()
    }

    #[tokio::test]
    async fn test_digit_key_plays_cell() {
        let (tx, _rx) = channel();
        let mut app = App::new();
        app.handle_key(KeyCode::Char('5'), &tx);
        assert!(!app.session().board().is_empty_at(4));
    }

    #[tokio::test]
    async fn test_enter_plays_cursor_cell() {
        let (tx, _rx) = channel();
        let mut app = App::new();
        app.handle_key(KeyCode::Right, &tx);
        app.handle_key(KeyCode::Enter, &tx);
        assert!(!app.session().board().is_empty_at(5));
    }

    #[tokio::test]
    async fn test_mode_toggle_blocked_mid_game() {
        let (tx, _rx) = channel();
        let mut app = App::new();
        app.handle_key(KeyCode::Char('m'), &tx);
        assert_eq!(app.session().mode(), Mode::TwoPlayer);

        app.handle_key(KeyCode::Char('1'), &tx);
        app.handle_key(KeyCode::Char('m'), &tx);
        assert_eq!(app.session().mode(), Mode::TwoPlayer);
    }

    #[tokio::test]
    async fn test_deferred_reply_lands() {
        let (tx, mut rx) = channel();
        let mut app = App::new();
        app.handle_key(KeyCode::Char('5'), &tx);
        assert_eq!(app.session().to_move(), Mark::O);

        let planned = rx.recv().await.expect("computer reply scheduled");
        app.complete_computer_reply(planned);

        assert_eq!(app.session().to_move(), Mark::X);
        assert_eq!(app.session().result(), GameResult::InProgress);
    }

    #[tokio::test]
    async fn test_restart_invalidates_deferred_reply() {
        let (tx, mut rx) = channel();
        let mut app = App::new();
        app.handle_key(KeyCode::Char('5'), &tx);

        let planned = rx.recv().await.expect("computer reply scheduled");
        app.handle_key(KeyCode::Char('r'), &tx);
        app.complete_computer_reply(planned);

        assert!(app.session().board().is_blank());
        assert_eq!(app.session().to_move(), Mark::X);
    }
}
