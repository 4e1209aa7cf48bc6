//! Stateless rendering of the app state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;
use tictactoe_core::{Cell, GameResult, Mark, Mode, Session, HUMAN_MARK};

use crate::app::App;

/// Draws the whole screen: title, board, mode selector, status, help.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(11),    // Board
            Constraint::Length(1),  // Mode selector
            Constraint::Length(3),  // Status
            Constraint::Length(1),  // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);
    draw_mode_line(frame, chunks[2], app.session());

    let status = Paragraph::new(status_line(app.session()))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("arrows move | enter/1-9 play | m mode | r restart | q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Status text per the session state: the winner or draw when terminal,
/// otherwise whose turn it is, with "You"/"Computer" labels against the
/// machine and "Player X"/"Player O" between humans.
fn status_line(session: &Session) -> String {
    match session.result() {
        GameResult::Winner(mark) => format!("Winner: {mark}"),
        GameResult::Draw => "It's a Draw!".to_string(),
        GameResult::InProgress => match (session.mode(), session.to_move()) {
            (Mode::SinglePlayer, mark) if mark == HUMAN_MARK => "Turn: You".to_string(),
            (Mode::SinglePlayer, _) => "Turn: Computer".to_string(),
            (Mode::TwoPlayer, mark) => format!("Turn: Player {mark}"),
        },
    }
}

fn draw_mode_line(frame: &mut Frame, area: Rect, session: &Session) {
    let enabled = session.mode_switch_allowed();
    let mut spans = vec![Span::raw("Mode: ")];
    for mode in Mode::iter() {
        let selected = mode == session.mode();
        let style = match (selected, enabled) {
            (true, _) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::Gray),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let marker = if selected { "> " } else { "  " };
        spans.push(Span::styled(format!("{marker}{}", mode.name()), style));
        spans.push(Span::raw("   "));
    }
    let line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(line, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(frame, rows[0], app, 0);
    draw_separator(frame, rows[1]);
    draw_row(frame, rows[2], app, 3);
    draw_separator(frame, rows[3]);
    draw_row(frame, rows[4], app, 6);
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, start: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], app, start);
    draw_vertical_sep(frame, cols[1]);
    draw_cell(frame, cols[2], app, start + 1);
    draw_vertical_sep(frame, cols[3]);
    draw_cell(frame, cols[4], app, start + 2);
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, idx: usize) {
    let session = app.session();
    let cell = session.board().get(idx).unwrap_or(Cell::Empty);

    let (symbol, base_style) = match cell {
        Cell::Empty => (
            format!(" {} ", idx + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Taken(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Taken(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    // Cursor highlight only where a move could land.
    let activatable = session.is_active() && session.board().is_empty_at(idx);
    let style = if idx == app.cursor() && activatable {
        base_style.bg(Color::White).fg(Color::Black)
    } else if idx == app.cursor() {
        base_style.bg(Color::DarkGray).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_vertical_sep(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(vert[1])[1]
}
