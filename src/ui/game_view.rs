use crate::game::{Coord, GridEngine};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

pub fn render(
    frame: &mut Frame,
    engine: &GridEngine,
    show_open_cells: bool,
    last_spawn: Option<Coord>,
    message: &Option<String>,
    game_over: bool,
) {
    let board_height = (engine.board().rows() * 2 + 1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(board_height + 2), // Board
            Constraint::Length(3),             // Message
            Constraint::Length(3),             // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, game_over, chunks[0]);
    render_board(frame, engine, show_open_cells, last_spawn, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(
    frame: &mut Frame,
    engine: &GridEngine,
    game_over: bool,
    area: ratatui::layout::Rect,
) {
    let status = format!(
        "Score: {}  |  Best tile: {}{}",
        engine.score(),
        engine.highest_tile(),
        if game_over { "  |  Game Over" } else { "" }
    );
    let color = if game_over { Color::Red } else { Color::Yellow };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("2048"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    engine: &GridEngine,
    show_open_cells: bool,
    last_spawn: Option<Coord>,
    area: ratatui::layout::Rect,
) {
    let open = show_open_cells.then(|| engine.open_cells());
    let mut lines = vec![Line::from("")];
    lines.extend(board_widget::board_lines(engine.board(), open, last_spawn));

    let title = if show_open_cells {
        format!("Board ({} open)", engine.open_cells().len())
    } else {
        "Board".to_string()
    };

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let controls = Paragraph::new("←↑↓→/WASD: Move  |  O: Open cells  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
