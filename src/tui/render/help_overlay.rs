use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::storage::Storage;
use crate::tui::app::App;

const BINDINGS: &[(&str, &str)] = &[
    ("a / i", "Add a task"),
    ("Enter", "Add / save edit"),
    ("Esc", "Leave input / cancel edit"),
    ("\u{2191}\u{2193} / jk", "Move cursor"),
    ("g / G", "First / last task"),
    ("Space / x", "Toggle completed"),
    ("e", "Edit task"),
    ("d", "Delete task"),
    ("c", "Clear completed"),
    ("1 2 3 / Tab", "All / Active / Completed"),
    ("t", "Toggle dark mode"),
    ("l", "Switch language"),
    ("?", "Close this help"),
    ("q", "Quit"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.surface;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    for (key, desc) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<14}", key), key_style),
            Span::styled(*desc, desc_style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
