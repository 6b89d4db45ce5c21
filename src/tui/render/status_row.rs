use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;

    let line = if let Some(ref message) = app.status {
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(app.theme.danger).bg(bg),
        ))
    } else if app.config.ui.show_key_hints {
        Line::from(Span::styled(
            key_hints(app.mode),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::default()
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "a add  e edit  space toggle  d delete  c clear  1-3 filter  t theme  l language  ? help  q quit"
        }
        Mode::Input => "Enter add  Esc done",
        Mode::Edit => "Enter save  Esc cancel",
    }
}
