use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::App;

use super::spread_line;

/// Language button and theme indicator, then the page title and subtitle
pub fn render_header<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let strings = app.strings();
    let dark = app.prefs.dark_mode();
    let fill = Style::default().bg(bg);

    let button = vec![Span::styled(
        format!(" {} ", strings.translate_button),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];
    let icon = if dark { "\u{263E}" } else { "\u{2600}" }; // ☾ / ☀
    let indicator = vec![Span::styled(
        format!("{} {} ", icon, strings.theme_label(dark)),
        Style::default().fg(app.theme.accent).bg(bg),
    )];

    let lines = vec![
        spread_line(button, indicator, area.width as usize, fill, app.is_rtl()),
        Line::from(Span::styled(
            strings.title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            strings.subtitle,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .alignment(Alignment::Center),
    ];

    frame.render_widget(Paragraph::new(lines).style(fill), area);
}
