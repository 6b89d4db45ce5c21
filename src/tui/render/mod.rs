pub mod header;
pub mod help_overlay;
pub mod status_row;
pub mod todo_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

use crate::io::storage::Storage;
use crate::util::unicode::display_width;

use super::app::App;

/// Main render function: header, task panel, status row, then overlays
pub fn render<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (3 rows) | gap | task panel | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    todo_view::render_todo_view(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// One row with `left` flush left and `right` flush right, swapped for
/// right-to-left layouts. `right` is dropped when both don't fit.
pub(super) fn spread_line<'a>(
    left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    fill: Style,
    rtl: bool,
) -> Line<'a> {
    let (left, right) = if rtl { (right, left) } else { (left, right) };
    let used = spans_width(&left) + spans_width(&right);
    let mut spans = left;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), fill));
        spans.extend(right);
    }
    Line::from(spans)
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}
