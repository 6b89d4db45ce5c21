use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::storage::Storage;
use crate::model::{FilterMode, TodoItem};
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::spread_line;

/// The task panel: heading, input line, list, and footer
pub fn render_todo_view<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let theme = &app.theme;
    let strings = app.strings();
    let title_align = if app.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.surface))
        .title(Span::styled(
            format!(" {} ", strings.tasks_heading),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.surface)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(title_align)
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The footer only appears once there is something to count
    let footer_height = if app.todos.is_empty() { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // input line
            Constraint::Length(1), // gap
            Constraint::Min(0),    // list
            Constraint::Length(footer_height),
        ])
        .split(inner);

    render_input_line(frame, app, chunks[0]);
    render_list(frame, app, chunks[2]);
    if footer_height > 0 {
        render_footer(frame, app, chunks[3]);
    }
}

fn render_input_line<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let strings = app.strings();
    let bg = theme.surface;
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    let placeholder_style = Style::default()
        .fg(theme.dim)
        .bg(bg)
        .add_modifier(Modifier::ITALIC);
    let cursor_style = Style::default().fg(theme.highlight).bg(bg);

    let mut left = vec![Span::styled(
        "+ ",
        Style::default().fg(theme.highlight).bg(bg),
    )];
    if app.mode == Mode::Input {
        let (before, after) = app.input.split();
        left.push(Span::styled(before, text_style));
        left.push(Span::styled("\u{258C}", cursor_style)); // ▌ cursor
        if app.input.is_empty() {
            left.push(Span::styled(strings.input_placeholder, placeholder_style));
        } else {
            left.push(Span::styled(after, text_style));
        }
    } else if app.input.is_empty() {
        left.push(Span::styled(strings.input_placeholder, placeholder_style));
    } else {
        left.push(Span::styled(app.input.value(), text_style));
    }

    let button = vec![Span::styled(
        format!(" {} ", strings.add_button),
        Style::default()
            .fg(theme.surface)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];

    let fill = Style::default().bg(bg);
    let line = spread_line(left, button, area.width as usize, fill, app.is_rtl());
    frame.render_widget(Paragraph::new(line).style(fill), area);
}

fn render_list<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    // Keep the cursor row on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let app = &*app;
    let fill = Style::default().bg(app.theme.surface);
    let visible = app.visible();

    if visible.is_empty() {
        let message = Line::from(Span::styled(
            app.strings().empty_message(app.filter),
            Style::default()
                .fg(app.theme.dim)
                .bg(app.theme.surface)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(
            Paragraph::new(vec![Line::default(), message]).style(fill),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, item)| {
            let selected = i == app.cursor && app.mode != Mode::Input;
            todo_line(app, item, selected, width)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(fill), area);
}

fn todo_line<'a, S: Storage>(
    app: &'a App<S>,
    item: &'a TodoItem,
    selected: bool,
    width: usize,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.surface
    };
    let fill = Style::default().bg(bg);

    let (mark, mark_color) = if item.completed {
        ("[x]", theme.done)
    } else {
        ("[ ]", theme.highlight)
    };
    let mark = Span::styled(mark, Style::default().fg(mark_color).bg(bg));

    let mut text = Vec::new();
    if app.todos.is_editing(item.id) {
        let style = Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::UNDERLINED);
        let (before, after) = app.edit_input.split();
        text.push(Span::styled(before, style));
        text.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
        text.push(Span::styled(after, style));
    } else {
        let style = if item.completed {
            Style::default()
                .fg(theme.done)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        // Room left after the margins and the checkbox
        let room = width.saturating_sub(6);
        text.push(Span::styled(truncate_to_width(&item.text, room), style));
    }

    let mut spans = Vec::new();
    if app.is_rtl() {
        spans.extend(text);
        spans.push(Span::styled(" ", fill));
        spans.push(mark);
        spans.push(Span::styled(" ", fill));
    } else {
        spans.push(Span::styled(" ", fill));
        spans.push(mark);
        spans.push(Span::styled(" ", fill));
        spans.extend(text);
    }
    spread_line(spans, Vec::new(), width, fill, app.is_rtl())
}

fn render_footer<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let strings = app.strings();
    let bg = theme.surface;
    let dim = Style::default().fg(theme.dim).bg(bg);

    let left = vec![Span::styled(
        format!(" {}", strings.items_left(app.todos.active_count())),
        dim,
    )];

    let mut right = Vec::new();
    for mode in FilterMode::ALL {
        let label = format!(" {} ", strings.filter_label(mode));
        let style = if mode == app.filter {
            Style::default()
                .fg(theme.surface)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            dim
        };
        right.push(Span::styled(label, style));
    }
    let clear_style = if app.todos.completed_count() > 0 {
        Style::default().fg(theme.danger).bg(bg)
    } else {
        dim
    };
    right.push(Span::styled("  ", dim));
    right.push(Span::styled(format!("{} ", strings.clear_completed), clear_style));

    let fill = Style::default().bg(bg);
    let line = spread_line(left, right, area.width as usize, fill, app.is_rtl());
    frame.render_widget(Paragraph::new(line).style(fill), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with, render_app};

    #[test]
    fn empty_list_shows_placeholder_and_no_footer() {
        let mut app = app_with(&[]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Tasks"));
        assert!(out.contains("What needs to be done?"));
        assert!(out.contains("No tasks yet. Add one above!"));
        assert!(!out.contains("items left"));
        assert!(!out.contains("Clear completed"));
    }

    #[test]
    fn list_rows_and_footer() {
        let mut app = app_with(&["Buy milk", "Walk dog"]);
        app.toggle_selected();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("[x] Buy milk"));
        assert!(out.contains("[ ] Walk dog"));
        assert!(out.contains("1 item left"));
        assert!(out.contains(" All  Active  Completed"));
        assert!(out.contains("Clear completed"));
    }

    #[test]
    fn filter_empty_messages() {
        let mut app = app_with(&["Buy milk"]);
        app.set_filter(FilterMode::Completed);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("No completed tasks!"));
        // The footer stays while the list itself has todos
        assert!(out.contains("1 item left"));

        app.toggle_selected();
        app.set_filter(FilterMode::Active);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("No active tasks!"));
    }

    #[test]
    fn edit_row_shows_buffer_with_cursor() {
        let mut app = app_with(&["Buy milk"]);
        app.begin_edit();
        app.edit_input.insert('!');
        app.sync_edit_value();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("[ ] Buy milk!\u{258C}"));
    }

    #[test]
    fn typing_shows_input_cursor() {
        let mut app = app_with(&[]);
        app.mode = Mode::Input;
        app.input.insert('B');
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("+ B\u{258C}"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let texts: Vec<String> = (1..=40).map(|i| format!("Task {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut app = app_with(&refs);
        app.jump_to_bottom();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Task 40"));
        assert!(!out.lines().any(|line| line.contains("] Task 1 ")));
        assert!(app.scroll_offset > 0);
    }

    #[test]
    fn arabic_is_right_aligned() {
        let mut app = app_with(&["Buy milk"]);
        app.toggle_language();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("المهام"));
        assert!(out.contains("1 مهمة متبقية"));
        let row = out
            .lines()
            .find(|line| line.contains("Buy milk"))
            .unwrap_or_default();
        // Checkbox follows the text on the right edge
        assert!(row.trim_end().trim_end_matches('│').trim_end().ends_with("[ ]"));
    }
}
