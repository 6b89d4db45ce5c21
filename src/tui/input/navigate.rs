use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::Storage;
use crate::model::FilterMode;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // New todo
        KeyCode::Char('a') | KeyCode::Char('i') => app.mode = Mode::Input,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.jump_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.jump_to_bottom(),

        // Item actions
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('c') => app.clear_completed(),

        // Filters
        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Active),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),
        KeyCode::Tab => app.set_filter(app.filter.next()),

        // Preferences
        KeyCode::Char('t') => app.toggle_dark_mode(),
        KeyCode::Char('l') => app.toggle_language(),
        _ => {}
    }
}
