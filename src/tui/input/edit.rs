use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::tui::app::{App, Mode};
use crate::tui::line_input::LineInput;

/// Typing into the "add a task" line
pub(super) fn handle_input<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.mode = Mode::Navigate,
        _ => {
            edit_line(&mut app.input, key);
        }
    }
}

/// Typing into the row being edited
pub(super) fn handle_edit<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {
            if edit_line(&mut app.edit_input, key) {
                app.sync_edit_value();
            }
        }
    }
}

/// Apply a line-editing key. Returns true when the text changed.
fn edit_line(line: &mut LineInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            line.insert(c);
            true
        }
        KeyCode::Backspace => {
            line.backspace();
            true
        }
        KeyCode::Delete => {
            line.delete();
            true
        }
        KeyCode::Left => {
            line.left();
            false
        }
        KeyCode::Right => {
            line.right();
            false
        }
        KeyCode::Home => {
            line.home();
            false
        }
        KeyCode::End => {
            line.end();
            false
        }
        _ => false,
    }
}
