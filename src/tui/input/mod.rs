mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;

use super::app::{App, Mode};

use edit::{handle_edit, handle_input};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows the key that closes it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    app.status = None;
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input => handle_input(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterMode;
    use crate::tui::render::test_helpers::app_with;
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str<S: Storage>(app: &mut App<S>, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    fn texts<S: Storage>(app: &App<S>) -> Vec<String> {
        app.visible().iter().map(|item| item.text.clone()).collect()
    }

    #[test]
    fn add_todo_from_keyboard() {
        let mut app = app_with(&[]);
        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Input);
        // Command keys are plain text while typing
        type_str(&mut app, "Buy milk q");
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(texts(&app), vec!["Buy milk"]);
        assert_eq!(app.mode, Mode::Input);
        assert!(!app.should_quit);

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn navigate_toggle_and_delete() {
        let mut app = app_with(&["A", "B", "C"]);
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert!(app.todos.todos()[1].completed);

        handle_key(&mut app, press(KeyCode::Char('G')));
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(texts(&app), vec!["A", "B"]);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn filter_keys() {
        let mut app = app_with(&["A", "B"]);
        handle_key(&mut app, press(KeyCode::Char('x')));
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.filter, FilterMode::Active);
        assert_eq!(texts(&app), vec!["B"]);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.filter, FilterMode::Completed);
        assert_eq!(texts(&app), vec!["A"]);
        handle_key(&mut app, press(KeyCode::Char('c')));
        assert!(texts(&app).is_empty());
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(texts(&app), vec!["B"]);
    }

    #[test]
    fn edit_with_enter_and_cancel_with_esc() {
        let mut app = app_with(&["Buy milk"]);
        handle_key(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.mode, Mode::Edit);
        type_str(&mut app, "!!");
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(texts(&app), vec!["Buy milk"]);

        handle_key(&mut app, press(KeyCode::Char('e')));
        handle_key(&mut app, press(KeyCode::Home));
        type_str(&mut app, "Go ");
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(texts(&app), vec!["Go Buy milk"]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn clearing_edit_text_keeps_the_todo() {
        let mut app = app_with(&["Walk"]);
        handle_key(&mut app, press(KeyCode::Char('e')));
        for _ in 0..4 {
            handle_key(&mut app, press(KeyCode::Backspace));
        }
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(texts(&app), vec!["Walk"]);
        assert!(app.todos.edit_session().is_none());
    }

    #[test]
    fn help_swallows_keys() {
        let mut app = app_with(&["A"]);
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.todos.len(), 1);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn quit_keys() {
        let mut app = app_with(&[]);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = app_with(&[]);
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
