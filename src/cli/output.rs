use serde::Serialize;

use crate::i18n::Strings;
use crate::io::recovery::RecoveryEntry;
use crate::model::prefs::Preferences;
use crate::model::todo::{FilterMode, TodoItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AddedJson {
    pub id: i64,
}

#[derive(Serialize)]
pub struct CountJson {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesJson {
    pub dark_mode: bool,
    pub is_arabic: bool,
    pub language: String,
}

pub fn preferences_to_json(prefs: Preferences) -> PreferencesJson {
    PreferencesJson {
        dark_mode: prefs.dark_mode,
        is_arabic: prefs.language.is_arabic(),
        language: prefs.language.code().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] <id> <text>` / `[ ] <id> <text>`
pub fn format_todo_line(item: &TodoItem) -> String {
    let mark = if item.completed { 'x' } else { ' ' };
    format!("[{}] {} {}", mark, item.id, item.text)
}

/// The filtered view followed by the active count; the filter's empty
/// message when nothing matches.
pub fn format_todo_list(
    items: &[&TodoItem],
    mode: FilterMode,
    active_count: usize,
    strings: &Strings,
) -> Vec<String> {
    if items.is_empty() {
        return vec![strings.empty_message(mode).to_string()];
    }
    let mut lines: Vec<String> = items.iter().map(|item| format_todo_line(item)).collect();
    lines.push(String::new());
    lines.push(strings.items_left(active_count));
    lines
}

pub fn format_preferences(prefs: Preferences) -> Vec<String> {
    vec![
        format!("theme: {}", if prefs.dark_mode { "dark" } else { "light" }),
        format!("language: {}", prefs.language.code()),
    ]
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> String {
    entry.to_markdown()
}
