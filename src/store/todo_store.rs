use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::io::recovery::{RecoveryCategory, RecoveryEntry};
use crate::io::storage::{Storage, StorageError};
use crate::model::todo::{FilterMode, TodoId, TodoItem, is_valid_text};

/// Storage key holding the JSON array of todos
pub const TODOS_KEY: &str = "todos";

/// The single todo whose text is being edited, with its uncommitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub editing_id: TodoId,
    pub edit_value: String,
}

/// Owns the todo list and the edit session.
///
/// Invalid input (blank text, unknown id) is a silent no-op. Every
/// mutation writes the whole list back to storage, whether or not anything
/// actually changed. A failed write is kept in [`TodoStore::last_write_error`]
/// and never undoes the in-memory change.
///
/// Another process may write the same storage (the CLI while the TUI is
/// open). Each mutation first re-reads the stored list and, if it changed
/// since this store last saw it, applies the mutation to the stored list.
pub struct TodoStore<S: Storage> {
    storage: S,
    todos: Vec<TodoItem>,
    edit: Option<EditSession>,
    /// Highest id issued or loaded so far
    last_id: Option<i64>,
    /// Raw `todos` value as last loaded or saved by this store
    synced: Option<String>,
    last_write_error: Option<StorageError>,
}

impl<S: Storage> TodoStore<S> {
    /// Load the persisted list. Absent or undecodable data gives an empty
    /// list; individual malformed todos are dropped and logged.
    pub fn load(storage: S) -> Self {
        let synced = read_todos(&storage);
        let todos = decode_todos(&storage, synced.as_deref());
        let last_id = todos.iter().map(|t| t.id.0).max();
        TodoStore {
            storage,
            todos,
            edit: None,
            last_id,
            synced,
            last_write_error: None,
        }
    }

    /// Pick up a list written by someone else since the last load or save.
    /// Returns true when the in-memory list was replaced.
    ///
    /// An edit session whose todo disappeared is closed. A read error keeps
    /// the in-memory list.
    pub fn refresh(&mut self) -> bool {
        let Ok(raw) = self.storage.get(TODOS_KEY) else {
            return false;
        };
        if raw == self.synced {
            return false;
        }

        self.todos = decode_todos(&self.storage, raw.as_deref());
        self.synced = raw;
        let loaded_max = self.todos.iter().map(|t| t.id.0).max();
        self.last_id = self.last_id.max(loaded_max);
        if self
            .edit
            .as_ref()
            .is_some_and(|e| !self.todos.iter().any(|t| t.id == e.editing_id))
        {
            self.edit = None;
        }
        true
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Error from the most recent write, cleared by the next successful one
    pub fn last_write_error(&self) -> Option<&StorageError> {
        self.last_write_error.as_ref()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new todo. Returns its id, or `None` for blank text.
    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        self.add_at(text, Utc::now())
    }

    /// [`TodoStore::add`] with an explicit creation time.
    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Option<TodoId> {
        if !is_valid_text(text) {
            return None;
        }
        self.refresh();
        let id = self.next_id(now);
        self.todos.push(TodoItem::new(id, text, now));
        self.persist();
        Some(id)
    }

    /// Epoch milliseconds, or one past the last id when the clock hasn't
    /// moved on (or went backwards). Once ids reach `i64::MAX` the first
    /// unused id from the clock onwards is taken instead.
    fn next_id(&mut self, now: DateTime<Utc>) -> TodoId {
        let millis = now.timestamp_millis();
        let id = match self.last_id {
            Some(last) => match last.checked_add(1) {
                Some(next) => millis.max(next),
                None => self.unused_id_from(millis),
            },
            None => millis,
        };
        self.last_id = self.last_id.max(Some(id));
        TodoId(id)
    }

    fn unused_id_from(&self, start: i64) -> i64 {
        let taken: HashSet<i64> = self.todos.iter().map(|t| t.id.0).collect();
        let mut id = start.max(0);
        while taken.contains(&id) {
            id = id.checked_add(1).unwrap_or(0);
        }
        id
    }

    pub fn toggle(&mut self, id: TodoId) {
        self.refresh();
        if let Some(item) = self.todos.iter_mut().find(|t| t.id == id) {
            item.completed = !item.completed;
        }
        self.persist();
    }

    /// Remove the todo with `id`, returning it. Deleted todos are copied
    /// to the recovery log.
    pub fn delete(&mut self, id: TodoId) -> Option<TodoItem> {
        self.refresh();
        let position = self.todos.iter().position(|t| t.id == id);
        let removed = position.map(|idx| self.todos.remove(idx));

        if let Some(item) = &removed {
            if self.edit.as_ref().is_some_and(|e| e.editing_id == id) {
                self.edit = None;
            }
            self.storage.log_recovery(RecoveryEntry::now(
                RecoveryCategory::Delete,
                format!("todo {} deleted", item.id),
                vec![("Todo".to_string(), item.id.to_string())],
                serde_json::to_string(item).unwrap_or_default(),
            ));
        }
        self.persist();
        removed
    }

    /// Remove every completed todo. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        self.refresh();
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        if self
            .edit
            .as_ref()
            .is_some_and(|e| !self.todos.iter().any(|t| t.id == e.editing_id))
        {
            self.edit = None;
        }
        self.persist();
        before - self.todos.len()
    }

    // -----------------------------------------------------------------------
    // Edit session
    // -----------------------------------------------------------------------

    /// Begin editing `id` with `current_text` as the working copy. Replaces
    /// any session already open, discarding its value.
    pub fn start_edit(&mut self, id: TodoId, current_text: &str) {
        self.edit = Some(EditSession {
            editing_id: id,
            edit_value: current_text.to_string(),
        });
    }

    /// Replace the working copy. Does nothing without an open session.
    pub fn set_edit_value(&mut self, value: impl Into<String>) {
        if let Some(session) = self.edit.as_mut() {
            session.edit_value = value.into();
        }
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.edit.as_ref().is_some_and(|e| e.editing_id == id)
    }

    /// Commit the working copy as the todo's text and close the session.
    ///
    /// A blank working copy closes the session like [`TodoStore::cancel_edit`].
    /// Returns true when a todo's text was replaced.
    pub fn save_edit(&mut self) -> bool {
        self.refresh();
        let Some(session) = self.edit.take() else {
            return false;
        };
        if !is_valid_text(&session.edit_value) {
            return false;
        }

        let mut committed = false;
        if let Some(item) = self.todos.iter_mut().find(|t| t.id == session.editing_id) {
            item.text = session.edit_value;
            committed = true;
        }
        self.persist();
        committed
    }

    /// Close the session without touching the list.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Todos matching `mode`, in list order.
    pub fn filtered_view(&self, mode: FilterMode) -> Vec<&TodoItem> {
        self.todos.iter().filter(|t| mode.matches(t)).collect()
    }

    /// Number of todos not yet completed.
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.todos) {
            Ok(json) => json,
            Err(e) => {
                self.last_write_error = Some(StorageError::Encode {
                    key: TODOS_KEY.to_string(),
                    source: e,
                });
                return;
            }
        };
        match self.storage.set(TODOS_KEY, &json) {
            Ok(()) => {
                self.synced = Some(json);
                self.last_write_error = None;
            }
            Err(e) => self.last_write_error = Some(e),
        }
    }
}

/// Raw `todos` value; a read error is logged and reads as absent.
fn read_todos<S: Storage>(storage: &S) -> Option<String> {
    match storage.get(TODOS_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            storage.log_recovery(RecoveryEntry::now(
                RecoveryCategory::Read,
                "todos could not be read",
                vec![
                    ("Key".to_string(), TODOS_KEY.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                "",
            ));
            None
        }
    }
}

fn decode_todos<S: Storage>(storage: &S, raw: Option<&str>) -> Vec<TodoItem> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            storage.log_recovery(RecoveryEntry::now(
                RecoveryCategory::Parser,
                "todos is not a JSON array, starting empty",
                vec![
                    ("Key".to_string(), TODOS_KEY.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                raw,
            ));
            return Vec::new();
        }
    };

    let mut todos = Vec::with_capacity(values.len());
    let mut dropped = Vec::new();
    for value in values {
        match serde_json::from_value::<TodoItem>(value.clone()) {
            Ok(item) if item.has_text() => todos.push(item),
            _ => dropped.push(value.to_string()),
        }
    }

    if !dropped.is_empty() {
        storage.log_recovery(RecoveryEntry::now(
            RecoveryCategory::Parser,
            format!("dropped {} malformed todo(s)", dropped.len()),
            vec![("Key".to_string(), TODOS_KEY.to_string())],
            dropped.join("\n"),
        ));
    }
    todos
}
