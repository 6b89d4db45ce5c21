use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::i18n::{self, Strings};
use crate::io::config_io::read_config;
use crate::io::storage::{FileStorage, Storage, StorageError};
use crate::model::{AppConfig, FilterMode, TodoId, TodoItem};
use crate::store::{PreferenceStore, TodoStore};

use super::input;
use super::line_input::LineInput;
use super::render;
use super::theme::Theme;

/// What keystrokes currently drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing a new todo
    Input,
    /// Editing the text of an existing todo
    Edit,
}

pub struct App<S: Storage> {
    pub todos: TodoStore<S>,
    pub prefs: PreferenceStore<S>,
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub filter: FilterMode,
    /// Index into the filtered view
    pub cursor: usize,
    /// First visible row of the list, kept in range by the renderer
    pub scroll_offset: usize,
    /// The "add a task" line
    pub input: LineInput,
    /// Buffer mirrored into the store's edit session
    pub edit_input: LineInput,
    pub show_help: bool,
    pub should_quit: bool,
    /// Transient message for the status row
    pub status: Option<String>,
}

impl<S: Storage> App<S> {
    pub fn new(todos: TodoStore<S>, prefs: PreferenceStore<S>, config: AppConfig) -> Self {
        let theme = Theme::for_mode(&config.ui, prefs.dark_mode());
        App {
            todos,
            prefs,
            config,
            theme,
            mode: Mode::Navigate,
            filter: FilterMode::All,
            cursor: 0,
            scroll_offset: 0,
            input: LineInput::default(),
            edit_input: LineInput::default(),
            show_help: false,
            should_quit: false,
            status: None,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        i18n::strings(self.prefs.language())
    }

    pub fn is_rtl(&self) -> bool {
        self.prefs.language().is_rtl()
    }

    pub fn visible(&self) -> Vec<&TodoItem> {
        self.todos.filtered_view(self.filter)
    }

    pub fn selected(&self) -> Option<&TodoItem> {
        self.visible().get(self.cursor).copied()
    }

    fn selected_id(&self) -> Option<TodoId> {
        self.selected().map(|item| item.id)
    }

    /// Keep the cursor on a row after the view shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn jump_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.cursor = self.visible().len().saturating_sub(1);
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter != mode {
            self.filter = mode;
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    // -----------------------------------------------------------------------
    // List actions
    // -----------------------------------------------------------------------

    /// Add the input line as a new todo; the line is kept when it is blank
    pub fn submit_input(&mut self) {
        if let Some(id) = self.todos.add(self.input.value()) {
            self.input.clear();
            if let Some(pos) = self.visible().iter().position(|item| item.id == id) {
                self.cursor = pos;
            }
        }
        self.note_todo_write();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.todos.toggle(id);
            self.clamp_cursor();
            self.note_todo_write();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.todos.delete(id);
            self.clamp_cursor();
            self.note_todo_write();
        }
    }

    pub fn clear_completed(&mut self) {
        if self.todos.clear_completed() > 0 {
            self.clamp_cursor();
        }
        self.note_todo_write();
    }

    /// Pick up todos changed by another process. An open edit whose todo
    /// was deleted there is dropped.
    pub fn refresh_from_disk(&mut self) {
        if !self.todos.refresh() {
            return;
        }
        if self.mode == Mode::Edit && self.todos.edit_session().is_none() {
            self.edit_input.clear();
            self.mode = Mode::Navigate;
        }
        self.clamp_cursor();
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Open the selected todo for editing. Completed todos stay read-only.
    pub fn begin_edit(&mut self) {
        let Some(item) = self.selected() else {
            return;
        };
        if item.completed {
            return;
        }
        let (id, text) = (item.id, item.text.clone());
        self.todos.start_edit(id, &text);
        self.edit_input = LineInput::with_text(&text);
        self.mode = Mode::Edit;
    }

    /// Push the edit buffer into the store after each keystroke
    pub fn sync_edit_value(&mut self) {
        self.todos.set_edit_value(self.edit_input.value());
    }

    pub fn commit_edit(&mut self) {
        self.sync_edit_value();
        if self.todos.save_edit() {
            self.note_todo_write();
        }
        self.leave_edit();
    }

    pub fn cancel_edit(&mut self) {
        self.todos.cancel_edit();
        self.leave_edit();
    }

    fn leave_edit(&mut self) {
        self.edit_input.clear();
        self.mode = Mode::Navigate;
        self.clamp_cursor();
    }

    // -----------------------------------------------------------------------
    // Preferences
    // -----------------------------------------------------------------------

    pub fn toggle_dark_mode(&mut self) {
        let dark = self.prefs.toggle_dark_mode();
        self.theme = Theme::for_mode(&self.config.ui, dark);
        self.note_write("theme", self.prefs.last_write_error().map(ToString::to_string));
    }

    pub fn toggle_language(&mut self) {
        self.prefs.toggle_language();
        self.note_write("language", self.prefs.last_write_error().map(ToString::to_string));
    }

    fn note_todo_write(&mut self) {
        let error = self.todos.last_write_error().map(StorageError::to_string);
        self.note_write("todos", error);
    }

    fn note_write(&mut self, what: &str, error: Option<String>) {
        self.status = error.map(|e| format!("could not save {}: {}", what, e));
    }
}

pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let storage = FileStorage::open(data_dir)?;
    let todos = TodoStore::load(storage.clone());
    let prefs = PreferenceStore::load(storage);

    let mut app = App::new(todos, prefs, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal if anything panics mid-frame
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            app.refresh_from_disk();
        } else if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
