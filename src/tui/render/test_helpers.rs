use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::io::storage::MemoryStorage;
use crate::model::AppConfig;
use crate::store::{PreferenceStore, TodoStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Light-mode English app over in-memory storage, holding `texts` in order.
pub fn app_with(texts: &[&str]) -> App<MemoryStorage> {
    let storage = MemoryStorage::new();
    let mut todos = TodoStore::load(storage.clone());
    for text in texts {
        todos.add(text);
    }
    let prefs = PreferenceStore::load_with(storage, false);
    App::new(todos, prefs, AppConfig::default())
}

/// Render the whole app into an in-memory buffer and return plain text (no styles).
pub fn render_app(app: &mut App<MemoryStorage>, w: u16, h: u16) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| super::render(frame, app))
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}
