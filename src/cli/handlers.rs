use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::i18n::ENGLISH;
use crate::io::config_io;
use crate::io::recovery;
use crate::io::storage::{FileStorage, StorageError};
use crate::model::prefs::Language;
use crate::model::todo::{FilterMode, TodoId, TodoItem, is_valid_text};
use crate::store::{PreferenceStore, TodoStore};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        None => crate::tui::run(&data_dir),
        Some(cmd) => match cmd {
            // Todo list
            Commands::Add(args) => cmd_add(&data_dir, args, json),
            Commands::List(args) => cmd_list(&data_dir, args, json),
            Commands::Toggle(args) => cmd_toggle(&data_dir, args, json),
            Commands::Edit(args) => cmd_edit(&data_dir, args, json),
            Commands::Delete(args) => cmd_delete(&data_dir, args, json),
            Commands::Clear => cmd_clear(&data_dir, json),
            Commands::Count => cmd_count(&data_dir, json),

            // Preferences
            Commands::Theme(args) => cmd_theme(&data_dir, args, json),
            Commands::Lang(args) => cmd_lang(&data_dir, args, json),

            // Maintenance
            Commands::Recovery(args) => cmd_recovery(&data_dir, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_todos(data_dir: &Path) -> Result<TodoStore<FileStorage>, StorageError> {
    Ok(TodoStore::load(FileStorage::open(data_dir)?))
}

fn open_prefs(data_dir: &Path) -> Result<PreferenceStore<FileStorage>, StorageError> {
    Ok(PreferenceStore::load(FileStorage::open(data_dir)?))
}

fn parse_id(raw: &str) -> Result<TodoId, String> {
    raw.parse().map_err(|_| format!("invalid todo id: {}", raw))
}

/// Look up a todo that the command is about to change.
fn existing<'a>(store: &'a TodoStore<FileStorage>, raw_id: &str) -> Result<&'a TodoItem, String> {
    let id = parse_id(raw_id)?;
    store.get(id).ok_or_else(|| format!("todo not found: {}", id))
}

/// The change is kept in memory either way; tell the user it didn't reach disk.
fn warn_unsaved(what: &str, error: Option<&StorageError>) {
    if let Some(e) = error {
        eprintln!(
            "warning: could not save {}: {} (see `todo recovery`)",
            what, e
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_todo(item: &TodoItem, json: bool) -> CmdResult {
    if json {
        print_json(item)
    } else {
        println!("{}", format_todo_line(item));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Todo commands
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    if !is_valid_text(&text) {
        return Err("todo text cannot be empty".into());
    }

    let mut store = open_todos(data_dir)?;
    let id = store.add(&text).ok_or("todo text cannot be empty")?;
    warn_unsaved("todos", store.last_write_error());

    if json {
        print_json(&AddedJson { id: id.0 })
    } else {
        println!("{}", id);
        Ok(())
    }
}

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CmdResult {
    let mode = match args.filter {
        Some(ref f) => f.parse::<FilterMode>()?,
        None => FilterMode::All,
    };

    let store = open_todos(data_dir)?;
    let view = store.filtered_view(mode);
    if json {
        return print_json(&view);
    }
    for line in format_todo_list(&view, mode, store.active_count(), &ENGLISH) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_toggle(data_dir: &Path, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_todos(data_dir)?;
    let id = existing(&store, &args.id)?.id;

    store.toggle(id);
    warn_unsaved("todos", store.last_write_error());

    let item = store.get(id).ok_or_else(|| format!("todo not found: {}", id))?;
    print_todo(item, json)
}

fn cmd_edit(data_dir: &Path, args: EditArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    let mut store = open_todos(data_dir)?;
    let item = existing(&store, &args.id)?;
    if item.completed {
        return Err(format!("cannot edit completed todo: {}", item.id).into());
    }
    if !is_valid_text(&text) {
        return Err("todo text cannot be empty".into());
    }

    let id = item.id;
    let current = item.text.clone();
    store.start_edit(id, &current);
    store.set_edit_value(text);
    store.save_edit();
    warn_unsaved("todos", store.last_write_error());

    let item = store.get(id).ok_or_else(|| format!("todo not found: {}", id))?;
    print_todo(item, json)
}

fn cmd_delete(data_dir: &Path, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_todos(data_dir)?;
    let id = existing(&store, &args.id)?.id;

    let removed = store
        .delete(id)
        .ok_or_else(|| format!("todo not found: {}", id))?;
    warn_unsaved("todos", store.last_write_error());

    if json {
        print_json(&removed)
    } else {
        println!("deleted {}", removed.id);
        Ok(())
    }
}

fn cmd_clear(data_dir: &Path, json: bool) -> CmdResult {
    let mut store = open_todos(data_dir)?;
    let removed = store.clear_completed();
    warn_unsaved("todos", store.last_write_error());

    if json {
        print_json(&serde_json::json!({ "removed": removed }))
    } else {
        println!("removed {} completed todo(s)", removed);
        Ok(())
    }
}

fn cmd_count(data_dir: &Path, json: bool) -> CmdResult {
    let store = open_todos(data_dir)?;
    let active = store.active_count();
    if json {
        print_json(&CountJson {
            active,
            completed: store.completed_count(),
            total: store.len(),
        })
    } else {
        println!("{}", ENGLISH.items_left(active));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preference commands
// ---------------------------------------------------------------------------

fn print_preferences<S: crate::io::storage::Storage>(prefs: &PreferenceStore<S>, json: bool) -> CmdResult {
    if json {
        return print_json(&preferences_to_json(prefs.preferences()));
    }
    for line in format_preferences(prefs.preferences()) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_theme(data_dir: &Path, args: ThemeArgs, json: bool) -> CmdResult {
    let mut prefs = open_prefs(data_dir)?;
    match args.value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => {}
        Some("dark") => prefs.set_dark_mode(true),
        Some("light") => prefs.set_dark_mode(false),
        Some("toggle") => {
            prefs.toggle_dark_mode();
        }
        Some("system") => prefs.follow_system_theme(),
        Some(other) => {
            return Err(format!(
                "invalid theme: {} (expected dark, light, toggle or system)",
                other
            )
            .into());
        }
    }
    warn_unsaved("theme", prefs.last_write_error());
    print_preferences(&prefs, json)
}

fn cmd_lang(data_dir: &Path, args: LangArgs, json: bool) -> CmdResult {
    let mut prefs = open_prefs(data_dir)?;
    match args.value.as_deref() {
        None => {}
        Some(v) if v.eq_ignore_ascii_case("toggle") => {
            prefs.toggle_language();
        }
        Some(v) => prefs.set_language(v.parse::<Language>()?),
    }
    warn_unsaved("language", prefs.last_write_error());
    print_preferences(&prefs, json)
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn cmd_recovery(data_dir: &Path, args: RecoveryArgs, json: bool) -> CmdResult {
    if args.prune {
        let removed = recovery::prune_recovery(data_dir, None, args.all)?;
        if json {
            return print_json(&serde_json::json!({ "pruned": removed }));
        }
        println!("pruned {} recovery entr{}", removed, if removed == 1 { "y" } else { "ies" });
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(data_dir, args.limit);
    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        return print_json(&values);
    }
    if entries.is_empty() {
        println!("no recovery entries");
        return Ok(());
    }
    for entry in &entries {
        print!("{}", format_recovery_entry(entry));
    }
    Ok(())
}
