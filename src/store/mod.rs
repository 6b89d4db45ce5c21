pub mod pref_store;
pub mod todo_store;

pub use pref_store::PreferenceStore;
pub use todo_store::{EditSession, TodoStore};
