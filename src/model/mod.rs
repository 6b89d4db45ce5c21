pub mod config;
pub mod prefs;
pub mod todo;

pub use config::*;
pub use prefs::*;
pub use todo::*;
