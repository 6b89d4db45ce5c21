pub mod cli;
pub mod i18n;
pub mod io;
pub mod model;
pub mod store;
pub mod tui;
pub mod util;
