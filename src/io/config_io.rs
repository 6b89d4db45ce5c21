use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Directory name under the XDG data home
pub const APP_DIR_NAME: &str = "todo-app";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "TODO_APP_DIR";

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where todos and preferences live: `-d` flag, then `$TODO_APP_DIR`,
/// then `$XDG_DATA_HOME/todo-app`, then `~/.local/share/todo-app`.
pub fn resolve_data_dir(flag: Option<&str>) -> PathBuf {
    data_dir_from(
        flag,
        std::env::var(DATA_DIR_ENV).ok(),
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn data_dir_from(
    flag: Option<&str>,
    env_dir: Option<String>,
    xdg_data_home: Option<String>,
    home: Option<String>,
) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(dir);
    }
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = xdg_data_home.filter(|d| !d.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    let home = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("/"));
    home.join(".local").join("share").join(APP_DIR_NAME)
}

/// Read `config.toml` from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}
