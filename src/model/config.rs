use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key hint line at the bottom of the terminal UI
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides for the dark palette, by color name (e.g. `highlight = "#3B82F6"`)
    #[serde(default)]
    pub dark_colors: HashMap<String, String>,
    /// Hex overrides for the light palette
    #[serde(default)]
    pub light_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            dark_colors: HashMap::new(),
            light_colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
