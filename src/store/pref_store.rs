use crate::io::storage::{Storage, StorageError};
use crate::model::prefs::{Language, Preferences};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const IS_ARABIC_KEY: &str = "isArabic";

/// Dark-mode and language flags, each saved as a JSON boolean on change.
///
/// Without a saved value, dark mode follows the terminal's own background
/// and the language is English.
pub struct PreferenceStore<S: Storage> {
    storage: S,
    prefs: Preferences,
    system_dark: bool,
    last_write_error: Option<StorageError>,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn load(storage: S) -> Self {
        Self::load_with(storage, system_prefers_dark())
    }

    /// Load with an explicit ambient dark-mode signal
    pub fn load_with(storage: S, system_dark: bool) -> Self {
        let dark_mode = read_flag(&storage, DARK_MODE_KEY).unwrap_or(system_dark);
        let language = read_flag(&storage, IS_ARABIC_KEY)
            .map(Language::from_is_arabic)
            .unwrap_or_default();
        PreferenceStore {
            storage,
            prefs: Preferences {
                dark_mode,
                language,
            },
            system_dark,
            last_write_error: None,
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    pub fn language(&self) -> Language {
        self.prefs.language
    }

    pub fn last_write_error(&self) -> Option<&StorageError> {
        self.last_write_error.as_ref()
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.prefs.dark_mode = dark;
        self.save_flag(DARK_MODE_KEY, dark);
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.prefs.dark_mode);
        self.prefs.dark_mode
    }

    /// Forget the saved theme and go back to the ambient signal
    pub fn follow_system_theme(&mut self) {
        self.prefs.dark_mode = self.system_dark;
        self.last_write_error = self.storage.remove(DARK_MODE_KEY).err();
    }

    pub fn set_language(&mut self, language: Language) {
        self.prefs.language = language;
        self.save_flag(IS_ARABIC_KEY, language.is_arabic());
    }

    pub fn toggle_language(&mut self) -> Language {
        self.set_language(self.prefs.language.toggled());
        self.prefs.language
    }

    fn save_flag(&mut self, key: &str, value: bool) {
        let json = if value { "true" } else { "false" };
        self.last_write_error = self.storage.set(key, json).err();
    }
}

/// Stored flag, or `None` when absent, unreadable or not a JSON boolean.
fn read_flag<S: Storage>(storage: &S, key: &str) -> Option<bool> {
    let raw = storage.get(key).ok()??;
    serde_json::from_str::<bool>(&raw).ok()
}

/// Whether the terminal reports a dark background through `COLORFGBG`.
pub fn system_prefers_dark() -> bool {
    colorfgbg_is_dark(std::env::var("COLORFGBG").ok().as_deref())
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`) in ANSI color
/// numbers. Backgrounds 0-6 and 8 are dark.
fn colorfgbg_is_dark(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;

    #[test]
    fn defaults_follow_system_signal() {
        let store = PreferenceStore::load_with(MemoryStorage::new(), true);
        assert!(store.dark_mode());
        assert_eq!(store.language(), Language::English);

        let store = PreferenceStore::load_with(MemoryStorage::new(), false);
        assert!(!store.dark_mode());
    }

    #[test]
    fn saved_values_win_over_system() {
        let storage = MemoryStorage::new()
            .with_entry(DARK_MODE_KEY, "false")
            .with_entry(IS_ARABIC_KEY, "true");
        let store = PreferenceStore::load_with(storage, true);
        assert!(!store.dark_mode());
        assert_eq!(store.language(), Language::Arabic);
    }

    #[test]
    fn malformed_values_fall_back() {
        let storage = MemoryStorage::new()
            .with_entry(DARK_MODE_KEY, "\"yes\"")
            .with_entry(IS_ARABIC_KEY, "1");
        let store = PreferenceStore::load_with(storage, true);
        assert!(store.dark_mode());
        assert_eq!(store.language(), Language::English);
    }

    #[test]
    fn every_change_is_saved_as_json_bool() {
        let storage = MemoryStorage::new();
        let mut store = PreferenceStore::load_with(storage.clone(), false);

        assert!(store.toggle_dark_mode());
        assert_eq!(storage.raw(DARK_MODE_KEY).as_deref(), Some("true"));

        assert_eq!(store.toggle_language(), Language::Arabic);
        assert_eq!(storage.raw(IS_ARABIC_KEY).as_deref(), Some("true"));

        store.set_language(Language::English);
        assert_eq!(storage.raw(IS_ARABIC_KEY).as_deref(), Some("false"));

        let reloaded = PreferenceStore::load_with(storage, false);
        assert!(reloaded.dark_mode());
        assert_eq!(reloaded.language(), Language::English);
    }

    #[test]
    fn follow_system_removes_saved_theme() {
        let storage = MemoryStorage::new().with_entry(DARK_MODE_KEY, "false");
        let mut store = PreferenceStore::load_with(storage.clone(), true);
        assert!(!store.dark_mode());

        store.follow_system_theme();
        assert!(store.dark_mode());
        assert_eq!(storage.raw(DARK_MODE_KEY), None);
    }

    #[test]
    fn write_failure_keeps_value_in_memory() {
        let storage = MemoryStorage::new();
        storage.reject_writes(true);
        let mut store = PreferenceStore::load_with(storage, false);
        store.set_dark_mode(true);
        assert!(store.dark_mode());
        assert!(store.last_write_error().is_some());
    }

    #[test]
    fn colorfgbg_parsing() {
        assert!(colorfgbg_is_dark(Some("15;0")));
        assert!(colorfgbg_is_dark(Some("15;default;8")));
        assert!(!colorfgbg_is_dark(Some("0;15")));
        assert!(!colorfgbg_is_dark(Some("0;7")));
        assert!(!colorfgbg_is_dark(Some("garbage")));
        assert!(!colorfgbg_is_dark(None));
    }
}
