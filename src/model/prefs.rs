use std::fmt;
use std::str::FromStr;

/// Interface language. Stored as the `isArabic` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub fn from_is_arabic(is_arabic: bool) -> Self {
        if is_arabic {
            Language::Arabic
        } else {
            Language::English
        }
    }

    pub fn is_arabic(self) -> bool {
        self == Language::Arabic
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }

    /// Right-to-left script
    pub fn is_rtl(self) -> bool {
        self.is_arabic()
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" => Ok(Language::Arabic),
            other => Err(format!("invalid language: {} (expected en or ar)", other)),
        }
    }
}

/// The two page-level display flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_flag_mapping() {
        assert_eq!(Language::from_is_arabic(true), Language::Arabic);
        assert_eq!(Language::from_is_arabic(false), Language::English);
        assert!(Language::Arabic.is_arabic());
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::English.is_rtl());
    }

    #[test]
    fn language_toggles_back_and_forth() {
        assert_eq!(Language::English.toggled(), Language::Arabic);
        assert_eq!(Language::English.toggled().toggled(), Language::English);
    }

    #[test]
    fn language_from_str() {
        assert_eq!("AR".parse::<Language>(), Ok(Language::Arabic));
        assert_eq!("english".parse::<Language>(), Ok(Language::English));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn default_preferences_are_light_english() {
        let prefs = Preferences::default();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.language, Language::English);
    }
}
