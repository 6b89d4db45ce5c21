//! English and Arabic strings for the page shell and the todo widget.

use crate::model::prefs::Language;
use crate::model::todo::FilterMode;

pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Label of the language switch, naming the *other* language
    pub translate_button: &'static str,
    pub dark_mode: &'static str,
    pub light_mode: &'static str,
    pub tasks_heading: &'static str,
    pub input_placeholder: &'static str,
    pub add_button: &'static str,
    pub empty_all: &'static str,
    pub empty_active: &'static str,
    pub empty_completed: &'static str,
    pub filter_all: &'static str,
    pub filter_active: &'static str,
    pub filter_completed: &'static str,
    pub clear_completed: &'static str,
    item_left: &'static str,
    items_left: &'static str,
}

pub const ENGLISH: Strings = Strings {
    title: "Todo App",
    subtitle: "A simple todo app to help you stay organized and productive.",
    translate_button: "العربية",
    dark_mode: "Dark",
    light_mode: "Light",
    tasks_heading: "Tasks",
    input_placeholder: "What needs to be done?",
    add_button: "Add",
    empty_all: "No tasks yet. Add one above!",
    empty_active: "No active tasks!",
    empty_completed: "No completed tasks!",
    filter_all: "All",
    filter_active: "Active",
    filter_completed: "Completed",
    clear_completed: "Clear completed",
    item_left: "{} item left",
    items_left: "{} items left",
};

pub const ARABIC: Strings = Strings {
    title: "تطبيق المهام",
    subtitle: "تطبيق بسيط للمهام لمساعدتك على البقاء منظمًا ومنتجًا.",
    translate_button: "English",
    dark_mode: "داكن",
    light_mode: "فاتح",
    tasks_heading: "المهام",
    input_placeholder: "ما الذي يجب إنجازه؟",
    add_button: "إضافة",
    empty_all: "لا توجد مهام بعد. أضف واحدة أعلاه!",
    empty_active: "لا توجد مهام نشطة!",
    empty_completed: "لا توجد مهام مكتملة!",
    filter_all: "الكل",
    filter_active: "النشطة",
    filter_completed: "المكتملة",
    clear_completed: "مسح المكتملة",
    item_left: "{} مهمة متبقية",
    items_left: "{} مهام متبقية",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::English => &ENGLISH,
        Language::Arabic => &ARABIC,
    }
}

impl Strings {
    /// "3 items left" / "1 item left"
    pub fn items_left(&self, count: usize) -> String {
        let template = if count == 1 {
            self.item_left
        } else {
            self.items_left
        };
        template.replacen("{}", &count.to_string(), 1)
    }

    pub fn empty_message(&self, mode: FilterMode) -> &'static str {
        match mode {
            FilterMode::All => self.empty_all,
            FilterMode::Active => self.empty_active,
            FilterMode::Completed => self.empty_completed,
        }
    }

    pub fn filter_label(&self, mode: FilterMode) -> &'static str {
        match mode {
            FilterMode::All => self.filter_all,
            FilterMode::Active => self.filter_active,
            FilterMode::Completed => self.filter_completed,
        }
    }

    pub fn theme_label(&self, dark: bool) -> &'static str {
        if dark { self.dark_mode } else { self.light_mode }
    }
}
