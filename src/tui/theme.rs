use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Color palette for one of the two display modes
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub accent: Color,
    pub done: Color,
    pub danger: Color,
    pub selection_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            dark: true,
            background: Color::Rgb(0x11, 0x18, 0x27),
            surface: Color::Rgb(0x1F, 0x29, 0x37),
            text: Color::Rgb(0xE5, 0xE7, 0xEB),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            highlight: Color::Rgb(0x3B, 0x82, 0xF6),
            accent: Color::Rgb(0xFC, 0xD3, 0x4D),
            done: Color::Rgb(0x6B, 0x72, 0x80),
            danger: Color::Rgb(0xF8, 0x71, 0x71),
            selection_bg: Color::Rgb(0x1E, 0x3A, 0x8A),
        }
    }

    pub fn light() -> Self {
        Theme {
            dark: false,
            background: Color::Rgb(0xF3, 0xE8, 0xFF),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x1F, 0x29, 0x37),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            highlight: Color::Rgb(0x25, 0x63, 0xEB),
            accent: Color::Rgb(0x8B, 0x5C, 0xF6),
            done: Color::Rgb(0x9C, 0xA3, 0xAF),
            danger: Color::Rgb(0xEF, 0x44, 0x44),
            selection_bg: Color::Rgb(0xDB, 0xEA, 0xFE),
        }
    }

    /// Palette for `dark`, with the matching `[ui.*_colors]` overrides applied
    pub fn for_mode(ui: &UiConfig, dark: bool) -> Self {
        if dark {
            Theme::dark().with_overrides(&ui.dark_colors)
        } else {
            Theme::light().with_overrides(&ui.light_colors)
        }
    }

    fn with_overrides(mut self, colors: &HashMap<String, String>) -> Self {
        for (key, value) in colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => self.background = color,
                "surface" => self.surface = color,
                "text" => self.text = color,
                "text_bright" => self.text_bright = color,
                "dim" => self.dim = color,
                "highlight" => self.highlight = color,
                "accent" => self.accent = color,
                "done" => self.done = color,
                "danger" => self.danger = color,
                "selection_bg" => self.selection_bg = color,
                _ => {}
            }
        }
        self
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#3B82F6"), Some(Color::Rgb(0x3B, 0x82, 0xF6)));
        assert_eq!(parse_hex_color("3B82F6"), None);
        assert_eq!(parse_hex_color("#3B82"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn mode_selects_palette() {
        let ui = UiConfig::default();
        assert!(Theme::for_mode(&ui, true).dark);
        assert_eq!(Theme::for_mode(&ui, false), Theme::light());
    }

    #[test]
    fn overrides_apply_only_to_their_mode() {
        let mut ui = UiConfig::default();
        ui.dark_colors.insert("highlight".into(), "#FF0000".into());
        ui.dark_colors.insert("nonsense".into(), "#00FF00".into());
        ui.light_colors.insert("text".into(), "not a color".into());

        let dark = Theme::for_mode(&ui, true);
        assert_eq!(dark.highlight, Color::Rgb(0xFF, 0, 0));
        assert_eq!(Theme::for_mode(&ui, false), Theme::light());
    }
}
