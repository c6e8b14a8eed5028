use crate::app::config::AppConfig;
use crate::catalog::Mood;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

impl Theme {
    /// Accent for the selected mood. No mood falls back to the theme text colour.
    pub fn mood_accent(&self, mood: Option<Mood>) -> Color {
        match mood {
            Some(Mood::Happy) => Color::Rgb(247, 255, 109),
            Some(Mood::Sad) => Color::Rgb(66, 65, 65),
            Some(Mood::Energetic) => Color::Rgb(255, 183, 51),
            Some(Mood::Relaxed) => Color::Rgb(167, 188, 224),
            Some(Mood::Inspired) => Color::Rgb(255, 196, 205),
            Some(Mood::Stressed) => Color::Rgb(230, 73, 73),
            None => self.text,
        }
    }

    /// Readable foreground for text drawn on top of `mood_accent`
    pub fn mood_foreground(&self, mood: Option<Mood>) -> Color {
        match mood {
            Some(Mood::Sad) | Some(Mood::Stressed) => self.text,
            Some(_) => self.base,
            None => self.base,
        }
    }
}

// Helper for serialization/deserialization
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path() -> std::path::PathBuf {
    AppConfig::get_config_dir().join("theme.toml")
}

pub fn parse_theme(content: &str) -> Option<Theme> {
    // Nested [theme] table first, then a flat file
    if let Ok(wrapper) = toml::from_str::<ThemeFile>(content) {
        return Some(wrapper.theme);
    }
    toml::from_str::<Theme>(content).ok()
}

pub fn load_current_theme() -> Theme {
    let path = get_theme_path();

    if path.exists() {
        match fs::read_to_string(&path) {
            Ok(content) => {
                if let Some(theme) = parse_theme(&content) {
                    return theme;
                }
                tracing::warn!(path = %path.display(), "theme.toml is malformed, using default");
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "theme.toml unreadable"),
        }
    } else {
        // Auto-create default theme file if it doesn't exist
        let default_theme = Theme::default();
        let wrapper = ThemeFile {
            theme: default_theme.clone(),
        };
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(&path, toml_str);
        }
        return default_theme;
    }

    Theme::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_and_flat_theme_files() {
        let nested = toml::to_string_pretty(&ThemeFile {
            theme: Theme::default(),
        })
        .unwrap();
        assert_eq!(parse_theme(&nested).unwrap().base, Theme::default().base);

        let flat = toml::to_string_pretty(&Theme::default()).unwrap();
        assert_eq!(parse_theme(&flat).unwrap().text, Theme::default().text);

        assert!(parse_theme("base = 12").is_none());
    }

    #[test]
    fn test_mood_accents() {
        let theme = Theme::default();
        assert_eq!(theme.mood_accent(Some(Mood::Stressed)), Color::Rgb(230, 73, 73));
        assert_eq!(theme.mood_accent(None), theme.text);
    }
}
