use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::keyboard::finger::Finger;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub highlighted_key: String,
    pub key_fg: String,
    pub accent: String,
    pub border: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub success: String,
    pub finger_pinky: String,
    pub finger_ring: String,
    pub finger_middle: String,
    pub finger_index: String,
    pub finger_thumb: String,
}

impl Theme {
    /// User themes in `<config_dir>/keyline/themes` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir.join("keyline").join("themes").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => warn!(error = %err, theme = name, "ignoring broken user theme"),
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }

    pub fn load_or_default(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme, using default");
            Self::default()
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("terminal-default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            text_correct: "green".to_string(),
            text_incorrect: "red".to_string(),
            text_incorrect_bg: "reset".to_string(),
            text_pending: "gray".to_string(),
            highlighted_key: "yellow".to_string(),
            key_fg: "white".to_string(),
            accent: "blue".to_string(),
            border: "darkgray".to_string(),
            bar_filled: "blue".to_string(),
            bar_empty: "darkgray".to_string(),
            error: "red".to_string(),
            success: "green".to_string(),
            finger_pinky: "#b46464".to_string(),
            finger_ring: "#b48c50".to_string(),
            finger_middle: "#78a050".to_string(),
            finger_index: "#508cb4".to_string(),
            finger_thumb: "#787878".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb` or a named terminal color. Unknown values become white.
    pub fn parse_color(value: &str) -> Color {
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Color::Rgb(r, g, b);
                }
            }
            return Color::White;
        }
        value.parse::<Color>().unwrap_or(Color::White)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn highlighted_key(&self) -> Color { Self::parse_color(&self.highlighted_key) }
    pub fn key_fg(&self) -> Color { Self::parse_color(&self.key_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }

    pub fn finger(&self, finger: Finger) -> Color {
        let value = match finger {
            Finger::Pinky => &self.finger_pinky,
            Finger::Ring => &self.finger_ring,
            Finger::Middle => &self.finger_middle,
            Finger::Index => &self.finger_index,
            Finger::Thumb => &self.finger_thumb,
        };
        Self::parse_color(value)
    }
}
