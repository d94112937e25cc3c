use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::filter::{AcceptPolicy, TextPolicy};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            "de" | "de-de" => Some(Locale::De),
            _ => None,
        }
    }

    pub fn default_keyboard_layout(self) -> &'static str {
        match self {
            Locale::En => "qwerty",
            Locale::De => "qwertz",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub keyboard_layout: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub show_assignment: bool,
    #[serde(default = "default_accept_min_chars")]
    pub accept_min_chars: usize,
    #[serde(default = "default_accept_max_chars")]
    pub accept_max_chars: usize,
    #[serde(default)]
    pub user_text_policy: TextPolicy,
    #[serde(default = "default_wikipedia_candidates")]
    pub wikipedia_candidates: u32,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_max_line_length() -> usize {
    24
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_accept_min_chars() -> usize {
    300
}
fn default_accept_max_chars() -> usize {
    1000
}
fn default_wikipedia_candidates() -> u32 {
    10
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            locale: Locale::default(),
            keyboard_layout: None,
            theme: default_theme(),
            show_assignment: false,
            accept_min_chars: default_accept_min_chars(),
            accept_max_chars: default_accept_max_chars(),
            user_text_policy: TextPolicy::default(),
            wikipedia_candidates: default_wikipedia_candidates(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyline")
            .join("config.toml")
    }

    /// Clamp values that would make segmentation or acceptance meaningless.
    /// Call after deserialization and after applying CLI overrides.
    pub fn normalize(&mut self) {
        self.max_line_length = self.max_line_length.max(1);
        if self.accept_min_chars >= self.accept_max_chars {
            self.accept_min_chars = default_accept_min_chars();
            self.accept_max_chars = default_accept_max_chars();
        }
        if self.wikipedia_candidates == 0 {
            self.wikipedia_candidates = default_wikipedia_candidates();
        }
    }

    pub fn accept_policy(&self) -> AcceptPolicy {
        AcceptPolicy::new(self.accept_min_chars, self.accept_max_chars)
    }

    pub fn layout_name(&self) -> &str {
        self.keyboard_layout
            .as_deref()
            .unwrap_or_else(|| self.locale.default_keyboard_layout())
    }
}
