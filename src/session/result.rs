use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Locale;

/// Outcome of one completed run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionResult {
    /// Correct keys per minute.
    pub velocity: f64,
    pub correct_keystrokes: u32,
    pub errors: u32,
    pub error_ratio_percent: f64,
    pub lines: usize,
    #[serde(default)]
    pub locale: Locale,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    pub fn new(velocity: f64, correct_keystrokes: u32, errors: u32, lines: usize) -> Self {
        Self {
            velocity,
            correct_keystrokes,
            errors,
            error_ratio_percent: error_ratio_percent(errors, correct_keystrokes),
            lines,
            locale: Locale::default(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// `min(errors / keystrokes, 1) * 100`, rounded to one decimal.
pub fn error_ratio_percent(errors: u32, keystrokes: u32) -> f64 {
    if keystrokes == 0 {
        return if errors == 0 { 0.0 } else { 100.0 };
    }
    let ratio = (errors as f64 / keystrokes as f64).min(1.0) * 100.0;
    (ratio * 10.0).round() / 10.0
}
