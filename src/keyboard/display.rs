//! Visible glyphs for whitespace and labels for named keys.
//!
//! Lines handed to the session never contain raw space, tab or newline: the
//! glyphs below stand in for them so every character the user must type is
//! visible on screen.

use crate::keyboard::model::KeyId;

pub const SPACE_GLYPH: char = '\u{2423}'; // ␣
pub const TAB_GLYPH: char = '\u{21b9}'; // ↹
pub const NEWLINE_GLYPH: char = '\u{23ce}'; // ⏎

/// Glyph shown for a raw character.
pub fn display_glyph(ch: char) -> char {
    match ch {
        ' ' => SPACE_GLYPH,
        '\t' => TAB_GLYPH,
        '\n' => NEWLINE_GLYPH,
        _ => ch,
    }
}

/// Replace every space, tab and newline with its glyph.
pub fn substitute_glyphs(text: &str) -> String {
    text.chars().map(display_glyph).collect()
}

/// Label for the named keys drawn below the character grid.
pub fn key_label(id: KeyId) -> &'static str {
    match id {
        KeyId::Backspace => "Bksp",
        KeyId::Tab => "Tab",
        KeyId::Enter => "Enter",
        KeyId::Shift => "Shift",
        KeyId::Space => "Space",
        KeyId::Grid { .. } => "",
    }
}
