use crate::keyboard::display::{NEWLINE_GLYPH, SPACE_GLYPH, TAB_GLYPH};

/// A logical key press as delivered by the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
    Tab,
    Enter,
    Shift,
    AltGraph,
    Alt,
    Control,
}

impl Key {
    /// Modifier keys that never count as input.
    pub fn is_silent(self) -> bool {
        matches!(self, Key::Shift | Key::AltGraph | Key::Alt | Key::Control)
    }

    /// The single character compared against the line. Tab and Enter map to
    /// their glyphs; Backspace and modifiers have no character.
    pub fn normalized(self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(ch),
            Key::Tab => Some(TAB_GLYPH),
            Key::Enter => Some(NEWLINE_GLYPH),
            Key::Backspace | Key::Shift | Key::AltGraph | Key::Alt | Key::Control => None,
        }
    }

    /// Inverse of [`Key::normalized`] for characters found in a line, used
    /// to find the key to highlight next.
    pub fn from_display_char(ch: char) -> Key {
        match ch {
            TAB_GLYPH => Key::Tab,
            NEWLINE_GLYPH => Key::Enter,
            SPACE_GLYPH => Key::Char(' '),
            _ => Key::Char(ch),
        }
    }
}
