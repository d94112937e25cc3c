use crate::keyboard::finger::{self, FingerAssignment};
use crate::session::input::Key;

/// One key of the character block. `altgr` covers the third level used by
/// ISO layouts for symbols such as `@` or `{` on QWERTZ.
#[derive(Clone, Debug)]
pub struct PhysicalKey {
    pub base: char,
    pub shifted: char,
    pub altgr: Option<char>,
}

impl PhysicalKey {
    pub fn produces(&self, ch: char) -> bool {
        self.base == ch || self.shifted == ch || self.altgr == Some(ch)
    }
}

/// Identifier of a key on the on-screen keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyId {
    Grid { row: usize, col: usize },
    Backspace,
    Tab,
    Enter,
    Shift,
    Space,
}

#[derive(Clone, Debug)]
pub struct KeyboardModel {
    pub name: String,
    pub rows: Vec<Vec<PhysicalKey>>,
    /// Number of keys left of the pinky's home column, per row.
    offsets: Vec<usize>,
}

fn row(base: &str, shifted: &str) -> Vec<PhysicalKey> {
    base.chars()
        .zip(shifted.chars())
        .map(|(base, shifted)| PhysicalKey {
            base,
            shifted,
            altgr: None,
        })
        .collect()
}

impl KeyboardModel {
    /// ISO QWERTY as found on English keyboards with a `§` key.
    pub fn qwerty() -> Self {
        Self {
            name: "qwerty".to_string(),
            rows: vec![
                row("§1234567890-=", "±!@#$%^&*()_+"),
                row("qwertyuiop[]", "QWERTYUIOP{}"),
                row("asdfghjkl;'\\", "ASDFGHJKL:\"|"),
                row("`zxcvbnm,./", "~ZXCVBNM<>?"),
            ],
            offsets: vec![1, 0, 0, 1],
        }
    }

    /// German ISO QWERTZ.
    pub fn qwertz() -> Self {
        let mut model = Self {
            name: "qwertz".to_string(),
            rows: vec![
                row("^1234567890ß´", "°!\"§$%&/()=?`"),
                row("qwertzuiopü+", "QWERTZUIOPÜ*"),
                row("asdfghjklöä#", "ASDFGHJKLÖÄ'"),
                row("<yxcvbnm,.-", ">YXCVBNM;:_"),
            ],
            offsets: vec![1, 0, 0, 1],
        };
        for (base, altgr) in [
            ('2', '²'),
            ('3', '³'),
            ('7', '{'),
            ('8', '['),
            ('9', ']'),
            ('0', '}'),
            ('ß', '\\'),
            ('q', '@'),
            ('e', '€'),
            ('+', '~'),
            ('<', '|'),
        ] {
            model.set_altgr(base, altgr);
        }
        model
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "qwertz" | "de" => Self::qwertz(),
            _ => Self::qwerty(),
        }
    }

    fn set_altgr(&mut self, base: char, altgr: char) {
        if let Some(key) = self
            .rows
            .iter_mut()
            .flatten()
            .find(|key| key.base == base)
        {
            key.altgr = Some(altgr);
        }
    }

    fn find_key_position(&self, ch: char) -> Option<(usize, usize)> {
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col_idx, key) in row.iter().enumerate() {
                if key.produces(ch) {
                    return Some((row_idx, col_idx));
                }
            }
        }
        None
    }

    /// Resolve a logical key to the on-screen key that produces it.
    /// `None` means the layout has no such key.
    pub fn key_id_for(&self, key: &Key) -> Option<KeyId> {
        match *key {
            Key::Char(' ') => Some(KeyId::Space),
            Key::Char(ch) => self
                .find_key_position(ch)
                .map(|(row, col)| KeyId::Grid { row, col }),
            Key::Backspace => Some(KeyId::Backspace),
            Key::Tab => Some(KeyId::Tab),
            Key::Enter => Some(KeyId::Enter),
            Key::Shift => Some(KeyId::Shift),
            Key::AltGraph | Key::Alt | Key::Control => None,
        }
    }

    pub fn finger_for_position(&self, row: usize, col: usize) -> FingerAssignment {
        let offset = self.offsets.get(row).copied().unwrap_or(0);
        finger::finger_for_column(col.saturating_sub(offset))
    }

    pub fn finger_for_key(&self, id: KeyId) -> FingerAssignment {
        match id {
            KeyId::Grid { row, col } => self.finger_for_position(row, col),
            KeyId::Space => FingerAssignment::thumb(),
            KeyId::Tab | KeyId::Shift => finger::finger_for_column(0),
            KeyId::Backspace | KeyId::Enter => finger::finger_for_column(9),
        }
    }
}

impl Default for KeyboardModel {
    fn default() -> Self {
        Self::qwerty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;
    use crate::engine::filter::CharFilter;
    use crate::keyboard::finger::{Finger, Hand};

    fn allowed_printables(filter: &CharFilter) -> Vec<char> {
        (' '..='~')
            .chain("§äöüÄÖÜß".chars())
            .filter(|&ch| ch != ' ' && filter.is_allowed(ch))
            .collect()
    }

    #[test]
    fn test_qwerty_covers_english_allow_list() {
        let model = KeyboardModel::qwerty();
        let filter = CharFilter::for_locale(Locale::En);
        for ch in allowed_printables(&filter) {
            assert!(
                model.key_id_for(&Key::Char(ch)).is_some(),
                "qwerty missing char: {ch:?}"
            );
        }
    }

    #[test]
    fn test_qwertz_covers_german_allow_list() {
        let model = KeyboardModel::qwertz();
        let filter = CharFilter::for_locale(Locale::De);
        for ch in allowed_printables(&filter) {
            assert!(
                model.key_id_for(&Key::Char(ch)).is_some(),
                "qwertz missing char: {ch:?}"
            );
        }
    }

    #[test]
    fn test_shifted_and_base_share_a_key() {
        let model = KeyboardModel::qwerty();
        assert_eq!(
            model.key_id_for(&Key::Char('a')),
            model.key_id_for(&Key::Char('A'))
        );
        let qwertz = KeyboardModel::qwertz();
        assert_eq!(
            qwertz.key_id_for(&Key::Char('q')),
            qwertz.key_id_for(&Key::Char('@'))
        );
    }

    #[test]
    fn test_special_keys_and_unmapped() {
        let model = KeyboardModel::qwerty();
        assert_eq!(model.key_id_for(&Key::Char(' ')), Some(KeyId::Space));
        assert_eq!(model.key_id_for(&Key::Backspace), Some(KeyId::Backspace));
        assert_eq!(model.key_id_for(&Key::Enter), Some(KeyId::Enter));
        assert_eq!(model.key_id_for(&Key::Char('é')), None);
        assert_eq!(model.key_id_for(&Key::Control), None);
    }

    #[test]
    fn test_finger_assignment_respects_row_offsets() {
        let model = KeyboardModel::qwerty();
        let Some(KeyId::Grid { row, col }) = model.key_id_for(&Key::Char('z')) else {
            panic!("z should be on the grid");
        };
        let assignment = model.finger_for_position(row, col);
        assert_eq!(assignment.hand, Hand::Left);
        assert_eq!(assignment.finger, Finger::Pinky);

        let Some(KeyId::Grid { row, col }) = model.key_id_for(&Key::Char('j')) else {
            panic!("j should be on the grid");
        };
        assert_eq!(model.finger_for_position(row, col).hand, Hand::Right);
    }

    #[test]
    fn test_from_name_falls_back_to_qwerty() {
        assert_eq!(KeyboardModel::from_name("qwertz").name, "qwertz");
        assert_eq!(KeyboardModel::from_name("dvorak").name, "qwerty");
    }
}
