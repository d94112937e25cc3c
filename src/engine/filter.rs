use serde::{Deserialize, Serialize};

use crate::config::Locale;

/// Symbols every locale accepts besides ASCII letters and digits.
const BASE_SYMBOLS: &[char] = &[
    '.', ',', '+', '@', '!', '"', '§', '$', '%', '&', '/', '(', ')', '=', '?', ':', ';', '<', '>',
    '[', ']', '~', '*', '#', '\'', ' ', '_', '\\', '{', '}', '\n', '\t', '-',
];

const GERMAN_LETTERS: &[char] = &['ä', 'ö', 'ü', 'Ä', 'Ö', 'Ü', 'ß'];

/// Allow-list of typeable characters for a locale.
#[derive(Clone, Debug)]
pub struct CharFilter {
    pub extra: Vec<char>,
}

impl CharFilter {
    pub fn new(extra: Vec<char>) -> Self {
        Self { extra }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::new(Vec::new()),
            Locale::De => Self::new(GERMAN_LETTERS.to_vec()),
        }
    }

    pub fn is_allowed(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || BASE_SYMBOLS.contains(&ch) || self.extra.contains(&ch)
    }

    /// True when the text is non-empty and every character is allowed.
    pub fn matches_all(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|ch| self.is_allowed(ch))
    }

    /// Best-effort sanitization: drop every character outside the allow-list.
    pub fn filter_text(&self, text: &str) -> String {
        text.chars().filter(|&ch| self.is_allowed(ch)).collect()
    }
}

/// Strict acceptance: length in `min_chars..max_chars` and fully allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptPolicy {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl AcceptPolicy {
    pub fn new(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
        }
    }

    pub fn accepts(&self, text: &str, filter: &CharFilter) -> bool {
        let len = text.chars().count();
        (self.min_chars..self.max_chars).contains(&len) && filter.matches_all(text)
    }
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        Self::new(300, 1000)
    }
}

/// How user-supplied text is admitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Validate like remote text; rejection yields the placeholder.
    Strict,
    /// Strip disallowed characters and keep the rest.
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_set_shared_by_locales() {
        let en = CharFilter::for_locale(Locale::En);
        let de = CharFilter::for_locale(Locale::De);
        for ch in "Az09.,+@!\"§$%&/()=?:;<>[]~*#' _\\{}\n\t-".chars() {
            assert!(en.is_allowed(ch), "en rejects {ch:?}");
            assert!(de.is_allowed(ch), "de rejects {ch:?}");
        }
    }

    #[test]
    fn test_locale_letters_only_in_german() {
        let en = CharFilter::for_locale(Locale::En);
        let de = CharFilter::for_locale(Locale::De);
        for &ch in GERMAN_LETTERS {
            assert!(!en.is_allowed(ch));
            assert!(de.is_allowed(ch));
        }
        assert!(!de.is_allowed('é'));
        assert!(!en.is_allowed('|'));
    }

    #[test]
    fn test_filter_text_strips_disallowed() {
        let en = CharFilter::for_locale(Locale::En);
        assert_eq!(en.filter_text("Grüße aus Köln | ok"), "Gre aus Kln  ok");
        let de = CharFilter::for_locale(Locale::De);
        assert_eq!(de.filter_text("Grüße aus Köln | ok"), "Grüße aus Köln  ok");
    }

    #[test]
    fn test_matches_all_rejects_empty() {
        let en = CharFilter::for_locale(Locale::En);
        assert!(!en.matches_all(""));
        assert!(en.matches_all("plain text."));
    }

    #[test]
    fn test_accept_policy_bounds_are_inclusive_exclusive() {
        let filter = CharFilter::for_locale(Locale::En);
        let policy = AcceptPolicy::new(3, 6);
        assert!(!policy.accepts("ab", &filter));
        assert!(policy.accepts("abc", &filter));
        assert!(policy.accepts("abcde", &filter));
        assert!(!policy.accepts("abcdef", &filter));
    }

    #[test]
    fn test_accept_policy_counts_chars_not_bytes() {
        let filter = CharFilter::for_locale(Locale::De);
        let policy = AcceptPolicy::new(3, 4);
        assert!(policy.accepts("äöü", &filter));
    }

    #[test]
    fn test_accept_policy_rejects_disallowed_char() {
        let filter = CharFilter::for_locale(Locale::En);
        let policy = AcceptPolicy::new(1, 100);
        assert!(!policy.accepts("pipe | here", &filter));
    }
}
