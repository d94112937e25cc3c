use crate::keyboard::display::substitute_glyphs;

/// A wrong keystroke logged against the line and column where it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub line: usize,
    pub column: usize,
    pub expected: char,
}

/// The lines of one practice run and the cursor into them.
/// `index == lines.len()` means the run is complete.
#[derive(Clone, Debug, Default)]
pub struct SequenceStore {
    lines: Vec<String>,
    index: usize,
    errors: Vec<ErrorRecord>,
}

impl SequenceStore {
    /// Store raw segmented lines, substituting whitespace glyphs and dropping
    /// empty lines.
    pub fn prepare(raw_lines: Vec<String>) -> Self {
        let lines = raw_lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| substitute_glyphs(line))
            .collect();
        Self {
            lines,
            index: 0,
            errors: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.lines.get(self.index).map(String::as_str)
    }

    pub fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }

    pub fn rewind(&mut self) {
        self.index = 0;
        self.errors.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.lines.len()
    }

    pub fn record_error(&mut self, record: ErrorRecord) {
        self.errors.push(record);
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_substitutes_glyphs_and_drops_empty_lines() {
        let store = SequenceStore::prepare(vec![
            "Title\n".to_string(),
            String::new(),
            "a b\tc".to_string(),
        ]);
        assert_eq!(store.lines(), &["Title⏎".to_string(), "a␣b↹c".to_string()]);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert!(SequenceStore::prepare(vec![String::new()]).is_empty());
    }

    #[test]
    fn test_cursor_never_passes_line_count() {
        let mut store = SequenceStore::prepare(vec!["one".to_string()]);
        assert_eq!(store.current(), Some("one"));
        store.advance();
        assert!(store.is_complete());
        store.advance();
        assert_eq!(store.index(), 1);
        assert_eq!(store.current(), None);
        store.rewind();
        assert_eq!(store.index(), 0);
    }

    #[test]
    fn test_error_log_is_cleared_on_rewind() {
        let mut store = SequenceStore::prepare(vec!["ab".to_string()]);
        store.record_error(ErrorRecord {
            line: 0,
            column: 1,
            expected: 'b',
        });
        assert_eq!(store.errors().len(), 1);
        store.rewind();
        assert!(store.errors().is_empty());
    }
}
