//! The keystroke state machine.
//!
//! A [`TypingSession`] owns the current line as an immutable `Vec<char>` plus
//! a cursor; everything the user sees is pushed out through a
//! [`SessionHost`] so the same logic runs against the terminal UI and the
//! recording host used in tests.

use tracing::debug;

use crate::keyboard::display::{SPACE_GLYPH, display_glyph};
use crate::keyboard::model::KeyId;
use crate::session::host::{InfoSnapshot, SessionHost};
use crate::session::input::Key;
use crate::session::result::SessionResult;
use crate::session::sequence::{ErrorRecord, SequenceStore};

/// Wrong input shown in red is capped at this many characters.
pub const MAX_INCORRECT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub struct TypingSession {
    state: SessionState,
    sequence: SequenceStore,
    line: Vec<char>,
    position: usize,
    correct: String,
    incorrect: Vec<char>,
    in_error: bool,
    error_count: u32,
    start_text: String,
    suppress_highlight: bool,
}

impl TypingSession {
    pub fn new(start_text: impl Into<String>, suppress_highlight: bool) -> Self {
        Self {
            state: SessionState::Loading,
            sequence: SequenceStore::default(),
            line: Vec::new(),
            position: 0,
            correct: String::new(),
            incorrect: Vec::new(),
            in_error: false,
            error_count: 0,
            start_text: start_text.into(),
            suppress_highlight,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sequence(&self) -> &SequenceStore {
        &self.sequence
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn in_error(&self) -> bool {
        self.in_error
    }

    pub fn correct_text(&self) -> &str {
        &self.correct
    }

    pub fn incorrect_text(&self) -> String {
        self.incorrect.iter().collect()
    }

    pub fn remaining_text(&self) -> String {
        self.line[self.position.min(self.line.len())..]
            .iter()
            .collect()
    }

    /// Character the user must type next, if a line is loaded.
    pub fn expected(&self) -> Option<char> {
        self.line.get(self.position).copied()
    }

    /// `(line index, column)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.sequence.index(), self.position)
    }

    pub fn record_error(&mut self, record: ErrorRecord) {
        self.sequence.record_error(record);
    }

    /// Install lines without any transition. Used while still loading.
    pub fn set_sequence(&mut self, sequence: SequenceStore) {
        self.sequence = sequence;
    }

    /// Swap in new content. Outside `Loading` this re-enters `Idle`.
    pub fn replace_sequence<H: SessionHost>(&mut self, sequence: SequenceStore, host: &mut H) {
        self.sequence = sequence;
        if self.state != SessionState::Loading {
            self.enter_idle(host);
        }
    }

    /// Restart the current text from its first line.
    pub fn restart<H: SessionHost>(&mut self, host: &mut H) {
        if self.state != SessionState::Loading {
            self.enter_idle(host);
        }
    }

    /// Entry action shared by `Loading → Idle` and every content reset.
    pub fn enter_idle<H: SessionHost>(&mut self, host: &mut H) {
        host.unhighlight_all_keys();
        host.set_red_text("");
        host.set_green_text("");
        host.set_normal_text(&self.start_text);

        self.sequence.rewind();
        self.line.clear();
        self.position = 0;
        self.correct.clear();
        self.incorrect.clear();
        self.in_error = false;
        self.error_count = 0;

        host.stop();
        host.update_info(InfoSnapshot::default());
        host.update_progress(0, self.sequence.len());
        self.state = SessionState::Idle;
        debug!(lines = self.sequence.len(), "session idle");
    }

    pub fn handle_key<H: SessionHost>(&mut self, key: Key, key_id: Option<KeyId>, host: &mut H) {
        match self.state {
            SessionState::Loading | SessionState::Finished => return,
            SessionState::Idle => {
                self.start(host);
                return;
            }
            SessionState::Running => {}
        }

        let Some(key_id) = key_id else {
            return;
        };
        if key.is_silent() {
            return;
        }

        if key == Key::Backspace {
            self.backspace(host);
        } else if let Some(typed) = key.normalized() {
            self.evaluate(typed, key_id, host);
        }

        host.update_info(self.info(host));
    }

    fn start<H: SessionHost>(&mut self, host: &mut H) {
        self.state = SessionState::Running;
        host.start();
        if self.sequence.is_empty() {
            debug!("nothing to type, finishing at once");
            self.finish(host);
            return;
        }
        self.load_current_line(host);
        self.highlight_expected(host);
        host.update_info(self.info(host));
        debug!("session running");
    }

    fn backspace<H: SessionHost>(&mut self, host: &mut H) {
        if self.incorrect.pop().is_none() {
            return;
        }
        host.set_red_text(&self.incorrect_text());
        if self.incorrect.is_empty() {
            self.in_error = false;
            if !self.suppress_highlight {
                host.unhighlight_key(KeyId::Backspace);
            }
            self.highlight_expected(host);
        }
    }

    fn evaluate<H: SessionHost>(&mut self, typed: char, key_id: KeyId, host: &mut H) {
        let Some(expected) = self.expected() else {
            return;
        };
        let matches = typed == expected || (typed == ' ' && expected == SPACE_GLYPH);

        if matches && !self.in_error {
            host.record_keystroke();
            self.position += 1;
            if self.position >= self.line.len() {
                self.next_line(host);
                return;
            }
            self.correct.push(expected);
            host.set_green_text(&self.correct);
            host.set_normal_text(&self.remaining_text());
            if !self.suppress_highlight {
                host.unhighlight_key(key_id);
            }
            self.highlight_expected(host);
            return;
        }

        if !self.in_error {
            self.error_count += 1;
        }
        self.in_error = true;
        if !self.suppress_highlight {
            if let Some(last) = host.last_highlighted() {
                host.unhighlight_key(last);
            }
            host.highlight_key(KeyId::Backspace);
        }
        if self.incorrect.len() < MAX_INCORRECT {
            self.incorrect.push(display_glyph(typed));
            host.set_red_text(&self.incorrect_text());
        }
    }

    fn next_line<H: SessionHost>(&mut self, host: &mut H) {
        self.sequence.advance();
        host.update_progress(self.sequence.index(), self.sequence.len());
        if !self.suppress_highlight {
            if let Some(last) = host.last_highlighted() {
                host.unhighlight_key(last);
            }
        }

        if self.sequence.is_complete() {
            self.finish(host);
            return;
        }
        self.load_current_line(host);
        self.highlight_expected(host);
        host.line_slide_in();
    }

    fn finish<H: SessionHost>(&mut self, host: &mut H) {
        host.stop();
        self.line.clear();
        self.position = 0;
        self.correct.clear();
        self.incorrect.clear();
        host.set_green_text("");
        host.set_red_text("");
        host.set_normal_text("");
        self.state = SessionState::Finished;

        let result = SessionResult::new(
            host.velocity(),
            host.keystrokes(),
            self.error_count,
            self.sequence.len(),
        );
        debug!(
            errors = result.errors,
            keystrokes = result.correct_keystrokes,
            "session finished"
        );
        host.report(result);
    }

    fn load_current_line<H: SessionHost>(&mut self, host: &mut H) {
        self.line = self
            .sequence
            .current()
            .map(|line| line.chars().collect())
            .unwrap_or_default();
        self.position = 0;
        self.correct.clear();
        self.incorrect.clear();
        self.in_error = false;
        host.set_green_text("");
        host.set_red_text("");
        host.set_normal_text(&self.remaining_text());
    }

    fn highlight_expected<H: SessionHost>(&self, host: &mut H) {
        let Some(expected) = self.expected() else {
            return;
        };
        if let Some(id) = host.key_id_for(&Key::from_display_char(expected)) {
            host.highlight_key(id);
        }
    }

    fn info<H: SessionHost>(&self, host: &H) -> InfoSnapshot {
        InfoSnapshot {
            errors: self.error_count,
            keystrokes: host.keystrokes(),
        }
    }
}
