//! Collaborator interfaces the session drives. The session never touches the
//! terminal; every visible change goes through these traits.

use crate::keyboard::model::KeyId;
use crate::session::input::Key;
use crate::session::result::SessionResult;

/// Numbers shown by the info bar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InfoSnapshot {
    pub errors: u32,
    pub keystrokes: u32,
}

impl InfoSnapshot {
    pub fn error_ratio_percent(&self) -> f64 {
        crate::session::result::error_ratio_percent(self.errors, self.keystrokes)
    }
}

/// The three-part line plus the info and progress indicators.
pub trait Renderer {
    /// Remaining, not yet typed part of the line.
    fn set_normal_text(&mut self, text: &str);
    /// Correctly typed prefix.
    fn set_green_text(&mut self, text: &str);
    /// Wrong input waiting to be deleted.
    fn set_red_text(&mut self, text: &str);
    fn line_slide_in(&mut self);
    fn update_info(&mut self, info: InfoSnapshot);
    fn update_progress(&mut self, index: usize, total: usize);
}

pub trait KeyHighlighter {
    fn highlight_key(&mut self, id: KeyId);
    fn unhighlight_key(&mut self, id: KeyId);
    fn unhighlight_all_keys(&mut self);
    fn key_id_for(&self, key: &Key) -> Option<KeyId>;
    fn last_highlighted(&self) -> Option<KeyId>;
}

pub trait Timer {
    fn start(&mut self);
    fn stop(&mut self);
    fn record_keystroke(&mut self);
    fn keystrokes(&self) -> u32;
    /// Correct keys per minute.
    fn velocity(&self) -> f64;
}

pub trait ResultReporter {
    fn report(&mut self, result: SessionResult);
}

/// Everything a [`TypingSession`](crate::session::typing::TypingSession)
/// needs from its surroundings.
pub trait SessionHost: Renderer + KeyHighlighter + Timer + ResultReporter {}

impl<T: Renderer + KeyHighlighter + Timer + ResultReporter> SessionHost for T {}
