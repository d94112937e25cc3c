use std::collections::HashSet;

use crate::keyboard::model::{KeyId, KeyboardModel};
use crate::session::host::KeyHighlighter;
use crate::session::input::Key;

/// Highlight state of the on-screen keyboard.
#[derive(Clone, Debug, Default)]
pub struct KeyHighlights {
    pub model: KeyboardModel,
    highlighted: HashSet<KeyId>,
    last: Option<KeyId>,
}

impl KeyHighlights {
    pub fn new(model: KeyboardModel) -> Self {
        Self {
            model,
            highlighted: HashSet::new(),
            last: None,
        }
    }

    pub fn is_highlighted(&self, id: KeyId) -> bool {
        self.highlighted.contains(&id)
    }
}

impl KeyHighlighter for KeyHighlights {
    fn highlight_key(&mut self, id: KeyId) {
        self.highlighted.insert(id);
        self.last = Some(id);
    }

    fn unhighlight_key(&mut self, id: KeyId) {
        self.highlighted.remove(&id);
    }

    fn unhighlight_all_keys(&mut self) {
        self.highlighted.clear();
    }

    fn key_id_for(&self, key: &Key) -> Option<KeyId> {
        self.model.key_id_for(key)
    }

    fn last_highlighted(&self) -> Option<KeyId> {
        self.last
    }
}
