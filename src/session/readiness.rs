use std::collections::HashSet;

use crate::error::ReadinessError;

/// Subsystems that must be ready before the session leaves `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Module {
    Keyboard,
    Display,
    Sequence,
    Typometer,
    Misc,
    InfoBar,
    ProgressBar,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Keyboard,
        Module::Display,
        Module::Sequence,
        Module::Typometer,
        Module::Misc,
        Module::InfoBar,
        Module::ProgressBar,
    ];
}

/// Countdown over a fixed set of modules. Opens exactly once, when the last
/// outstanding module reports, whatever the arrival order.
#[derive(Debug)]
pub struct ModuleBarrier {
    required: HashSet<Module>,
    pending: HashSet<Module>,
}

impl ModuleBarrier {
    pub fn new(required: impl IntoIterator<Item = Module>) -> Self {
        let required: HashSet<Module> = required.into_iter().collect();
        Self {
            pending: required.clone(),
            required,
        }
    }

    /// Record that `module` is ready. Returns `Ok(true)` only for the report
    /// that opens the barrier. Rejected reports leave the count untouched.
    pub fn report(&mut self, module: Module) -> Result<bool, ReadinessError> {
        if !self.required.contains(&module) {
            return Err(ReadinessError::Unknown(module));
        }
        if !self.pending.remove(&module) {
            return Err(ReadinessError::Duplicate(module));
        }
        Ok(self.pending.is_empty())
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
