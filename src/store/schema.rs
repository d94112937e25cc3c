use serde::{Deserialize, Serialize};

use crate::session::result::SessionResult;

pub const SCHEMA_VERSION: u32 = 1;

/// Oldest results are dropped beyond this many entries.
pub const MAX_HISTORY: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultHistoryData {
    pub schema_version: u32,
    pub results: Vec<SessionResult>,
}

impl Default for ResultHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            results: Vec::new(),
        }
    }
}

impl ResultHistoryData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn push(&mut self, result: SessionResult) {
        self.results.push(result);
        if self.results.len() > MAX_HISTORY {
            let excess = self.results.len() - MAX_HISTORY;
            self.results.drain(..excess);
        }
    }

    pub fn best_velocity(&self) -> Option<f64> {
        self.results
            .iter()
            .map(|r| r.velocity)
            .fold(None, |best, v| Some(best.map_or(v, |b: f64| b.max(v))))
    }
}
