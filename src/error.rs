use thiserror::Error;

use crate::session::readiness::Module;

/// Failures while obtaining candidate text. None of these are fatal: callers
/// degrade to the placeholder line.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network support is disabled in this build")]
    NetworkDisabled,
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read text: {0}")]
    Io(#[from] std::io::Error),
    #[error("no candidate satisfied the accept policy")]
    NoCandidate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("module {0:?} is not a required module")]
    Unknown(Module),
    #[error("module {0:?} already reported ready")]
    Duplicate(Module),
}
