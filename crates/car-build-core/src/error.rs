/*
[INPUT]:  Stage name parsing and Tokio runtime lookup
[OUTPUT]: Structured error types for the core crate
[POS]:    Error handling layer - unified error types for car-build-core
[UPDATE]: When adding new fallible entry points
*/

use thiserror::Error;

/// Returned when a string does not name any build stage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown build stage: {name}")]
pub struct ParseStageError {
    pub name: String,
}

/// Errors raised while constructing a scheduler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// No Tokio runtime is running on the calling thread
    #[error("auto-advance timer requires a running Tokio runtime")]
    NoRuntime,
}
