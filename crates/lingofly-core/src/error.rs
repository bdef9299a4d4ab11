//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An audio cue could not be resolved or played.
    #[error("audio resource missing: {0}")]
    ResourceMissing(String),

    /// A script index outside `[0, len)` was requested.
    #[error("index {index} out of range for script of {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of entries in the script.
        len: usize,
    },

    /// Script content failed validation at construction.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// The session was started more than once.
    #[error("session already started")]
    AlreadyStarted,

    /// The session has already terminated.
    #[error("session has ended")]
    SessionEnded,
}
