//! Error types for the studio runtime.

use studio_protocol::{MarshalError, SourceError};
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while coordinating an editor session.
#[derive(Debug, Error)]
pub enum Error {
    /// A session is already active; at most one runs per bridge.
    #[error("an editor session is already active")]
    SessionBusy,

    /// The source location is not a usable URL.
    #[error("invalid source location: {0}")]
    InvalidSource(String),

    /// The editor UI could not be created or presented.
    #[error("failed to initialize the editor: {0}")]
    Creation(String),

    /// The engine collaborator reported a failure.
    #[error("engine error: {0}")]
    Engine(String),

    /// A value could not cross the runtime boundary.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// I/O error while persisting export artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The completion channel closed before a terminal event arrived.
    #[error("session completion channel closed unexpectedly")]
    ChannelClosed,
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::InvalidSource(err.to_string())
    }
}

impl Error {
    /// Returns true if another session held the slot.
    pub fn is_busy(&self) -> bool {
        matches!(self, Error::SessionBusy)
    }

    /// Returns true if a value failed to cross the runtime boundary.
    pub fn is_marshal(&self) -> bool {
        matches!(self, Error::Marshal(_))
    }
}
