//! The externally visible error taxonomy.
//!
//! Every rejection leaving the bridge carries one stable code plus a
//! human-readable message. Codes are assigned exclusively here; the inner
//! crates raise typed failures that this module translates.

use std::fmt;
use studio_runtime::Error as RuntimeError;
use thiserror::Error;

/// Result type alias for bridge operations.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

pub(crate) const MISSING_ARGUMENTS_MESSAGE: &str = "Unable to find required argument(s): ";
pub(crate) const PARSING_MESSAGE: &str = "Unable to parse the argument(s): ";
pub(crate) const EXPORT_FAILED_MESSAGE: &str = "Failed to export the artifact due to: ";
const BUSY_MESSAGE: &str = "An editor session is already active.";

/// Stable error codes surfaced to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required argument was absent; no session was created.
    MissingArguments,
    /// Settings or source failed to decode, or an argument had the wrong
    /// shape; no UI was presented.
    Parsing,
    /// Creation, export, or marshaling failed.
    ExportFailed,
    /// A session is already active.
    Busy,
}

impl ErrorCode {
    /// Wire identifier, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingArguments => "E_MISSING_ARGUMENTS",
            ErrorCode::Parsing => "E_PARSING",
            ErrorCode::ExportFailed => "E_EXPORT_FAILED",
            ErrorCode::Busy => "E_BUSY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejection delivered to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct BridgeError {
    /// The stable code.
    pub code: ErrorCode,
    /// Human-readable description, already prefixed for its code.
    pub message: String,
}

impl BridgeError {
    /// A required argument is missing.
    pub fn missing_arguments(name: &str) -> Self {
        Self {
            code: ErrorCode::MissingArguments,
            message: format!("{MISSING_ARGUMENTS_MESSAGE}{name}"),
        }
    }

    /// An argument failed to decode.
    pub fn parsing(detail: impl fmt::Display) -> Self {
        Self {
            code: ErrorCode::Parsing,
            message: format!("{PARSING_MESSAGE}{detail}"),
        }
    }

    /// Creation, export, or marshaling failed.
    pub fn export_failed(cause: impl fmt::Display) -> Self {
        Self {
            code: ErrorCode::ExportFailed,
            message: format!("{EXPORT_FAILED_MESSAGE}{cause}"),
        }
    }

    /// A session already holds the slot.
    pub fn busy() -> Self {
        Self {
            code: ErrorCode::Busy,
            message: BUSY_MESSAGE.to_string(),
        }
    }
}

impl From<RuntimeError> for BridgeError {
    fn from(err: RuntimeError) -> Self {
        match &err {
            RuntimeError::SessionBusy => Self::busy(),
            RuntimeError::InvalidSource(_) => Self::parsing(err),
            _ => Self::export_failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_protocol::MarshalError;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::MissingArguments.as_str(), "E_MISSING_ARGUMENTS");
        assert_eq!(ErrorCode::Parsing.as_str(), "E_PARSING");
        assert_eq!(ErrorCode::ExportFailed.as_str(), "E_EXPORT_FAILED");
        assert_eq!(ErrorCode::Busy.as_str(), "E_BUSY");
    }

    #[test]
    fn test_messages_carry_their_prefix() {
        let err = BridgeError::missing_arguments("settings");
        assert_eq!(err.message, "Unable to find required argument(s): settings");

        let err = BridgeError::export_failed("encoder crashed");
        assert!(err.message.starts_with("Failed to export the artifact due to: "));
        assert!(err.message.ends_with("encoder crashed"));
    }

    #[test]
    fn test_runtime_error_mapping() {
        assert_eq!(
            BridgeError::from(RuntimeError::SessionBusy).code,
            ErrorCode::Busy
        );
        assert_eq!(
            BridgeError::from(RuntimeError::InvalidSource("bad".into())).code,
            ErrorCode::Parsing
        );
        assert_eq!(
            BridgeError::from(RuntimeError::Creation("no window".into())).code,
            ErrorCode::ExportFailed
        );
        assert_eq!(
            BridgeError::from(RuntimeError::Marshal(MarshalError::UnsupportedType(
                "bytes".into()
            )))
            .code,
            ErrorCode::ExportFailed
        );
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = BridgeError::busy();
        assert_eq!(err.to_string(), "E_BUSY: An editor session is already active.");
    }
}
