// Error types for the player session core
//
// This module defines custom error types for session lifecycle operations,
// providing structured error handling with error codes suitable for FFI communication.

use log::error;
use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the host boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Log a session error with structured context
///
/// Logs session errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_session_error(err: &SessionError, context: &str) {
    error!(
        "Session error in {}: code={}, component=PlayerSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Session lifecycle errors
///
/// These errors cover worker startup, teardown, and shared-state access.
/// Device capability probe failures are deliberately *not* represented
/// here: a device that cannot be queried is silently excluded from the
/// registry, never surfaced as an error.
///
/// Error code range: 1001-1004
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The native worker thread could not be started
    WorkerStartFailed { reason: String },

    /// The worker was already started within this session
    WorkerAlreadyStarted,

    /// The worker thread could not be joined during teardown
    JoinFailed { reason: String },

    /// Session mutex was poisoned
    LockPoisoned { component: String },
}

impl ErrorCode for SessionError {
    fn code(&self) -> i32 {
        match self {
            SessionError::WorkerStartFailed { .. } => 1001,
            SessionError::WorkerAlreadyStarted => 1002,
            SessionError::JoinFailed { .. } => 1003,
            SessionError::LockPoisoned { .. } => 1004,
        }
    }

    fn message(&self) -> String {
        match self {
            SessionError::WorkerStartFailed { reason } => {
                format!("Failed to start native worker: {}", reason)
            }
            SessionError::WorkerAlreadyStarted => {
                "Native worker already started for this session".to_string()
            }
            SessionError::JoinFailed { reason } => {
                format!("Failed to join native worker: {}", reason)
            }
            SessionError::LockPoisoned { component } => {
                format!("Lock poisoned for component: {}", component)
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SessionError {}

impl<T> From<std::sync::PoisonError<T>> for SessionError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        SessionError::LockPoisoned {
            component: "PlayerSession".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = SessionError::WorkerStartFailed {
            reason: "spawn failed".to_string(),
        };
        assert_eq!(err.code(), 1001);
        assert_eq!(SessionError::WorkerAlreadyStarted.code(), 1002);
        assert_eq!(
            SessionError::JoinFailed {
                reason: String::new()
            }
            .code(),
            1003
        );
        assert_eq!(
            SessionError::LockPoisoned {
                component: "x".to_string()
            }
            .code(),
            1004
        );
    }

    #[test]
    fn test_messages_include_context() {
        let err = SessionError::WorkerStartFailed {
            reason: "out of threads".to_string(),
        };
        assert!(err.message().contains("out of threads"));

        let err = SessionError::LockPoisoned {
            component: "ReadinessSignals".to_string(),
        };
        assert!(err.message().contains("ReadinessSignals"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = SessionError::WorkerAlreadyStarted;
        let rendered = format!("{}", err);
        assert!(rendered.contains("1002"));
    }
}
