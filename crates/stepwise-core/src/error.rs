//! Error types for the step tracker library.

use std::{fmt, time::Duration};

use thiserror::Error;

/// Errors raised by the tracker itself, as opposed to errors produced by the
/// work a step runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The step id was not declared when the tracker was constructed
    #[error("Unknown step: {step}")]
    UnknownStep { step: String },
    /// The step's work did not settle within the allotted time
    #[error("Step {step} timed out after {}ms", .after.as_millis())]
    Timeout { step: String, after: Duration },
}

impl TrackerError {
    /// Creates an unknown step error from any debuggable step id.
    pub fn unknown_step(step: &impl fmt::Debug) -> Self {
        Self::UnknownStep {
            step: format!("{step:?}"),
        }
    }

    /// Creates a timeout error for the given step id.
    pub fn timeout(step: &impl fmt::Debug, after: Duration) -> Self {
        Self::Timeout {
            step: format!("{step:?}"),
            after,
        }
    }
}

/// Failure reported by a workflow backend (account service, election
/// service, proposal registry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by the offchain proposal publisher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Tracker misuse or a step timeout
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    /// A backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_step_uses_debug_name() {
        let err = TrackerError::unknown_step(&"missing");
        assert_eq!(err.to_string(), "Unknown step: \"missing\"");
    }

    #[test]
    fn test_timeout_message() {
        let err = TrackerError::timeout(&3u8, Duration::from_millis(250));
        assert_eq!(err.to_string(), "Step 3 timed out after 250ms");
    }

    #[test]
    fn test_publish_error_conversions() {
        let err: PublishError = BackendError::new("rpc down").into();
        assert_eq!(err.to_string(), "Backend error: rpc down");

        let err: PublishError = TrackerError::unknown_step(&1).into();
        assert_eq!(err.to_string(), "Unknown step: 1");
    }
}
