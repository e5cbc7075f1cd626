//! Per-step state record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StepStatus;

/// Current state of a single step within one workflow attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepData {
    /// Current status of the step
    pub status: StepStatus,

    /// Message of the error that failed the step (only set while `Error`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Timestamp of the last status change, `None` until the first change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl StepData {
    /// A step that has not started.
    pub fn waiting() -> Self {
        Self::default()
    }

    /// Builds the record for a status change made now.
    ///
    /// The error message is dropped unless `status` is `Error`.
    pub fn changed(status: StepStatus, error_message: Option<String>) -> Self {
        Self {
            status,
            error_message: error_message.filter(|_| status == StepStatus::Error),
            updated_at: Some(Timestamp::now()),
        }
    }
}
