//! Step status enumeration and aggregate status derivation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step has not started yet
    #[default]
    Waiting,

    /// Step work is in flight
    Loading,

    /// Step work resolved
    Success,

    /// Step work failed
    Error,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waiting" => Ok(StepStatus::Waiting),
            "loading" => Ok(StepStatus::Loading),
            "success" => Ok(StepStatus::Success),
            "error" => Ok(StepStatus::Error),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StepStatus {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Waiting => "waiting",
            StepStatus::Loading => "loading",
            StepStatus::Success => "success",
            StepStatus::Error => "error",
        }
    }

    /// Whether the step has settled (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Success | StepStatus::Error)
    }

    /// Single-character marker used by progress lists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepwise_core::StepStatus;
    ///
    /// assert_eq!(StepStatus::Success.marker(), "✓");
    /// assert_eq!(StepStatus::Error.marker(), "✗");
    /// ```
    pub fn marker(&self) -> &'static str {
        match self {
            StepStatus::Waiting => "○",
            StepStatus::Loading => "…",
            StepStatus::Success => "✓",
            StepStatus::Error => "✗",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `○ Waiting` - Circle for steps that have not started
    /// - `… Loading` - Ellipsis for steps in flight
    /// - `✓ Success` - Checkmark for completed steps
    /// - `✗ Error` - Cross for failed steps
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Waiting => "○ Waiting",
            StepStatus::Loading => "… Loading",
            StepStatus::Success => "✓ Success",
            StepStatus::Error => "✗ Error",
        }
    }
}

/// Derives the aggregate status of a workflow from its per-step statuses.
///
/// Precedence, first match wins:
///
/// 1. any `Error` gives `Error`
/// 2. any `Loading` gives `Loading`
/// 3. every step `Success` gives `Success`
/// 4. every step `Waiting` gives `Waiting` (this includes the empty set)
/// 5. anything else gives `Error`
///
/// Rule 5 means a run paused between steps (some `Success`, the rest
/// `Waiting`, nothing in flight) reports `Error`.
///
/// # Examples
///
/// ```rust
/// use stepwise_core::{aggregate, StepStatus, StepStatus::*};
///
/// assert_eq!(aggregate([Success, Loading, Waiting]), Loading);
/// assert_eq!(aggregate([Success, Waiting]), Error);
/// assert_eq!(aggregate(Vec::<StepStatus>::new()), Waiting);
/// ```
pub fn aggregate<I>(statuses: I) -> StepStatus
where
    I: IntoIterator<Item = StepStatus>,
{
    let mut total = 0usize;
    let mut loading = false;
    let mut success = 0usize;
    let mut waiting = 0usize;

    for status in statuses {
        total += 1;
        match status {
            StepStatus::Error => return StepStatus::Error,
            StepStatus::Loading => loading = true,
            StepStatus::Success => success += 1,
            StepStatus::Waiting => waiting += 1,
        }
    }

    if total == 0 {
        return StepStatus::Waiting;
    }
    if loading {
        StepStatus::Loading
    } else if success == total {
        StepStatus::Success
    } else if waiting == total {
        StepStatus::Waiting
    } else {
        StepStatus::Error
    }
}
