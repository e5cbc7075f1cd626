//! Human-readable labels for closed step enumerations.

use super::StepKey;

/// Title and optional helper text shown next to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLabel {
    pub title: &'static str,
    pub helper: Option<&'static str>,
}

impl StepLabel {
    pub const fn new(title: &'static str) -> Self {
        Self {
            title,
            helper: None,
        }
    }

    pub const fn with_helper(title: &'static str, helper: &'static str) -> Self {
        Self {
            title,
            helper: Some(helper),
        }
    }
}

/// A closed enumeration of the steps making up one workflow.
///
/// `ALL` lists the steps in execution order. Implementations write `label`
/// as an exhaustive `match`, so adding a step without a label fails to
/// compile.
///
/// # Examples
///
/// ```rust
/// use stepwise_core::{StepLabel, StepTracker, WorkflowStep};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Vote {
///     Sign,
///     Submit,
/// }
///
/// impl WorkflowStep for Vote {
///     const ALL: &'static [Self] = &[Vote::Sign, Vote::Submit];
///
///     fn label(&self) -> StepLabel {
///         match self {
///             Vote::Sign => StepLabel::new("Sign the ballot"),
///             Vote::Submit => StepLabel::new("Submit the vote"),
///         }
///     }
/// }
///
/// let tracker = StepTracker::<Vote>::for_workflow();
/// assert_eq!(tracker.steps().len(), 2);
/// ```
pub trait WorkflowStep: StepKey + Copy {
    /// Every step of the workflow, in execution order.
    const ALL: &'static [Self];

    fn label(&self) -> StepLabel;
}
