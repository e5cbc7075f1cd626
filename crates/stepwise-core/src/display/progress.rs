//! Progress list for a workflow snapshot.

use std::fmt;

use crate::models::{StepsMap, WorkflowStep};

/// Newtype wrapper rendering a snapshot as a markdown progress list.
///
/// Each step becomes one line with its status marker and title. Failed steps
/// get their error message on the following line; waiting and running steps
/// show their helper text if they have one.
///
/// # Examples
///
/// ```rust
/// use stepwise_core::{display::Progress, ProposalStep, StepStatus, StepTracker};
///
/// let tracker = StepTracker::<ProposalStep>::for_workflow();
/// tracker
///     .update_step_status(&ProposalStep::RegisterAccount, StepStatus::Success, None)
///     .unwrap();
///
/// let output = Progress(tracker.steps()).to_string();
/// assert!(output.contains("- ✓ Register account"));
/// assert!(output.contains("- ○ Create election"));
/// ```
pub struct Progress<K: WorkflowStep>(pub StepsMap<K>);

impl<K: WorkflowStep> fmt::Display for Progress<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps.");
        }

        for (id, data) in &self.0 {
            let label = id.label();
            writeln!(f, "- {} {}", data.status.marker(), label.title)?;

            match (&data.error_message, label.helper) {
                (Some(message), _) => writeln!(f, "  *Failed: {message}*")?,
                (None, Some(helper)) if !data.status.is_terminal() => {
                    writeln!(f, "  {helper}")?
                }
                _ => {}
            }
        }
        Ok(())
    }
}
