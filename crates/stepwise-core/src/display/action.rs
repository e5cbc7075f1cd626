//! Primary action derived from the aggregate status.

use std::fmt;

use crate::models::StepStatus;

/// Label and enablement of the single button driving a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryAction {
    pub label: &'static str,
    pub enabled: bool,
}

impl PrimaryAction {
    /// Maps an aggregate status to the action offered to the user.
    ///
    /// Retry stays disabled while anything is loading, which keeps a step
    /// from being started twice at once.
    pub fn for_state(global: StepStatus) -> Self {
        match global {
            StepStatus::Waiting => Self {
                label: "Start",
                enabled: true,
            },
            StepStatus::Loading => Self {
                label: "Working",
                enabled: false,
            },
            StepStatus::Success => Self {
                label: "Done",
                enabled: true,
            },
            StepStatus::Error => Self {
                label: "Try again",
                enabled: true,
            },
        }
    }
}

impl fmt::Display for PrimaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "[{}]", self.label)
        } else {
            write!(f, "[{}] (disabled)", self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_action_labels() {
        assert_eq!(PrimaryAction::for_state(StepStatus::Waiting).label, "Start");
        assert_eq!(PrimaryAction::for_state(StepStatus::Success).label, "Done");
        assert_eq!(PrimaryAction::for_state(StepStatus::Error).label, "Try again");
    }

    #[test]
    fn test_primary_action_disabled_while_loading() {
        let action = PrimaryAction::for_state(StepStatus::Loading);
        assert!(!action.enabled);
        assert_eq!(action.to_string(), "[Working] (disabled)");
    }
}
