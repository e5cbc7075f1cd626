//! Data models for steps and their statuses.
//!
//! - [`StepStatus`]: the four states a step moves through
//! - [`StepData`]: per-step record (status, error message, last change)
//! - [`StepsMap`]: the fixed, ordered set of steps of one workflow attempt
//! - [`StepLabel`] / [`WorkflowStep`]: presentation labels for closed step
//!   enumerations
//!
//! The aggregate status of a workflow is never stored. [`aggregate`] derives
//! it from the per-step statuses on every read.

pub mod label;
pub mod status;
pub mod step;
pub mod steps_map;


pub use label::{StepLabel, WorkflowStep};
pub use status::{aggregate, StepStatus};
pub use step::StepData;
pub use steps_map::{StepKey, StepsMap};
