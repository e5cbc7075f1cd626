//! Core library for tracking multi-step asynchronous workflows.
//!
//! A workflow (publishing a proposal, casting a vote, sending a transaction)
//! is a fixed set of named steps, each of which runs some async work. This
//! crate keeps the status of every step, derives one aggregate status from
//! them, and provides a guarded way to run a step's work while keeping that
//! state consistent.
//!
//! # Architecture
//!
//! - [`models`]: step statuses, per-step records, the ordered step map and
//!   step labels
//! - [`tracker`]: the [`StepTracker`] itself
//! - [`sequencer`]: helpers for the code that decides which step runs when
//!   (timeouts, external progress streams)
//! - [`workflows`]: concrete sequencers, currently offchain proposal
//!   publishing
//! - [`display`]: markdown rendering of tracker snapshots
//!
//! # Quick Start
//!
//! ```rust
//! use stepwise_core::{StepStatus, StepTracker, TrackerError};
//!
//! # async fn example() -> Result<(), TrackerError> {
//! let tracker = StepTracker::new(["approve", "deposit"]);
//!
//! tracker.do_step(&"approve", async { Ok::<_, TrackerError>(()) }).await?;
//! // One step done, nothing in flight
//! assert_eq!(tracker.global_state(), StepStatus::Error);
//!
//! tracker.do_step(&"deposit", async { Ok::<_, TrackerError>(()) }).await?;
//! assert_eq!(tracker.global_state(), StepStatus::Success);
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod sequencer;
pub mod tracker;
pub mod workflows;

// Re-export commonly used types
pub use error::{BackendError, PublishError, Result, TrackerError};
pub use models::{aggregate, StepData, StepKey, StepLabel, StepStatus, StepsMap, WorkflowStep};
pub use sequencer::{follow_progress, run_with_timeout, StepProgress};
pub use tracker::StepTracker;
pub use workflows::{
    ElectionId, OffchainPublisher, ProposalBackend, ProposalDraft, ProposalId, ProposalStep,
    PublisherBuilder,
};
