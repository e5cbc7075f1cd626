//! Step tracker: the state of every step in one workflow attempt.
//!
//! A [`StepTracker`] is built once per workflow attempt with a fixed set of
//! step ids, all `Waiting`. The caller (the sequencer) then runs each step
//! through [`StepTracker::do_step`], in whatever order its own logic
//! dictates, and reads the per-step and aggregate status at any time.
//!
//! ```text
//! ┌─────────────────┐  do_step / update  ┌─────────────────┐  subscribe  ┌─────────────────┐
//! │    Sequencer    │───────────────────▶│   StepTracker   │────────────▶│  Presentation   │
//! │ (owns ordering) │                    │  (owns state)   │  snapshots  │ (reads only)    │
//! └─────────────────┘                    └─────────────────┘             └─────────────────┘
//! ```
//!
//! State lives in a [`tokio::sync::watch`] channel. Writes are synchronous and
//! never held across an await point, so reads observe writes in program
//! order and subscribers see every change.
//!
//! # Usage
//!
//! ```rust
//! use stepwise_core::{StepStatus, StepTracker, TrackerError};
//!
//! # async fn example() -> Result<(), TrackerError> {
//! let tracker = StepTracker::new(["register", "submit"]);
//! assert_eq!(tracker.global_state(), StepStatus::Waiting);
//!
//! let answer = tracker
//!     .do_step(&"register", async { Ok::<_, TrackerError>(42) })
//!     .await?;
//! assert_eq!(answer, 42);
//! assert_eq!(tracker.status(&"register")?, StepStatus::Success);
//! # Ok(())
//! # }
//! ```

use tokio::sync::watch;

use crate::{
    error::{Result, TrackerError},
    models::{StepData, StepKey, StepStatus, StepsMap, WorkflowStep},
};

mod step_ops;


/// Holds the [`StepsMap`] of one workflow attempt.
#[derive(Debug)]
pub struct StepTracker<K: StepKey> {
    state: watch::Sender<StepsMap<K>>,
}

impl<K: StepKey> StepTracker<K> {
    /// Creates a tracker with every id seeded to `Waiting`.
    ///
    /// An empty id set is legal; its aggregate status is `Waiting`.
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self::from_map(StepsMap::from_ids(ids))
    }

    fn from_map(map: StepsMap<K>) -> Self {
        log::debug!("Tracking {} steps", map.len());
        Self {
            state: watch::Sender::new(map),
        }
    }

    /// Cloned snapshot of every step, for presentation.
    pub fn steps(&self) -> StepsMap<K> {
        self.state.borrow().clone()
    }

    /// State of one step.
    pub fn step(&self, id: &K) -> Result<StepData> {
        self.state
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| TrackerError::unknown_step(id))
    }

    /// Status of one step.
    pub fn status(&self, id: &K) -> Result<StepStatus> {
        self.state
            .borrow()
            .status(id)
            .ok_or_else(|| TrackerError::unknown_step(id))
    }

    /// Aggregate status derived from the current per-step statuses.
    pub fn global_state(&self) -> StepStatus {
        self.state.borrow().global_state()
    }

    /// Receiver notified after every status change.
    ///
    /// This is the binding point for presentation layers: they render
    /// whatever the receiver holds and wait on `changed()` for the next
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StepsMap<K>> {
        self.state.subscribe()
    }
}

impl<K: WorkflowStep> StepTracker<K> {
    /// Creates a tracker over every step of a closed workflow enumeration.
    pub fn for_workflow() -> Self {
        Self::new(K::ALL.iter().copied())
    }
}
