//! Helpers for sequencers layered on top of a [`StepTracker`].
//!
//! The tracker has no notion of time or of external progress reports. These
//! helpers add both without the tracker knowing which one drove a change:
//!
//! - [`run_with_timeout`] races a step's work against a timer
//! - [`follow_progress`] mirrors a stream of progress events reported by an
//!   external service into the tracker

use std::{fmt, future::Future, pin::pin, time::Duration};

use futures::{Stream, StreamExt};
use log::{debug, warn};

use crate::{
    error::{Result, TrackerError},
    models::{StepKey, StepStatus},
    tracker::StepTracker,
};

/// Runs `work` through [`StepTracker::do_step`], giving up after `limit`.
///
/// When the timer wins, the work is dropped, the step is marked `Error` with
/// a timeout message and `TrackerError::Timeout` is returned.
pub async fn run_with_timeout<K, T, E, F>(
    tracker: &StepTracker<K>,
    id: &K,
    limit: Duration,
    work: F,
) -> std::result::Result<T, E>
where
    K: StepKey,
    F: Future<Output = std::result::Result<T, E>>,
    E: From<TrackerError> + fmt::Display,
{
    match tokio::time::timeout(limit, tracker.do_step(id, work)).await {
        Ok(result) => result,
        Err(_) => {
            let err = TrackerError::timeout(id, limit);
            warn!("{err}");
            tracker.update_step_status(id, StepStatus::Error, Some(err.to_string()))?;
            Err(err.into())
        }
    }
}

/// A progress report about one step, emitted by an external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepProgress<K> {
    Started(K),
    Completed(K),
    Failed(K, String),
}

impl<K> StepProgress<K> {
    pub fn step(&self) -> &K {
        match self {
            StepProgress::Started(id)
            | StepProgress::Completed(id)
            | StepProgress::Failed(id, _) => id,
        }
    }
}

/// Consumes a finite stream of progress events, applying each to the tracker.
///
/// Returns the number of events applied. Stops at the first event naming an
/// undeclared step.
pub async fn follow_progress<K, S>(tracker: &StepTracker<K>, events: S) -> Result<usize>
where
    K: StepKey,
    S: Stream<Item = StepProgress<K>>,
{
    let mut events = pin!(events);
    let mut applied = 0;

    while let Some(event) = events.next().await {
        debug!("Progress event: {event:?}");
        match event {
            StepProgress::Started(id) => {
                tracker.update_step_status(&id, StepStatus::Loading, None)?
            }
            StepProgress::Completed(id) => {
                tracker.update_step_status(&id, StepStatus::Success, None)?
            }
            StepProgress::Failed(id, message) => {
                tracker.update_step_status(&id, StepStatus::Error, Some(message))?
            }
        }
        applied += 1;
    }

    Ok(applied)
}
