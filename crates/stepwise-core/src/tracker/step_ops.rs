//! Status mutation operations for the StepTracker.

use std::{fmt, future::Future};

use log::debug;

use super::StepTracker;
use crate::{
    error::{Result, TrackerError},
    models::{StepData, StepKey, StepStatus},
};

impl<K: StepKey> StepTracker<K> {
    /// Replaces the state of one step.
    ///
    /// Any previous error message is cleared unless `status` is `Error`. No
    /// other step is touched.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownStep` if `id` was not declared; the map
    /// is left unmodified and subscribers are not notified.
    pub fn update_step_status(
        &self,
        id: &K,
        status: StepStatus,
        error_message: Option<String>,
    ) -> Result<()> {
        self.write(id, StepData::changed(status, error_message))
    }

    /// Runs one step's work, recording its progress.
    ///
    /// The step goes to `Loading` before `work` is first polled, then to
    /// `Success` or `Error` once it settles. The work's own value or error
    /// is handed back unchanged; on failure its message is kept in the step's
    /// `error_message`.
    ///
    /// Running `do_step` concurrently on two different ids is fine. Running it
    /// twice at once on the same id is not supported.
    ///
    /// # Errors
    ///
    /// Returns the work's error, or `E::from(TrackerError::UnknownStep)` if
    /// `id` was not declared, in which case `work` is never polled.
    pub async fn do_step<T, E, F>(&self, id: &K, work: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: From<TrackerError> + fmt::Display,
    {
        self.write(id, StepData::changed(StepStatus::Loading, None))?;

        match work.await {
            Ok(value) => {
                self.write(id, StepData::changed(StepStatus::Success, None))?;
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                self.write(id, StepData::changed(StepStatus::Error, Some(message)))?;
                Err(err)
            }
        }
    }

    /// Puts every step back to `Waiting` for a fresh attempt.
    pub fn reset(&self) {
        debug!("Resetting all steps to waiting");
        self.state.send_modify(|map| map.reset());
    }

    fn write(&self, id: &K, data: StepData) -> Result<()> {
        let status = data.status;
        let known = self.state.send_if_modified(|map| map.replace(id, data));
        if !known {
            return Err(TrackerError::unknown_step(id));
        }
        debug!("Step {id:?} -> {status}");
        Ok(())
    }
}
