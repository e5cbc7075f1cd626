//! Simulated proposal backend for driving the workflow from the terminal.
//!
//! Each call sleeps for a configurable delay, then succeeds or fails according
//! to the failure script given on the command line.

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use log::debug;
use stepwise_core::{
    BackendError, ElectionId, ProposalBackend, ProposalDraft, ProposalId, ProposalStep,
};

/// Backend whose failures are scripted up front.
pub struct SimulatedBackend {
    delay: Duration,
    has_account: bool,
    fail_at: Option<ProposalStep>,
    remaining_failures: AtomicU32,
    elections: AtomicU32,
}

impl SimulatedBackend {
    pub fn new(delay: Duration, has_account: bool) -> Self {
        Self {
            delay,
            has_account,
            fail_at: None,
            remaining_failures: AtomicU32::new(0),
            elections: AtomicU32::new(0),
        }
    }

    /// Makes `step` fail on its next `times` calls.
    pub fn failing(mut self, step: ProposalStep, times: u32) -> Self {
        self.fail_at = Some(step);
        self.remaining_failures = AtomicU32::new(times);
        self
    }

    async fn call(&self, step: ProposalStep) -> Result<(), BackendError> {
        debug!("Simulating {step}");
        tokio::time::sleep(self.delay).await;

        if self.fail_at != Some(step) {
            return Ok(());
        }
        let consumed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match consumed {
            Ok(_) => Err(BackendError::new(format!("simulated failure in {step}"))),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl ProposalBackend for SimulatedBackend {
    async fn has_account(&self) -> Result<bool, BackendError> {
        Ok(self.has_account)
    }

    async fn register_account(&self) -> Result<(), BackendError> {
        self.call(ProposalStep::RegisterAccount).await
    }

    async fn create_election(&self, draft: &ProposalDraft) -> Result<ElectionId, BackendError> {
        self.call(ProposalStep::CreateElection).await?;
        let n = self.elections.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Created election {n} for {:?}", draft.title);
        Ok(ElectionId(format!("election-{n}")))
    }

    async fn submit_proposal(
        &self,
        _draft: &ProposalDraft,
        election: &ElectionId,
    ) -> Result<ProposalId, BackendError> {
        self.call(ProposalStep::SubmitProposal).await?;
        Ok(ProposalId(format!("{election}/proposal")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProposalDraft {
        ProposalDraft {
            title: "Test".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_scripted_failures_run_out() {
        let backend = SimulatedBackend::new(Duration::ZERO, false)
            .failing(ProposalStep::CreateElection, 2);

        assert!(backend.create_election(&draft()).await.is_err());
        assert!(backend.create_election(&draft()).await.is_err());
        let election = backend.create_election(&draft()).await.unwrap();
        assert_eq!(election, ElectionId("election-1".to_string()));
    }

    #[tokio::test]
    async fn test_other_steps_unaffected() {
        let backend = SimulatedBackend::new(Duration::ZERO, false)
            .failing(ProposalStep::SubmitProposal, 1);

        assert!(backend.register_account().await.is_ok());
        assert!(backend.create_election(&draft()).await.is_ok());
    }
}
