use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use stepwise_core::{BackendError, ElectionId, ProposalBackend, ProposalDraft, ProposalId, ProposalStep};

/// Scripted backend: records every call and fails steps a configured number
/// of times before letting them through.
#[derive(Default)]
pub struct MockBackend {
    has_account: bool,
    hang_on: Option<ProposalStep>,
    failures: Mutex<HashMap<ProposalStep, u32>>,
    calls: Mutex<Vec<ProposalStep>>,
    elections: AtomicU32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wallet already has a voting account.
    pub fn with_account(mut self) -> Self {
        self.has_account = true;
        self
    }

    /// Fail `step` the next `times` calls.
    pub fn failing(self, step: ProposalStep, times: u32) -> Self {
        self.failures.lock().unwrap().insert(step, times);
        self
    }

    /// Never settle calls for `step`.
    pub fn hanging_on(mut self, step: ProposalStep) -> Self {
        self.hang_on = Some(step);
        self
    }

    pub fn calls(&self) -> Vec<ProposalStep> {
        self.calls.lock().unwrap().clone()
    }

    pub fn elections_created(&self) -> u32 {
        self.elections.load(Ordering::SeqCst)
    }

    async fn attempt(&self, step: ProposalStep) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(step);
        if self.hang_on == Some(step) {
            std::future::pending::<()>().await;
        }
        let mut failures = self.failures.lock().unwrap();
        match failures.get_mut(&step) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(BackendError::new(format!("{step} unavailable")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProposalBackend for MockBackend {
    async fn has_account(&self) -> Result<bool, BackendError> {
        Ok(self.has_account)
    }

    async fn register_account(&self) -> Result<(), BackendError> {
        self.attempt(ProposalStep::RegisterAccount).await
    }

    async fn create_election(&self, _draft: &ProposalDraft) -> Result<ElectionId, BackendError> {
        self.attempt(ProposalStep::CreateElection).await?;
        let n = self.elections.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ElectionId(format!("election-{n}")))
    }

    async fn submit_proposal(
        &self,
        _draft: &ProposalDraft,
        election: &ElectionId,
    ) -> Result<ProposalId, BackendError> {
        self.attempt(ProposalStep::SubmitProposal).await?;
        Ok(ProposalId(format!("proposal-for-{election}")))
    }
}

pub fn draft() -> ProposalDraft {
    ProposalDraft {
        title: "Fund the community grants round".to_string(),
        description: Some("Allocate 10k to grants".to_string()),
    }
}
