//! Publishing a governance proposal that is voted on offchain.
//!
//! Three steps, in order:
//!
//! 1. [`ProposalStep::RegisterAccount`]: make sure the wallet has a voting
//!    account (a no-op when it already has one)
//! 2. [`ProposalStep::CreateElection`]: publish the census and ballot
//! 3. [`ProposalStep::SubmitProposal`]: register the proposal, pointing at
//!    the election
//!
//! [`OffchainPublisher::publish`] resumes where the previous attempt failed:
//! steps that already succeeded are not run again and the election created
//! earlier is reused.

use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BackendError, PublishError},
    models::{StepLabel, StepStatus, WorkflowStep},
    sequencer::run_with_timeout,
    tracker::StepTracker,
};

/// Steps of the offchain proposal workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalStep {
    RegisterAccount,
    CreateElection,
    SubmitProposal,
}

impl WorkflowStep for ProposalStep {
    const ALL: &'static [Self] = &[
        ProposalStep::RegisterAccount,
        ProposalStep::CreateElection,
        ProposalStep::SubmitProposal,
    ];

    fn label(&self) -> StepLabel {
        match self {
            ProposalStep::RegisterAccount => StepLabel::with_helper(
                "Register account",
                "Creates your voting account if you do not have one yet",
            ),
            ProposalStep::CreateElection => StepLabel::with_helper(
                "Create election",
                "Publishes the census and the ballot",
            ),
            ProposalStep::SubmitProposal => StepLabel::with_helper(
                "Submit proposal",
                "Registers the proposal with the organization",
            ),
        }
    }
}

impl ProposalStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStep::RegisterAccount => "register-account",
            ProposalStep::CreateElection => "create-election",
            ProposalStep::SubmitProposal => "submit-proposal",
        }
    }
}

impl FromStr for ProposalStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "register-account" => Ok(ProposalStep::RegisterAccount),
            "create-election" => Ok(ProposalStep::CreateElection),
            "submit-proposal" => Ok(ProposalStep::SubmitProposal),
            _ => Err(format!("Invalid proposal step: {s}")),
        }
    }
}

impl fmt::Display for ProposalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The proposal being published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identifier of an election created by the voting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElectionId(pub String);

impl fmt::Display for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a submitted proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub String);

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Services the publisher calls out to.
#[async_trait]
pub trait ProposalBackend: Send + Sync {
    /// Whether the current wallet already has a voting account.
    async fn has_account(&self) -> Result<bool, BackendError>;

    async fn register_account(&self) -> Result<(), BackendError>;

    async fn create_election(&self, draft: &ProposalDraft) -> Result<ElectionId, BackendError>;

    async fn submit_proposal(
        &self,
        draft: &ProposalDraft,
        election: &ElectionId,
    ) -> Result<ProposalId, BackendError>;
}

/// Builder for creating and configuring publisher instances.
#[derive(Debug, Clone, Default)]
pub struct PublisherBuilder {
    step_timeout: Option<Duration>,
}

impl PublisherBuilder {
    /// Creates a new builder with default settings (no step timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long a single step may run before it is marked failed.
    pub fn with_step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Builds a publisher over the given backend, with every step waiting.
    pub fn build<B: ProposalBackend>(self, backend: B) -> OffchainPublisher<B> {
        OffchainPublisher {
            backend,
            tracker: StepTracker::for_workflow(),
            step_timeout: self.step_timeout,
            election: None,
            proposal: None,
        }
    }
}

/// Sequencer publishing one offchain proposal.
pub struct OffchainPublisher<B> {
    backend: B,
    tracker: StepTracker<ProposalStep>,
    step_timeout: Option<Duration>,
    election: Option<ElectionId>,
    proposal: Option<ProposalId>,
}

impl<B: ProposalBackend> OffchainPublisher<B> {
    /// Tracker holding the progress of the current attempt.
    pub fn tracker(&self) -> &StepTracker<ProposalStep> {
        &self.tracker
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs the workflow, resuming after the last successful step.
    ///
    /// # Errors
    ///
    /// Returns the error of the first step that fails (or times out). That
    /// step is left `Error` and the steps after it stay `Waiting`, so calling
    /// `publish` again retries from there.
    pub async fn publish(&mut self, draft: &ProposalDraft) -> Result<ProposalId, PublishError> {
        if let Some(proposal) = &self.proposal {
            info!("Proposal {proposal} already published");
            return Ok(proposal.clone());
        }

        if self.succeeded(ProposalStep::RegisterAccount) {
            info!("Account step already done, skipping");
        } else {
            self.run_step(
                ProposalStep::RegisterAccount,
                ensure_account(&self.backend),
            )
            .await?;
        }

        let election = match self.election.clone() {
            Some(election) if self.succeeded(ProposalStep::CreateElection) => {
                info!("Reusing election {election}");
                election
            }
            _ => {
                let backend = &self.backend;
                let election = self
                    .run_step(ProposalStep::CreateElection, async {
                        backend.create_election(draft).await.map_err(PublishError::from)
                    })
                    .await?;
                self.election = Some(election.clone());
                election
            }
        };

        let backend = &self.backend;
        let proposal = self
            .run_step(ProposalStep::SubmitProposal, async {
                backend
                    .submit_proposal(draft, &election)
                    .await
                    .map_err(PublishError::from)
            })
            .await?;

        info!("Published proposal {proposal} on election {election}");
        self.proposal = Some(proposal.clone());
        Ok(proposal)
    }

    /// Discards all progress so the next `publish` starts from scratch.
    pub fn restart(&mut self) {
        self.tracker.reset();
        self.election = None;
        self.proposal = None;
    }

    fn succeeded(&self, step: ProposalStep) -> bool {
        matches!(self.tracker.status(&step), Ok(StepStatus::Success))
    }

    async fn run_step<T, F>(&self, step: ProposalStep, work: F) -> Result<T, PublishError>
    where
        F: std::future::Future<Output = Result<T, PublishError>>,
    {
        match self.step_timeout {
            Some(limit) => run_with_timeout(&self.tracker, &step, limit, work).await,
            None => self.tracker.do_step(&step, work).await,
        }
    }
}

async fn ensure_account<B: ProposalBackend>(backend: &B) -> Result<(), PublishError> {
    if backend.has_account().await? {
        info!("Voting account already registered");
        return Ok(());
    }
    backend.register_account().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_step_from_str() {
        assert_eq!(
            "create-election".parse::<ProposalStep>(),
            Ok(ProposalStep::CreateElection)
        );
        assert_eq!(
            "SUBMIT_PROPOSAL".parse::<ProposalStep>(),
            Ok(ProposalStep::SubmitProposal)
        );
        assert!("vote".parse::<ProposalStep>().is_err());
    }

    #[test]
    fn test_proposal_step_names_round_trip_through_display() {
        for step in ProposalStep::ALL {
            assert_eq!(step.to_string().parse::<ProposalStep>(), Ok(*step));
        }
    }

    #[test]
    fn test_every_step_has_a_label() {
        for step in ProposalStep::ALL {
            assert!(!step.label().title.is_empty());
        }
    }
}
