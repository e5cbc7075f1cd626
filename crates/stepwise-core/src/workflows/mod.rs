//! Concrete sequencers built on the step tracker.

pub mod offchain_proposal;

pub use offchain_proposal::{
    ElectionId, OffchainPublisher, ProposalBackend, ProposalDraft, ProposalId, ProposalStep,
    PublisherBuilder,
};
