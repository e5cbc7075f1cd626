//! Command handlers and their clap argument wrappers.
//!
//! Argument structs carry the clap attributes and convert into core types
//! (`ProposalDraft`, the simulated backend) through `From`, keeping the core
//! crate free of CLI concerns.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use log::{info, warn};
use stepwise_core::{
    display::{PrimaryAction, Progress},
    ProposalDraft, ProposalStep, PublisherBuilder, StepTracker, StepsMap, WorkflowStep,
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{backend::SimulatedBackend, renderer::TerminalRenderer};

/// Publish a proposal against the simulated backend
#[derive(Args)]
pub struct RunArgs {
    /// Title of the proposal
    #[arg(long, default_value = "Untitled proposal")]
    pub title: String,
    #[arg(short, long, help = "Optional description of the proposal")]
    pub description: Option<String>,
    #[arg(long, help = "Step that should fail")]
    pub fail_at: Option<StepArg>,
    #[arg(
        long,
        default_value_t = 1,
        help = "How many times the --fail-at step fails before succeeding"
    )]
    pub failures: u32,
    #[arg(long, default_value_t = 3, help = "Maximum number of attempts")]
    pub attempts: u32,
    #[arg(long, default_value_t = 20, help = "Simulated latency of each call, in milliseconds")]
    pub delay_ms: u64,
    #[arg(long, help = "Fail a step that runs longer than this, in milliseconds")]
    pub timeout_ms: Option<u64>,
    #[arg(long, help = "The wallet already has a voting account")]
    pub has_account: bool,
    #[arg(long, help = "Print the final state as JSON")]
    pub json: bool,
}

impl From<&RunArgs> for ProposalDraft {
    fn from(val: &RunArgs) -> Self {
        ProposalDraft {
            title: val.title.clone(),
            description: val.description.clone(),
        }
    }
}

impl From<&RunArgs> for SimulatedBackend {
    fn from(val: &RunArgs) -> Self {
        let backend = SimulatedBackend::new(Duration::from_millis(val.delay_ms), val.has_account);
        match val.fail_at {
            Some(step) => backend.failing(step.into(), val.failures),
            None => backend,
        }
    }
}

/// Command-line representation of the proposal workflow steps.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    RegisterAccount,
    CreateElection,
    SubmitProposal,
}

impl From<StepArg> for ProposalStep {
    fn from(val: StepArg) -> Self {
        match val {
            StepArg::RegisterAccount => ProposalStep::RegisterAccount,
            StepArg::CreateElection => ProposalStep::CreateElection,
            StepArg::SubmitProposal => ProposalStep::SubmitProposal,
        }
    }
}

/// Runs CLI commands and renders their output.
pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    /// Lists every step of the proposal workflow with its helper text.
    pub fn list_steps(&self) -> Result<()> {
        let mut output = String::from("# Proposal workflow\n\n");
        for (index, step) in ProposalStep::ALL.iter().enumerate() {
            let label = step.label();
            output.push_str(&format!("{}. {} (`{}`)\n", index + 1, label.title, step));
            if let Some(helper) = label.helper {
                output.push_str(&format!("   {helper}\n"));
            }
        }
        self.renderer.render(&output)
    }

    /// Publishes a proposal, retrying up to `--attempts` times.
    pub async fn run(&self, args: RunArgs) -> Result<()> {
        if args.attempts == 0 {
            bail!("--attempts must be at least 1");
        }

        let draft = ProposalDraft::from(&args);
        let mut publisher = PublisherBuilder::new()
            .with_step_timeout(args.timeout_ms.map(Duration::from_millis))
            .build(SimulatedBackend::from(&args));
        let watcher = watch_progress(publisher.tracker());

        let mut last_error = None;
        let mut proposal = None;
        for attempt in 1..=args.attempts {
            info!("Attempt {attempt} of {}", args.attempts);
            let result = publisher.publish(&draft).await;

            if !args.json {
                self.render_attempt(attempt, publisher.tracker())?;
            }
            match result {
                Ok(id) => {
                    proposal = Some(id);
                    break;
                }
                Err(err) => {
                    warn!("Attempt {attempt} failed: {err}");
                    last_error = Some(err);
                }
            }
        }

        let steps = publisher.tracker().steps();
        drop(publisher);
        watcher.await.context("Progress watcher failed")?;

        if args.json {
            let output = serde_json::json!({
                "proposal": proposal.as_ref().map(|id| id.to_string()),
                "global_state": steps.global_state(),
                "steps": steps,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize state")?
            );
        }

        match (proposal, last_error) {
            (Some(id), _) => {
                if !args.json {
                    self.renderer
                        .render(&format!("Success: published proposal `{id}`\n"))?;
                }
                Ok(())
            }
            (None, Some(err)) => Err(err)
                .with_context(|| format!("Publishing failed after {} attempts", args.attempts)),
            (None, None) => bail!("Publishing did not run"),
        }
    }

    fn render_attempt(&self, attempt: u32, tracker: &StepTracker<ProposalStep>) -> Result<()> {
        let markdown = format!(
            "## Attempt {attempt}\n\n{}\n{}\n\n",
            Progress(tracker.steps()),
            PrimaryAction::for_state(tracker.global_state())
        );
        self.renderer.render(&markdown)
    }
}

/// Logs every snapshot published by the tracker until it is dropped.
fn watch_progress(tracker: &StepTracker<ProposalStep>) -> JoinHandle<()> {
    let mut rx: watch::Receiver<StepsMap<ProposalStep>> = tracker.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let steps = rx.borrow_and_update().clone();
            let summary: Vec<String> = steps
                .iter()
                .map(|(step, data)| format!("{step}={}", data.status))
                .collect();
            info!("[{}] {}", steps.global_state(), summary.join(" "));
        }
    })
}
