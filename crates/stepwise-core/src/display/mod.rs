//! Text presentation of tracker state.
//!
//! The tracker exposes plain snapshots; this module turns them into markdown
//! for terminal output:
//!
//! - [`progress`]: one line per step with its status marker
//! - [`action`]: the primary action offered for an aggregate status
//!
//! ```rust
//! use stepwise_core::{
//!     display::{PrimaryAction, Progress},
//!     ProposalStep, StepTracker,
//! };
//!
//! let tracker = StepTracker::<ProposalStep>::for_workflow();
//! println!("{}", Progress(tracker.steps()));
//! println!("{}", PrimaryAction::for_state(tracker.global_state()));
//! ```

pub mod action;
pub mod progress;

pub use action::PrimaryAction;
pub use progress::Progress;
