//! Core state machine vocabulary and pure building blocks.
//!
//! This module contains the pieces every machine is assembled from:
//! - State and event definitions via the `State` and `Event` traits
//! - Guards on transitions and conditions on scheduled tasks
//! - Bounded history of transitions
//! - The action context and the frame timer
//!
//! Guards and conditions are pure; all mutation happens through an
//! [`ActionContext`] handed out by the machine.

pub mod condition;
mod context;
mod guard;
mod history;
mod state;
mod timer;

pub use condition::{always, and, not, or, xor, Arguments, Condition};
pub use context::{Action, ActionContext};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use state::{Event, State};
pub use timer::{FixedStepTimer, Timer};
