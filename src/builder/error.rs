//! Build errors for state machine and transition builders.

use crate::config::ConfigError;
use crate::scheduler::ScheduleError;
use thiserror::Error;

/// A problem found while assembling the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableViolation {
    #[error("'{event}' in '{from}' already leads to '{existing}', cannot also lead to '{rejected}'")]
    ConflictingTransition {
        from: String,
        event: String,
        existing: String,
        rejected: String,
    },

    #[error("State '{state}' has more than one entry action")]
    DuplicateEntryAction { state: String },

    #[error("State '{state}' has more than one exit action")]
    DuplicateExitAction { state: String },
}

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Invalid transition table: {}", format_violations(.0))]
    InvalidTable(Vec<TableViolation>),

    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    InvalidTask(#[from] ScheduleError),
}

fn format_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
