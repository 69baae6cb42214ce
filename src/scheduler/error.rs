//! Scheduler error types.

use thiserror::Error;

/// A single reason a scheduled task was rejected at construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TaskViolation {
    #[error("Delay must not be negative, got {delay}")]
    NegativeDelay { delay: f64 },

    #[error("Delay must be finite, got {delay}")]
    NonFiniteDelay { delay: f64 },
}

/// Errors that can occur when constructing scheduled tasks.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid scheduled task: {}", format_violations(.0))]
    InvalidTask(Vec<TaskViolation>),
}

fn format_violations(violations: &[TaskViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
