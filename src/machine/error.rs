//! State engine error types.

use thiserror::Error;

/// Errors raised while processing events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Events kept triggering further events past the configured limit.
    ///
    /// This points at a cycle in the transition table or in the actions
    /// raising events. The pending queue is discarded.
    #[error("Cascade exceeded {limit} steps in state '{state}' while applying '{event}'")]
    CascadeOverflow {
        limit: usize,
        state: String,
        event: String,
    },
}
