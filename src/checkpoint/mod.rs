//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures the dynamic part of a machine (states, timers,
//! history, remaining task executions) so a game can be saved and loaded.
//! The transition table, actions and task definitions are code and are
//! rebuilt by the loader.

use crate::core::{Event, State, StateHistory};
use crate::scheduler::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Remaining executions of a bounded scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCount {
    pub id: TaskId,
    pub remaining: u32,
}

/// Serializable checkpoint of state machine state.
/// Does NOT include transitions or actions (not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State, E: Event> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created, informational only
    pub timestamp: DateTime<Utc>,

    pub current_state: S,

    /// State observed at the end of the latest tick
    pub previous_state: S,

    /// Event that entered the current state
    pub entry_event: Option<E>,

    pub elapsed_since_transition: f64,

    pub changed_last_tick: bool,

    /// Simulation clock in seconds
    pub clock: f64,

    /// Retained transition history
    pub history: StateHistory<S, E>,

    /// Remaining executions of every live bounded task
    pub tasks: Vec<TaskCount>,
}

impl<S: State, E: Event> Checkpoint<S, E> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub(crate) fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}
