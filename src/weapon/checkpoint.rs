//! Saved weapon handling.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::weapon::state::{PlayerEvent, PlayerState};
use serde::{Deserialize, Serialize};

/// Machine checkpoint plus the starting points of the motions in progress.
///
/// Put-back and end-of-attack motions continue from the progress sampled
/// when their state was entered, so that progress is saved alongside the
/// elapsed time rather than read back from the provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponCheckpoint {
    pub machine: Checkpoint<PlayerState, PlayerEvent>,

    /// Put-back progress sampled on entering `PutBack`
    pub initial_put_back_progress: f64,

    /// End-of-attack progress sampled on entering `WaitForAttackEnd`
    pub initial_end_attack_progress: f64,
}

impl WeaponCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.machine.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.machine.check_version()?;
        Ok(checkpoint)
    }
}
