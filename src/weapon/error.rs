use crate::builder::BuildError;
use crate::machine::MachineError;
use thiserror::Error;

/// Errors raised while setting up a weapon controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to build weapon machine: {0}")]
    Build(#[from] BuildError),

    #[error("weapon machine failed to start: {0}")]
    Start(#[from] MachineError),
}
