//! Player weapon handling built on the state engine.
//!
//! [`build_weapon_machine`] assembles the transition table and the
//! persistent tasks that detect motion completion.
//! [`WeaponActionController`] wraps the machine for input handlers and the
//! game loop, delegating gameplay to a [`WeaponActionProvider`].

pub mod checkpoint;
pub mod controller;
pub mod error;
pub mod machine;
pub mod provider;
pub mod state;

pub use checkpoint::WeaponCheckpoint;
pub use controller::WeaponActionController;
pub use error::ControllerError;
pub use machine::{build_weapon_machine, WeaponEnv, WeaponStateMachine};
pub use provider::{clamp_progress, motion_progress, WeaponActionProvider};
pub use state::{PlayerEvent, PlayerState, SelectionDirection};
