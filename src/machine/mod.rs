//! Frame-driven state engine.
//!
//! The engine combines event-driven transitions looked up in a
//! (state, event) table with time-driven transitions raised by the
//! scheduler during [`StateMachine::tick`].

pub mod engine;
pub mod error;
pub mod transition;

pub use engine::StateMachine;
pub use error::MachineError;
pub use transition::Transition;
