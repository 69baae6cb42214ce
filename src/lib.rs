//! Holster: frame-driven weapon handling for games
//!
//! Holster pairs a small finite-state machine with a condition-gated
//! scheduler. Input handlers fire events synchronously; once per frame the
//! game loop ticks the machine, which evaluates its scheduled tasks and
//! applies the events they raise. Waiting is expressed as staying in a state
//! until a condition holds, so nothing blocks and no timer thread is needed.
//!
//! # Core Concepts
//!
//! - **State / Event**: closed vocabularies, usually declared with
//!   [`state_enum!`] and [`event_enum!`]
//! - **Transitions**: `(from, event) -> to`, optionally guarded
//! - **Conditions**: pure predicates over previous state, current state and
//!   the entering event, composable with `&`, `|`, `^` and `!`
//! - **Scheduled tasks**: actions run once their condition has held for a
//!   delay, a bounded number of times or indefinitely
//! - **Weapon handling**: [`weapon::WeaponActionController`] drives any
//!   [`weapon::WeaponActionProvider`] through pulling out, firing, reloading
//!   and switching weapons
//!
//! # Example
//!
//! ```rust
//! use holster::builder::{simple_transition, StateMachineBuilder};
//! use holster::core::Condition;
//! use holster::scheduler::ScheduledTask;
//! use holster::{event_enum, state_enum};
//!
//! state_enum! {
//!     pub enum Lamp { Off, On }
//! }
//! event_enum! {
//!     pub enum Switch { Flip, Timeout }
//! }
//!
//! // Switch the lamp off after two seconds.
//! let mut machine = StateMachineBuilder::<Lamp, Switch, ()>::new()
//!     .initial(Lamp::Off)
//!     .add_transition(simple_transition(Lamp::Off, Switch::Flip, Lamp::On))
//!     .add_transition(simple_transition(Lamp::On, Switch::Timeout, Lamp::Off))
//!     .schedule(
//!         ScheduledTask::repeating(Condition::settled_in(Lamp::On), 2.0, |ctx| {
//!             ctx.fire(Switch::Timeout)
//!         })
//!         .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! machine.fire_event(Switch::Flip, &mut ()).unwrap();
//! for _ in 0..4 {
//!     machine.tick(0.5, &mut ()).unwrap();
//! }
//! assert_eq!(machine.current_state(), Lamp::On);
//!
//! machine.tick(0.5, &mut ()).unwrap();
//! machine.tick(0.5, &mut ()).unwrap();
//! assert_eq!(machine.current_state(), Lamp::Off);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod inventory;
pub mod machine;
pub mod scheduler;
pub mod weapon;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{Config, ConfigError, MachineConfig};
pub use core::{Arguments, Condition, Event, Guard, State, StateHistory, StateTransition, Timer};
pub use machine::{MachineError, StateMachine};
pub use scheduler::{ScheduledTask, Scheduler, TaskId};
pub use weapon::{PlayerEvent, PlayerState, WeaponActionController, WeaponActionProvider};
