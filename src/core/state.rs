//! Core State and Event traits for state machine vocabularies.
//!
//! States and events are small closed enumerations. They are copied freely,
//! used as table keys, and serialized into checkpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: states key the transition table and are
///   compared on every tick
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use holster::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for signals that may cause a transition.
///
/// Events carry no payload; anything an action needs is read from the
/// environment passed into the machine.
pub trait Event:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashSet;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Holstered,
        Drawn,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Holstered => "Holstered",
                Self::Drawn => "Drawn",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Draw,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "Draw"
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Holstered.name(), "Holstered");
        assert_eq!(TestState::Drawn.name(), "Drawn");
        assert_eq!(TestEvent::Draw.name(), "Draw");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Drawn;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn states_can_key_hash_sets() {
        let mut seen = HashSet::new();
        seen.insert(TestState::Holstered);
        seen.insert(TestState::Holstered);
        seen.insert(TestState::Drawn);
        assert_eq!(seen.len(), 2);
    }
}
