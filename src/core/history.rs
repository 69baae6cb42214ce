//! State transition history tracking.
//!
//! The history is a bounded record of the latest transitions, stamped with
//! the machine's simulation clock (the sum of tick deltas) rather than wall
//! time.

use super::state::{Event, State};
use serde::{Deserialize, Serialize};

/// Default number of transitions kept by a history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use holster::core::StateTransition;
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Stance { Standing, Crouching }
/// }
/// event_enum! {
///     enum Input { Crouch }
/// }
///
/// let transition = StateTransition {
///     from: Stance::Standing,
///     to: Stance::Crouching,
///     event: Input::Crouch,
///     at_seconds: 1.5,
/// };
/// assert_eq!(transition.to, Stance::Crouching);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that caused the transition
    pub event: E,
    /// Simulation clock when the transition occurred
    pub at_seconds: f64,
}

/// Ordered, bounded history of state transitions.
///
/// Once `capacity` transitions are stored, recording a new one evicts the
/// oldest.
///
/// # Example
///
/// ```rust
/// use holster::core::{StateHistory, StateTransition};
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Step { A, B, C }
/// }
/// event_enum! {
///     enum Go { Next }
/// }
///
/// let mut history = StateHistory::with_capacity(2);
/// history.record(StateTransition { from: Step::A, to: Step::B, event: Go::Next, at_seconds: 0.0 });
/// history.record(StateTransition { from: Step::B, to: Step::C, event: Go::Next, at_seconds: 0.5 });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Step::A, &Step::B, &Step::C]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: Vec<StateTransition<S, E>>,
    capacity: usize,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a new empty history keeping at most `capacity` transitions.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.remove(0);
        }
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the oldest
    /// retained transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Simulation time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<f64> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(last.at_seconds - first.at_seconds),
            _ => None,
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Advance,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "Advance"
        }
    }

    fn transition(from: TestState, to: TestState, at_seconds: f64) -> StateTransition<TestState, TestEvent> {
        StateTransition {
            from,
            to,
            event: TestEvent::Advance,
            at_seconds,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState, TestEvent> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        history.record(transition(TestState::Initial, TestState::Processing, 0.0));

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|t| t.to), Some(TestState::Processing));
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(transition(TestState::Initial, TestState::Processing, 0.0));
        history.record(transition(TestState::Processing, TestState::Complete, 1.0));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn full_history_evicts_oldest() {
        let mut history = StateHistory::with_capacity(2);
        history.record(transition(TestState::Initial, TestState::Processing, 0.0));
        history.record(transition(TestState::Processing, TestState::Complete, 1.0));
        history.record(transition(TestState::Complete, TestState::Initial, 2.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].from, TestState::Processing);
        assert_eq!(history.duration(), Some(1.0));
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(transition(TestState::Initial, TestState::Processing, 0.0));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_uses_simulation_clock() {
        let mut history = StateHistory::new();
        history.record(transition(TestState::Initial, TestState::Processing, 0.25));
        history.record(transition(TestState::Processing, TestState::Complete, 1.0));

        assert_eq!(history.duration(), Some(0.75));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition(TestState::Initial, TestState::Processing, 0.5));

        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory<TestState, TestEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.transitions(), history.transitions());
        assert_eq!(restored.capacity(), 4);
    }
}
