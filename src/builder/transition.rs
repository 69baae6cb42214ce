//! Builder for constructing state transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::machine::Transition;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, E: Event, Env> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    guard: Option<Guard<Env>>,
}

impl<S: State, E: Event, Env> TransitionBuilder<S, E, Env> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<Env>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Env) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E, Env>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from,
            event,
            to,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event, Env> Default for TransitionBuilder<S, E, Env> {
    fn default() -> Self {
        Self::new()
    }
}
