//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for creating state machines
//! with minimal boilerplate while maintaining type safety.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, TableViolation};
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State};
use crate::machine::Transition;

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use holster::builder::simple_transition;
/// use holster::machine::Transition;
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Magazine {
///         Out,
///         In,
///     }
/// }
/// event_enum! {
///     enum Hand {
///         Insert,
///     }
/// }
///
/// let transition: Transition<Magazine, Hand, ()> =
///     simple_transition(Magazine::Out, Hand::Insert, Magazine::In);
/// assert!(transition.can_execute(Magazine::Out, Hand::Insert, &()));
/// ```
pub fn simple_transition<S, E, Env>(from: S, event: E, to: S) -> Transition<S, E, Env>
where
    S: State,
    E: Event,
{
    Transition {
        from,
        event,
        to,
        guard: None,
    }
}

/// Create a transition with a guard predicate over the environment.
///
/// # Example
///
/// ```
/// use holster::builder::guarded_transition;
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Chamber {
///         Empty,
///         Loaded,
///     }
/// }
/// event_enum! {
///     enum Slide {
///         Rack,
///     }
/// }
///
/// let transition = guarded_transition(Chamber::Empty, Slide::Rack, Chamber::Loaded, |rounds: &u32| {
///     *rounds > 0
/// });
/// assert!(transition.can_execute(Chamber::Empty, Slide::Rack, &5));
/// assert!(!transition.can_execute(Chamber::Empty, Slide::Rack, &0));
/// ```
pub fn guarded_transition<S, E, Env, F>(from: S, event: E, to: S, guard: F) -> Transition<S, E, Env>
where
    S: State,
    E: Event,
    F: Fn(&Env) -> bool + Send + Sync + 'static,
{
    Transition {
        from,
        event,
        to,
        guard: Some(Guard::new(guard)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Start,
            Middle,
            End,
        }
    }

    crate::event_enum! {
        enum TestEvent {
            Next,
        }
    }

    #[test]
    fn simple_transition_builds() {
        let transition: Transition<TestState, TestEvent, ()> =
            simple_transition(TestState::Start, TestEvent::Next, TestState::Middle);

        assert_eq!(transition.from, TestState::Start);
        assert_eq!(transition.to, TestState::Middle);
        assert!(transition.can_execute(TestState::Start, TestEvent::Next, &()));
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let transition = guarded_transition(
            TestState::Middle,
            TestEvent::Next,
            TestState::End,
            |ready: &bool| *ready,
        );

        assert!(transition.can_execute(TestState::Middle, TestEvent::Next, &true));
        assert!(!transition.can_execute(TestState::Middle, TestEvent::Next, &false));
    }
}
