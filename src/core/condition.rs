//! Conditions gating scheduled tasks.
//!
//! A condition is a pure predicate over the [`Arguments`] of one evaluation
//! (previous state, current state, event that entered the current state) and
//! a read-only view of the environment. Conditions compose with [`and`],
//! [`or`], [`xor`] and [`not`], or with the `&`, `|`, `^` and `!` operators.

use super::state::{Event, State};
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::Arc;

/// Transient payload describing where a machine stands during one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arguments<S: State, E: Event> {
    /// State observed at the end of the previous tick.
    pub previous: S,
    /// State the machine is in now.
    pub current: S,
    /// Event that caused the latest transition into `current`, if any.
    pub event: Option<E>,
}

impl<S: State, E: Event> Arguments<S, E> {
    pub fn new(previous: S, current: S, event: Option<E>) -> Self {
        Self {
            previous,
            current,
            event,
        }
    }

    /// True when the state changed since the previous tick.
    pub fn entered(&self) -> bool {
        self.previous != self.current
    }

    /// True when the machine was already in `state` at the previous tick and
    /// still is.
    pub fn settled_in(&self, state: S) -> bool {
        self.previous == state && self.current == state
    }
}

type Predicate<S, E, Env> = Arc<dyn Fn(&Arguments<S, E>, &Env) -> bool + Send + Sync>;

/// Pure predicate deciding whether a scheduled task may run.
///
/// # Example
///
/// ```rust
/// use holster::core::{Arguments, Condition};
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Light { Off, On }
/// }
/// event_enum! {
///     enum Switch { Flip }
/// }
///
/// let lit: Condition<Light, Switch> = Condition::in_state(Light::On);
/// let fresh = Condition::new(|args: &Arguments<Light, Switch>, _: &()| args.entered());
/// let just_lit = lit & fresh;
///
/// assert!(just_lit.is_satisfied(&Arguments::new(Light::Off, Light::On, Some(Switch::Flip)), &()));
/// assert!(!just_lit.is_satisfied(&Arguments::new(Light::On, Light::On, None), &()));
/// ```
pub struct Condition<S: State, E: Event, Env = ()> {
    predicate: Predicate<S, E, Env>,
}

impl<S: State, E: Event, Env> Clone for Condition<S, E, Env> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State, E: Event, Env: 'static> Condition<S, E, Env> {
    /// Create a condition from a pure predicate.
    ///
    /// The predicate must be deterministic and free of side effects; the
    /// scheduler may evaluate it any number of times per frame.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Arguments<S, E>, &Env) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Check the condition against one evaluation's arguments.
    pub fn is_satisfied(&self, args: &Arguments<S, E>, env: &Env) -> bool {
        (self.predicate)(args, env)
    }

    /// Satisfied unconditionally.
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// Satisfied while the current state is `state`.
    pub fn in_state(state: S) -> Self {
        Self::new(move |args, _| args.current == state)
    }

    /// Satisfied once the machine has been observed in `state` for at least
    /// one full tick.
    pub fn settled_in(state: S) -> Self {
        Self::new(move |args, _| args.settled_in(state))
    }

    /// Satisfied while the current state was entered through `event`.
    pub fn entered_by(event: E) -> Self {
        Self::new(move |args, _| args.event == Some(event))
    }

    /// Satisfied when `query` holds for the environment, whatever the states.
    pub fn query<F>(query: F) -> Self
    where
        F: Fn(&Env) -> bool + Send + Sync + 'static,
    {
        Self::new(move |_, env| query(env))
    }
}

/// Leaf condition that is always satisfied.
pub fn always<S: State, E: Event, Env: 'static>() -> Condition<S, E, Env> {
    Condition::always()
}

/// Satisfied when both operands are.
pub fn and<S: State, E: Event, Env: 'static>(
    first: Condition<S, E, Env>,
    second: Condition<S, E, Env>,
) -> Condition<S, E, Env> {
    Condition::new(move |args, env| {
        first.is_satisfied(args, env) && second.is_satisfied(args, env)
    })
}

/// Satisfied when at least one operand is.
pub fn or<S: State, E: Event, Env: 'static>(
    first: Condition<S, E, Env>,
    second: Condition<S, E, Env>,
) -> Condition<S, E, Env> {
    Condition::new(move |args, env| {
        first.is_satisfied(args, env) || second.is_satisfied(args, env)
    })
}

/// Satisfied when exactly one operand is.
pub fn xor<S: State, E: Event, Env: 'static>(
    first: Condition<S, E, Env>,
    second: Condition<S, E, Env>,
) -> Condition<S, E, Env> {
    Condition::new(move |args, env| {
        first.is_satisfied(args, env) ^ second.is_satisfied(args, env)
    })
}

/// Satisfied when the operand is not.
pub fn not<S: State, E: Event, Env: 'static>(
    condition: Condition<S, E, Env>,
) -> Condition<S, E, Env> {
    Condition::new(move |args, env| !condition.is_satisfied(args, env))
}

impl<S: State, E: Event, Env: 'static> BitAnd for Condition<S, E, Env> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        and(self, rhs)
    }
}

impl<S: State, E: Event, Env: 'static> BitOr for Condition<S, E, Env> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        or(self, rhs)
    }
}

impl<S: State, E: Event, Env: 'static> BitXor for Condition<S, E, Env> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        xor(self, rhs)
    }
}

impl<S: State, E: Event, Env: 'static> Not for Condition<S, E, Env> {
    type Output = Self;

    fn not(self) -> Self {
        not(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Start,
        Stop,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Stop => "Stop",
            }
        }
    }

    type TestCondition = Condition<TestState, TestEvent>;

    fn constant(value: bool) -> TestCondition {
        Condition::new(move |_, _| value)
    }

    fn args() -> Arguments<TestState, TestEvent> {
        Arguments::new(TestState::Idle, TestState::Busy, Some(TestEvent::Start))
    }

    #[test]
    fn always_is_satisfied() {
        assert!(always::<TestState, TestEvent, ()>().is_satisfied(&args(), &()));
    }

    #[test]
    fn combinators_follow_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(and(constant(a), constant(b)).is_satisfied(&args(), &()), a && b);
                assert_eq!(or(constant(a), constant(b)).is_satisfied(&args(), &()), a || b);
                assert_eq!(xor(constant(a), constant(b)).is_satisfied(&args(), &()), a ^ b);
            }
            assert_eq!(not(constant(a)).is_satisfied(&args(), &()), !a);
        }
    }

    #[test]
    fn operators_match_named_combinators() {
        let a = constant(true);
        let b = constant(false);

        assert!(!(a.clone() & b.clone()).is_satisfied(&args(), &()));
        assert!((a.clone() | b.clone()).is_satisfied(&args(), &()));
        assert!((a.clone() ^ b.clone()).is_satisfied(&args(), &()));
        assert!((!b).is_satisfied(&args(), &()));
        assert!(!(!a).is_satisfied(&args(), &()));
    }

    #[test]
    fn settled_in_requires_a_full_tick() {
        let settled = TestCondition::settled_in(TestState::Busy);

        assert!(!settled.is_satisfied(&args(), &()));
        assert!(settled.is_satisfied(
            &Arguments::new(TestState::Busy, TestState::Busy, Some(TestEvent::Start)),
            &()
        ));
    }

    #[test]
    fn entered_by_checks_the_entering_event() {
        let by_start = TestCondition::entered_by(TestEvent::Start);
        let by_stop = TestCondition::entered_by(TestEvent::Stop);

        assert!(by_start.is_satisfied(&args(), &()));
        assert!(!by_stop.is_satisfied(&args(), &()));
    }

    #[test]
    fn query_reads_the_environment() {
        let loaded: Condition<TestState, TestEvent, u32> = Condition::query(|rounds| *rounds > 0);

        assert!(loaded.is_satisfied(&args(), &3));
        assert!(!loaded.is_satisfied(&args(), &0));
    }

    #[test]
    fn condition_is_deterministic() {
        let condition = TestCondition::in_state(TestState::Busy) & !TestCondition::entered_by(TestEvent::Stop);
        let first = condition.is_satisfied(&args(), &());
        let second = condition.is_satisfied(&args(), &());
        assert_eq!(first, second);
    }
}
