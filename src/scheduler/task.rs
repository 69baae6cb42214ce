//! Scheduled tasks: a condition, an action, an execution count and a delay.

use crate::core::{Action, ActionContext, Condition, Event, State};
use crate::scheduler::error::{ScheduleError, TaskViolation};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Deferred, possibly repeated action gated by a [`Condition`].
///
/// The action runs once the condition has held for `delay` seconds of
/// accumulated satisfied time. A bounded task runs at most
/// `execution_count` times; a task built with [`ScheduledTask::repeating`]
/// runs for as long as it stays registered.
///
/// # Example
///
/// ```rust
/// use holster::core::Condition;
/// use holster::scheduler::ScheduledTask;
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Open, Closed }
/// }
/// event_enum! {
///     enum Push { Close }
/// }
///
/// let auto_close = ScheduledTask::<Door, Push, ()>::new(
///     Condition::settled_in(Door::Open),
///     1,
///     3.0,
///     |ctx| ctx.fire(Push::Close),
/// )
/// .unwrap()
/// .named("auto-close");
///
/// assert_eq!(auto_close.execution_count(), Some(1));
/// assert!(ScheduledTask::<Door, Push, ()>::new(Condition::always(), 1, -1.0, |_| {}).is_err());
/// ```
pub struct ScheduledTask<S: State, E: Event, Env> {
    condition: Condition<S, E, Env>,
    execution_count: Option<u32>,
    delay: f64,
    action: Action<S, E, Env>,
    name: Option<String>,
}

impl<S: State, E: Event, Env: 'static> ScheduledTask<S, E, Env> {
    /// Create a task that may run at most `execution_count` times.
    ///
    /// A count of 0 yields an inert task that never runs.
    pub fn new<F>(
        condition: Condition<S, E, Env>,
        execution_count: u32,
        delay_seconds: f64,
        action: F,
    ) -> Result<Self, ScheduleError>
    where
        F: Fn(&mut ActionContext<'_, S, E, Env>) + Send + Sync + 'static,
    {
        Self::with_count(condition, Some(execution_count), delay_seconds, Arc::new(action))
    }

    /// Create a task that runs every time its condition and delay allow.
    pub fn repeating<F>(
        condition: Condition<S, E, Env>,
        delay_seconds: f64,
        action: F,
    ) -> Result<Self, ScheduleError>
    where
        F: Fn(&mut ActionContext<'_, S, E, Env>) + Send + Sync + 'static,
    {
        Self::with_count(condition, None, delay_seconds, Arc::new(action))
    }

    fn with_count(
        condition: Condition<S, E, Env>,
        execution_count: Option<u32>,
        delay: f64,
        action: Action<S, E, Env>,
    ) -> Result<Self, ScheduleError> {
        match validate_delay(delay) {
            Validation::Success(_) => Ok(Self {
                condition,
                execution_count,
                delay,
                action,
                name: None,
            }),
            Validation::Failure(errors) => Err(ScheduleError::InvalidTask(
                errors.iter().cloned().collect(),
            )),
        }
    }

    /// Attach a label used in diagnostics.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<S: State, E: Event, Env> ScheduledTask<S, E, Env> {
    pub fn condition(&self) -> &Condition<S, E, Env> {
        &self.condition
    }

    /// Configured number of executions, `None` when unbounded.
    pub fn execution_count(&self) -> Option<u32> {
        self.execution_count
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn run(&self, ctx: &mut ActionContext<'_, S, E, Env>) {
        (self.action)(ctx)
    }
}

impl<S: State, E: Event, Env> Clone for ScheduledTask<S, E, Env> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition.clone(),
            execution_count: self.execution_count,
            delay: self.delay,
            action: Arc::clone(&self.action),
            name: self.name.clone(),
        }
    }
}

impl<S: State, E: Event, Env> std::fmt::Debug for ScheduledTask<S, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("name", &self.name)
            .field("execution_count", &self.execution_count)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Accumulate every problem with a delay value.
fn validate_delay(delay: f64) -> Validation<(), NonEmptyVec<TaskViolation>> {
    let checks = vec![
        if delay.is_finite() {
            Validation::success(())
        } else {
            Validation::fail(TaskViolation::NonFiniteDelay { delay })
        },
        if delay < 0.0 {
            Validation::fail(TaskViolation::NegativeDelay { delay })
        } else {
            Validation::success(())
        },
    ];

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Fuse {
        Lit,
    }

    impl State for Fuse {
        fn name(&self) -> &str {
            "Lit"
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Blast {
        Detonate,
    }

    impl Event for Blast {
        fn name(&self) -> &str {
            "Detonate"
        }
    }

    type TestTask = ScheduledTask<Fuse, Blast, ()>;

    #[test]
    fn valid_task_keeps_its_parameters() {
        let task = TestTask::new(Condition::always(), 3, 0.5, |_| {}).unwrap();

        assert_eq!(task.execution_count(), Some(3));
        assert_eq!(task.delay(), 0.5);
        assert!(task.name().is_none());
    }

    #[test]
    fn repeating_task_is_unbounded() {
        let task = TestTask::repeating(Condition::always(), 0.0, |_| {})
            .unwrap()
            .named("ticker");

        assert_eq!(task.execution_count(), None);
        assert_eq!(task.name(), Some("ticker"));
    }

    #[test]
    fn zero_count_is_accepted() {
        assert!(TestTask::new(Condition::always(), 0, 0.0, |_| {}).is_ok());
    }

    #[test]
    fn negative_delay_is_rejected() {
        let result = TestTask::new(Condition::always(), 1, -0.5, |_| {});

        match result {
            Err(ScheduleError::InvalidTask(violations)) => {
                assert_eq!(violations, vec![TaskViolation::NegativeDelay { delay: -0.5 }]);
            }
            Ok(_) => panic!("Expected rejection"),
        }
    }

    #[test]
    fn negative_infinity_reports_every_violation() {
        let result = TestTask::new(Condition::always(), 1, f64::NEG_INFINITY, |_| {});

        match result {
            Err(ScheduleError::InvalidTask(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, TaskViolation::NonFiniteDelay { .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, TaskViolation::NegativeDelay { .. })));
            }
            Ok(_) => panic!("Expected rejection"),
        }
    }

    #[test]
    fn nan_delay_is_rejected() {
        let result = TestTask::repeating(Condition::always(), f64::NAN, |_| {});
        assert!(matches!(result, Err(ScheduleError::InvalidTask(v)) if v.len() == 1));
    }
}
