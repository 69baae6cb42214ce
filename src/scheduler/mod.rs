//! Condition-gated scheduler evaluated once per tick.
//!
//! Tasks are kept in registration order and every live task is evaluated on
//! every tick against the same [`Arguments`] snapshot. A task whose
//! execution count reaches zero is dropped at the end of the evaluation.

pub mod error;
pub mod task;

pub use error::{ScheduleError, TaskViolation};
pub use task::ScheduledTask;

use crate::core::{ActionContext, Arguments, Event, State};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stable handle to a task registered with a [`Scheduler`].
///
/// Ids are handed out sequentially, so two machines that register the same
/// tasks in the same order agree on them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

struct Slot<S: State, E: Event, Env> {
    id: TaskId,
    task: ScheduledTask<S, E, Env>,
    remaining: Option<u32>,
    /// Satisfied time accumulated in the current episode, `None` when the
    /// condition did not hold at the last evaluation.
    countdown: Option<f64>,
}

impl<S: State, E: Event, Env> Slot<S, E, Env> {
    fn label(&self) -> String {
        match self.task.name() {
            Some(name) => format!("{} ({})", self.id, name),
            None => self.id.to_string(),
        }
    }
}

/// Ordered collection of scheduled tasks.
pub struct Scheduler<S: State, E: Event, Env> {
    slots: Vec<Slot<S, E, Env>>,
    next_id: u64,
}

impl<S: State, E: Event, Env> Default for Scheduler<S, E, Env> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, Env> Scheduler<S, E, Env> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a task after all existing ones.
    pub fn add(&mut self, task: ScheduledTask<S, E, Env>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            remaining: task.execution_count(),
            task,
            countdown: None,
        });
        id
    }

    /// Unregister a task. Returns whether it was registered.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    /// Executions left for a bounded task.
    ///
    /// Returns `None` when the task is unknown or repeats without bound.
    pub fn remaining(&self, id: TaskId) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .and_then(|slot| slot.remaining)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids of registered tasks in evaluation order.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }

    /// Evaluate every task once.
    ///
    /// Conditions see the environment as it was left by the tasks evaluated
    /// before them. Events raised by actions are pushed onto `fired`.
    /// Returns the number of actions that ran.
    pub fn evaluate(
        &mut self,
        args: &Arguments<S, E>,
        dt: f64,
        env: &mut Env,
        fired: &mut VecDeque<E>,
    ) -> usize
    where
        Env: 'static,
    {
        let mut ran = 0;

        for slot in &mut self.slots {
            if slot.remaining == Some(0) {
                continue;
            }

            if !slot.task.condition().is_satisfied(args, env) {
                if slot.countdown.take().is_some() {
                    tracing::trace!("Countdown of {} reset", slot.label());
                }
                continue;
            }

            let due = if slot.task.delay() <= 0.0 {
                true
            } else {
                let accumulated = match slot.countdown {
                    Some(elapsed) => elapsed + dt,
                    None => 0.0,
                };
                if accumulated >= slot.task.delay() {
                    slot.countdown = Some(0.0);
                    true
                } else {
                    slot.countdown = Some(accumulated);
                    false
                }
            };

            if !due {
                continue;
            }

            tracing::trace!(
                "Running {} in state {}",
                slot.label(),
                args.current.name()
            );
            let mut ctx = ActionContext::new(args.previous, args.current, args.event, env, fired);
            slot.task.run(&mut ctx);
            ran += 1;

            if let Some(remaining) = slot.remaining.as_mut() {
                *remaining -= 1;
            }
        }

        self.slots.retain(|slot| slot.remaining != Some(0));
        ran
    }

    /// Remaining executions of every live bounded task.
    pub(crate) fn bounded_counts(&self) -> Vec<(TaskId, u32)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.remaining.map(|count| (slot.id, count)))
            .collect()
    }

    /// Overwrite the remaining count of a bounded task. Returns `false` when
    /// the id is unknown or the task is unbounded.
    pub(crate) fn set_remaining(&mut self, id: TaskId, count: u32) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) if slot.remaining.is_some() => {
                slot.remaining = Some(count);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn reset_countdowns(&mut self) {
        for slot in &mut self.slots {
            slot.countdown = None;
        }
    }

    /// Drop bounded tasks not listed in `keep`.
    pub(crate) fn retire_bounded_except(&mut self, keep: &[TaskId]) {
        self.slots
            .retain(|slot| slot.remaining.is_none() || keep.contains(&slot.id));
    }
}

impl<S: State, E: Event, Env> std::fmt::Debug for Scheduler<S, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.slots.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
