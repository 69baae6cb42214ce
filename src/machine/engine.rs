//! State machine driven by events and by per-frame ticks.

use crate::checkpoint::{Checkpoint, CheckpointError, TaskCount, CHECKPOINT_VERSION};
use crate::config::{MachineConfig, UnmatchedEventPolicy};
use crate::core::{Action, ActionContext, Arguments, Event, State, StateHistory, StateTransition};
use crate::machine::error::MachineError;
use crate::machine::transition::Transition;
use crate::scheduler::Scheduler;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};

/// State machine combining a transition table with a condition-gated
/// scheduler.
///
/// The machine owns no gameplay data: the environment is lent to it on every
/// call and handed to guards, conditions and actions.
///
/// # Example
///
/// ```rust
/// use holster::builder::{StateMachineBuilder, TransitionBuilder};
/// use holster::core::Condition;
/// use holster::scheduler::ScheduledTask;
/// use holster::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
/// event_enum! {
///     enum Knob { Turn, Release }
/// }
///
/// let mut machine = StateMachineBuilder::<Door, Knob, u32>::new()
///     .initial(Door::Closed)
///     .transition(TransitionBuilder::new().from(Door::Closed).on(Knob::Turn).to(Door::Open))
///     .unwrap()
///     .transition(TransitionBuilder::new().from(Door::Open).on(Knob::Release).to(Door::Closed))
///     .unwrap()
///     .on_entry(Door::Open, |ctx| *ctx.env += 1)
///     .schedule(
///         ScheduledTask::repeating(Condition::settled_in(Door::Open), 1.0, |ctx| ctx.fire(Knob::Release))
///             .unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// let mut openings = 0;
/// assert!(machine.fire_event(Knob::Turn, &mut openings).unwrap());
/// assert_eq!(machine.current_state(), Door::Open);
///
/// // one tick to settle, one to arm the countdown, one second of waiting
/// for _ in 0..4 {
///     machine.tick(0.5, &mut openings).unwrap();
/// }
/// assert_eq!(machine.current_state(), Door::Closed);
/// assert_eq!(openings, 1);
/// ```
pub struct StateMachine<S: State, E: Event, Env> {
    current: S,
    previous: S,
    entry_event: Option<E>,
    elapsed: f64,
    changed_last_tick: bool,
    clock: f64,
    table: HashMap<(S, E), Transition<S, E, Env>>,
    entry_actions: HashMap<S, Action<S, E, Env>>,
    exit_actions: HashMap<S, Action<S, E, Env>>,
    scheduler: Scheduler<S, E, Env>,
    pending: VecDeque<E>,
    history: StateHistory<S, E>,
    config: MachineConfig,
}

impl<S: State, E: Event, Env: 'static> StateMachine<S, E, Env> {
    pub(crate) fn assemble(
        initial: S,
        table: HashMap<(S, E), Transition<S, E, Env>>,
        entry_actions: HashMap<S, Action<S, E, Env>>,
        exit_actions: HashMap<S, Action<S, E, Env>>,
        scheduler: Scheduler<S, E, Env>,
        config: MachineConfig,
    ) -> Self {
        Self {
            current: initial,
            previous: initial,
            entry_event: None,
            elapsed: 0.0,
            changed_last_tick: false,
            clock: 0.0,
            table,
            entry_actions,
            exit_actions,
            scheduler,
            pending: VecDeque::new(),
            history: StateHistory::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Fire an event synchronously.
    ///
    /// Events raised by the exit and entry actions are applied in FIFO order
    /// before this returns. Returns whether `event` itself caused a
    /// transition; an event with no matching transition, or whose guard
    /// rejects it, leaves the machine untouched.
    pub fn fire_event(&mut self, event: E, env: &mut Env) -> Result<bool, MachineError> {
        let transitioned = self.apply(event, env);
        self.drain(env, 1)?;
        Ok(transitioned)
    }

    /// Advance the machine by one frame of `dt` seconds.
    ///
    /// The scheduler is evaluated against the state observed at the end of
    /// the previous tick and the current state, every event it raises is
    /// applied, then the elapsed time since the latest transition is
    /// updated. Negative or non-finite deltas count as 0.
    pub fn tick(&mut self, dt: f64, env: &mut Env) -> Result<(), MachineError> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let args = Arguments::new(self.previous, self.current, self.entry_event);
        self.scheduler.evaluate(&args, dt, env, &mut self.pending);
        let drained = self.drain(env, 0);

        self.clock += dt;
        self.changed_last_tick = self.current != self.previous;
        if self.changed_last_tick {
            self.elapsed = 0.0;
        } else {
            self.elapsed += dt;
        }
        self.previous = self.current;

        drained
    }

    /// Move to `state` unconditionally.
    ///
    /// No actions run, queued events are discarded and the entering event is
    /// cleared. Meant for recovery, not for regular control flow.
    pub fn force_set_state(&mut self, state: S) {
        tracing::debug!("Forcing state {} (was {})", state.name(), self.current.name());
        self.current = state;
        self.entry_event = None;
        self.elapsed = 0.0;
        self.pending.clear();
    }

    fn apply(&mut self, event: E, env: &mut Env) -> bool {
        let from = self.current;
        let Some(transition) = self.table.get(&(from, event)) else {
            self.report_unmatched(event);
            return false;
        };

        if !transition.can_execute(from, event, env) {
            tracing::debug!(
                "Guard rejected {} in state {}",
                event.name(),
                from.name()
            );
            return false;
        }
        let to = transition.to;

        if let Some(exit) = self.exit_actions.get(&from) {
            let mut ctx = ActionContext::new(from, to, Some(event), env, &mut self.pending);
            exit(&mut ctx);
        }

        self.current = to;
        self.entry_event = Some(event);
        self.history.record(StateTransition {
            from,
            to,
            event,
            at_seconds: self.clock,
        });
        tracing::debug!("{} -> {} on {}", from.name(), to.name(), event.name());

        if let Some(entry) = self.entry_actions.get(&to) {
            let mut ctx = ActionContext::new(from, to, Some(event), env, &mut self.pending);
            entry(&mut ctx);
        }

        true
    }

    /// Apply queued events until none remain, `steps` having been applied
    /// already.
    fn drain(&mut self, env: &mut Env, mut steps: usize) -> Result<(), MachineError> {
        while let Some(event) = self.pending.pop_front() {
            if steps >= self.config.max_cascade_steps {
                self.pending.clear();
                tracing::error!(
                    "Cascade limit of {} reached in state {} while applying {}",
                    self.config.max_cascade_steps,
                    self.current.name(),
                    event.name()
                );
                return Err(MachineError::CascadeOverflow {
                    limit: self.config.max_cascade_steps,
                    state: self.current.name().to_string(),
                    event: event.name().to_string(),
                });
            }
            steps += 1;
            self.apply(event, env);
        }
        Ok(())
    }

    fn report_unmatched(&self, event: E) {
        match self.config.unmatched_events {
            UnmatchedEventPolicy::Ignore => {}
            UnmatchedEventPolicy::Debug => tracing::debug!(
                "No transition for {} in state {}",
                event.name(),
                self.current.name()
            ),
            UnmatchedEventPolicy::Warn => tracing::warn!(
                "No transition for {} in state {}",
                event.name(),
                self.current.name()
            ),
        }
    }

    /// Snapshot the machine's dynamic state.
    ///
    /// The transition table, actions and task definitions are not part of a
    /// checkpoint; restore into a machine built the same way.
    pub fn checkpoint(&self) -> Checkpoint<S, E> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.current,
            previous_state: self.previous,
            entry_event: self.entry_event,
            elapsed_since_transition: self.elapsed,
            changed_last_tick: self.changed_last_tick,
            clock: self.clock,
            history: self.history.clone(),
            tasks: self
                .scheduler
                .bounded_counts()
                .into_iter()
                .map(|(id, remaining)| TaskCount { id, remaining })
                .collect(),
        }
    }

    /// Restore the dynamic state saved by [`checkpoint`].
    ///
    /// Like [`force_set_state`] no actions run and queued events are
    /// discarded, but the entering event is kept so conditions depending on
    /// it resume. Bounded tasks absent from the checkpoint had run out and
    /// are removed. Countdowns restart.
    ///
    /// [`checkpoint`]: StateMachine::checkpoint
    /// [`force_set_state`]: StateMachine::force_set_state
    pub fn restore(&mut self, checkpoint: &Checkpoint<S, E>) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let live: Vec<_> = self.scheduler.bounded_counts();
        let unknown: Vec<String> = checkpoint
            .tasks
            .iter()
            .filter(|count| !live.iter().any(|(id, _)| *id == count.id))
            .map(|count| count.id.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(CheckpointError::ValidationFailed(format!(
                "unknown bounded tasks: {}",
                unknown.join(", ")
            )));
        }

        let keep: Vec<_> = checkpoint.tasks.iter().map(|count| count.id).collect();
        self.scheduler.retire_bounded_except(&keep);
        for count in &checkpoint.tasks {
            self.scheduler.set_remaining(count.id, count.remaining);
        }
        self.scheduler.reset_countdowns();

        self.current = checkpoint.current_state;
        self.previous = checkpoint.previous_state;
        self.entry_event = checkpoint.entry_event;
        self.elapsed = checkpoint.elapsed_since_transition;
        self.changed_last_tick = checkpoint.changed_last_tick;
        self.clock = checkpoint.clock;
        self.history = checkpoint.history.clone();
        self.pending.clear();

        tracing::debug!(
            "Restored checkpoint {} in state {}",
            checkpoint.id,
            self.current.name()
        );
        Ok(())
    }
}

impl<S: State, E: Event, Env> StateMachine<S, E, Env> {
    pub fn current_state(&self) -> S {
        self.current
    }

    /// State observed at the end of the latest tick.
    pub fn previous_state(&self) -> S {
        self.previous
    }

    /// Event that caused the latest transition into the current state.
    pub fn entry_event(&self) -> Option<E> {
        self.entry_event
    }

    /// Seconds spent in the current state, as of the latest tick.
    pub fn elapsed_since_transition(&self) -> f64 {
        self.elapsed
    }

    /// Whether the latest tick observed a different state than the one
    /// before it.
    pub fn changed_last_tick(&self) -> bool {
        self.changed_last_tick
    }

    /// Sum of all tick deltas.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    pub fn scheduler(&self) -> &Scheduler<S, E, Env> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<S, E, Env> {
        &mut self.scheduler
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Target of the transition registered for `event` in `state`.
    pub fn target(&self, state: S, event: E) -> Option<S> {
        self.table.get(&(state, event)).map(|t| t.to)
    }

    pub fn transition_count(&self) -> usize {
        self.table.len()
    }
}

impl<S: State, E: Event, Env> std::fmt::Debug for StateMachine<S, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("entry_event", &self.entry_event)
            .field("elapsed", &self.elapsed)
            .field("clock", &self.clock)
            .field("transitions", &self.table.len())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
