//! Builder for constructing state machines.

use crate::builder::error::{BuildError, TableViolation};
use crate::builder::transition::TransitionBuilder;
use crate::config::MachineConfig;
use crate::core::{Action, ActionContext, Event, State};
use crate::machine::{StateMachine, Transition};
use crate::scheduler::{ScheduledTask, Scheduler};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TableViolation>>;

/// Builder for constructing state machines with a fluent API.
///
/// Every table problem is collected and reported together by [`build`].
///
/// [`build`]: StateMachineBuilder::build
pub struct StateMachineBuilder<S: State, E: Event, Env> {
    initial: Option<S>,
    transitions: Vec<Transition<S, E, Env>>,
    entry_actions: Vec<(S, Action<S, E, Env>)>,
    exit_actions: Vec<(S, Action<S, E, Env>)>,
    tasks: Vec<ScheduledTask<S, E, Env>>,
    config: MachineConfig,
}

impl<S: State, E: Event, Env: 'static> StateMachineBuilder<S, E, Env> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            tasks: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E, Env>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E, Env>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, E, Env>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Run `action` every time `state` is entered.
    pub fn on_entry<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, S, E, Env>) + Send + Sync + 'static,
    {
        self.entry_actions.push((state, Arc::new(action)));
        self
    }

    /// Run `action` every time `state` is left.
    pub fn on_exit<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, S, E, Env>) + Send + Sync + 'static,
    {
        self.exit_actions.push((state, Arc::new(action)));
        self
    }

    /// Register a task with the machine's scheduler.
    ///
    /// Tasks receive ids in registration order.
    pub fn schedule(mut self, task: ScheduledTask<S, E, Env>) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the table is
    /// inconsistent.
    pub fn build(self) -> Result<StateMachine<S, E, Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        self.config.validate()?;

        let mut checks: Vec<Check> = Vec::new();

        let mut table = HashMap::new();
        for transition in self.transitions {
            match table.entry((transition.from, transition.event)) {
                Entry::Occupied(existing) => {
                    let existing: &Transition<S, E, Env> = existing.get();
                    if !existing.same_route(&transition) {
                        checks.push(Validation::fail(TableViolation::ConflictingTransition {
                            from: transition.from.name().to_string(),
                            event: transition.event.name().to_string(),
                            existing: existing.to.name().to_string(),
                            rejected: transition.to.name().to_string(),
                        }));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(transition);
                }
            }
        }

        let entry_actions = index_actions(self.entry_actions, &mut checks, |state| {
            TableViolation::DuplicateEntryAction {
                state: state.name().to_string(),
            }
        });
        let exit_actions = index_actions(self.exit_actions, &mut checks, |state| {
            TableViolation::DuplicateExitAction {
                state: state.name().to_string(),
            }
        });

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(BuildError::InvalidTable(errors.iter().cloned().collect()));
        }

        let mut scheduler = Scheduler::new();
        for task in self.tasks {
            scheduler.add(task);
        }

        Ok(StateMachine::assemble(
            initial,
            table,
            entry_actions,
            exit_actions,
            scheduler,
            self.config,
        ))
    }
}

fn index_actions<S: State, A>(
    actions: Vec<(S, A)>,
    checks: &mut Vec<Check>,
    duplicate: impl Fn(S) -> TableViolation,
) -> HashMap<S, A> {
    let mut indexed = HashMap::new();
    for (state, action) in actions {
        match indexed.entry(state) {
            Entry::Occupied(_) => checks.push(Validation::fail(duplicate(state))),
            Entry::Vacant(slot) => {
                slot.insert(action);
            }
        }
    }
    indexed
}

impl<S: State, E: Event, Env: 'static> Default for StateMachineBuilder<S, E, Env> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::simple_transition;
    use crate::config::ConfigError;

    crate::state_enum! {
        enum Slide {
            Locked,
            Racked,
            Jammed,
        }
    }

    crate::event_enum! {
        enum Rack {
            Pull,
            Clear,
        }
    }

    type Builder = StateMachineBuilder<Slide, Rack, ()>;

    #[test]
    fn builder_validates_required_fields() {
        let result = Builder::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_transitions() {
        let result = Builder::new().initial(Slide::Locked).build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = Builder::new()
            .initial(Slide::Locked)
            .add_transition(simple_transition(Slide::Locked, Rack::Pull, Slide::Racked))
            .add_transition(simple_transition(Slide::Jammed, Rack::Clear, Slide::Locked))
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), Slide::Locked);
        assert_eq!(machine.transition_count(), 2);
        assert_eq!(machine.target(Slide::Locked, Rack::Pull), Some(Slide::Racked));
    }

    #[test]
    fn identical_duplicates_are_tolerated() {
        let machine = Builder::new()
            .initial(Slide::Locked)
            .transitions(vec![
                simple_transition(Slide::Locked, Rack::Pull, Slide::Racked),
                simple_transition(Slide::Locked, Rack::Pull, Slide::Racked),
            ])
            .build()
            .unwrap();

        assert_eq!(machine.transition_count(), 1);
    }

    #[test]
    fn table_violations_are_accumulated() {
        let result = Builder::new()
            .initial(Slide::Locked)
            .add_transition(simple_transition(Slide::Locked, Rack::Pull, Slide::Racked))
            .add_transition(simple_transition(Slide::Locked, Rack::Pull, Slide::Jammed))
            .on_entry(Slide::Racked, |_| {})
            .on_entry(Slide::Racked, |_| {})
            .on_exit(Slide::Locked, |_| {})
            .on_exit(Slide::Locked, |_| {})
            .build();

        match result {
            Err(BuildError::InvalidTable(violations)) => {
                assert_eq!(violations.len(), 3);
                assert!(violations.contains(&TableViolation::ConflictingTransition {
                    from: "Locked".to_string(),
                    event: "Pull".to_string(),
                    existing: "Racked".to_string(),
                    rejected: "Jammed".to_string(),
                }));
                assert!(violations.contains(&TableViolation::DuplicateEntryAction {
                    state: "Racked".to_string()
                }));
                assert!(violations.contains(&TableViolation::DuplicateExitAction {
                    state: "Locked".to_string()
                }));
            }
            Err(other) => panic!("Expected table violations, got {}", other),
            Ok(_) => panic!("Expected table violations"),
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Builder::new()
            .initial(Slide::Locked)
            .add_transition(simple_transition(Slide::Locked, Rack::Pull, Slide::Racked))
            .config(MachineConfig {
                max_cascade_steps: 0,
                ..MachineConfig::default()
            })
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn scheduled_tasks_get_sequential_ids() {
        let machine = Builder::new()
            .initial(Slide::Locked)
            .add_transition(simple_transition(Slide::Locked, Rack::Pull, Slide::Racked))
            .schedule(ScheduledTask::repeating(crate::core::Condition::always(), 0.0, |_| {}).unwrap())
            .schedule(ScheduledTask::new(crate::core::Condition::always(), 2, 0.0, |_| {}).unwrap())
            .build()
            .unwrap();

        let ids: Vec<u64> = machine.scheduler().task_ids().iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
