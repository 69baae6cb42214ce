//! Context handed to entry, exit and task actions.

use super::state::{Event, State};
use std::collections::VecDeque;
use std::sync::Arc;

/// Side effect run on entering or leaving a state, or by a scheduled task.
pub type Action<S, E, Env> = Arc<dyn Fn(&mut ActionContext<'_, S, E, Env>) + Send + Sync>;

/// Mutable view given to an action while it runs.
///
/// For entry and exit actions `from`/`to` are the two ends of the transition
/// being applied. For scheduled task actions they are the previous and
/// current states of the evaluation. Events raised with [`fire`] are queued
/// and applied by the machine once the running action returns.
///
/// [`fire`]: ActionContext::fire
pub struct ActionContext<'a, S: State, E: Event, Env> {
    pub from: S,
    pub to: S,
    /// Event that entered `to`, if any.
    pub event: Option<E>,
    pub env: &'a mut Env,
    fired: &'a mut VecDeque<E>,
}

impl<'a, S: State, E: Event, Env> ActionContext<'a, S, E, Env> {
    pub(crate) fn new(
        from: S,
        to: S,
        event: Option<E>,
        env: &'a mut Env,
        fired: &'a mut VecDeque<E>,
    ) -> Self {
        Self {
            from,
            to,
            event,
            env,
            fired,
        }
    }

    /// Queue an event to be applied after the current action completes.
    pub fn fire(&mut self, event: E) {
        self.fired.push_back(event);
    }

    /// Number of events queued so far, including ones raised before this
    /// action ran.
    pub fn queued(&self) -> usize {
        self.fired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Slide {
        Forward,
        Back,
    }

    impl State for Slide {
        fn name(&self) -> &str {
            match self {
                Self::Forward => "Forward",
                Self::Back => "Back",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Rack {
        Pull,
        Release,
    }

    impl Event for Rack {
        fn name(&self) -> &str {
            match self {
                Self::Pull => "Pull",
                Self::Release => "Release",
            }
        }
    }

    #[test]
    fn fired_events_are_queued_in_order() {
        let mut env = 0u32;
        let mut queue = VecDeque::new();
        let mut ctx = ActionContext::new(Slide::Forward, Slide::Back, Some(Rack::Pull), &mut env, &mut queue);

        *ctx.env += 1;
        ctx.fire(Rack::Release);
        ctx.fire(Rack::Pull);
        assert_eq!(ctx.queued(), 2);

        assert_eq!(env, 1);
        assert_eq!(queue, VecDeque::from(vec![Rack::Release, Rack::Pull]));
    }
}
