//! Transitions keyed by (source state, event).

use crate::core::{Event, Guard, State};

/// A transition from one state to another on an event, optionally guarded.
pub struct Transition<S: State, E: Event, Env> {
    pub from: S,
    pub event: E,
    pub to: S,
    pub guard: Option<Guard<Env>>,
}

impl<S: State, E: Event, Env> Transition<S, E, Env> {
    /// Check if this transition applies to `event` in `current` (pure).
    pub fn can_execute(&self, current: S, event: E, env: &Env) -> bool {
        if current != self.from || event != self.event {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(env))
    }

    /// True when both transitions connect the same states on the same event.
    pub fn same_route(&self, other: &Self) -> bool {
        self.from == other.from && self.event == other.event && self.to == other.to
    }
}

impl<S: State, E: Event, Env> Clone for Transition<S, E, Env> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            event: self.event,
            to: self.to,
            guard: self.guard.clone(),
        }
    }
}

impl<S: State, E: Event, Env> std::fmt::Debug for Transition<S, E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum Bolt {
            Open,
            Closed,
        }
    }

    crate::event_enum! {
        enum Hand {
            Push,
            Pull,
        }
    }

    #[test]
    fn can_execute_matches_state_and_event() {
        let transition: Transition<Bolt, Hand, ()> = Transition {
            from: Bolt::Open,
            event: Hand::Push,
            to: Bolt::Closed,
            guard: None,
        };

        assert!(transition.can_execute(Bolt::Open, Hand::Push, &()));
        assert!(!transition.can_execute(Bolt::Closed, Hand::Push, &()));
        assert!(!transition.can_execute(Bolt::Open, Hand::Pull, &()));
    }

    #[test]
    fn can_execute_respects_guard() {
        let transition: Transition<Bolt, Hand, bool> = Transition {
            from: Bolt::Closed,
            event: Hand::Pull,
            to: Bolt::Open,
            guard: Some(Guard::new(|unlocked: &bool| *unlocked)),
        };

        assert!(transition.can_execute(Bolt::Closed, Hand::Pull, &true));
        assert!(!transition.can_execute(Bolt::Closed, Hand::Pull, &false));
    }

    #[test]
    fn same_route_ignores_guard() {
        let plain: Transition<Bolt, Hand, bool> = Transition {
            from: Bolt::Open,
            event: Hand::Push,
            to: Bolt::Closed,
            guard: None,
        };
        let guarded = Transition {
            guard: Some(Guard::new(|b: &bool| *b)),
            ..plain.clone()
        };
        let elsewhere = Transition {
            to: Bolt::Open,
            ..plain.clone()
        };

        assert!(plain.same_route(&guarded));
        assert!(!plain.same_route(&elsewhere));
    }
}
