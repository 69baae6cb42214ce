//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the environment that decide
//! whether a matching transition may execute. A rejected guard leaves the
//! machine untouched, exactly like an event with no table entry.

use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use holster::core::Guard;
///
/// struct Pouch {
///     rounds: u32,
/// }
///
/// let can_reload = Guard::new(|pouch: &Pouch| pouch.rounds > 0);
///
/// assert!(can_reload.check(&Pouch { rounds: 12 }));
/// assert!(!can_reload.check(&Pouch { rounds: 0 }));
/// ```
pub struct Guard<Env> {
    predicate: Arc<dyn Fn(&Env) -> bool + Send + Sync>,
}

impl<Env> Clone for Guard<Env> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<Env> Guard<Env> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Env) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, env: &Env) -> bool {
        (self.predicate)(env)
    }
}

impl<Env> std::fmt::Debug for Guard<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard")
    }
}
