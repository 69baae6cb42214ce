//! Frame timing source.

/// Supplies the time elapsed since the previous frame, in seconds.
pub trait Timer {
    fn delta_time(&self) -> f64;
}

/// Timer that always reports the same step.
///
/// # Example
///
/// ```rust
/// use holster::core::{FixedStepTimer, Timer};
///
/// let timer = FixedStepTimer::new(0.25);
/// assert_eq!(timer.delta_time(), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStepTimer {
    step: f64,
}

impl FixedStepTimer {
    /// Create a timer with the given step. Negative or non-finite steps are
    /// treated as 0.
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        Self { step }
    }

    /// Timer stepping at `rate` frames per second.
    pub fn from_rate(rate: f64) -> Self {
        if rate > 0.0 {
            Self::new(1.0 / rate)
        } else {
            Self::new(0.0)
        }
    }
}

impl Timer for FixedStepTimer {
    fn delta_time(&self) -> f64 {
        self.step
    }
}

impl Timer for f64 {
    fn delta_time(&self) -> f64 {
        *self
    }
}
