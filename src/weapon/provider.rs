//! Contract between the weapon controller and the gameplay layer.

use crate::weapon::state::SelectionDirection;

/// Gameplay-side owner of weapons, ammunition and motion progress.
///
/// Queries must be pure: the machine evaluates them from guards and
/// scheduled conditions, possibly several times per frame. Commands are
/// called by the controller, exactly once per transition for `attack`,
/// `reload` and `select_weapon`, and once per frame for the motion methods.
///
/// Motion methods receive `elapsed`, the seconds spent in the current state.
/// Progress values are expected in `[0, 1]`; the controller clamps them
/// before passing them back.
pub trait WeaponActionProvider {
    fn is_alive(&self) -> bool;

    fn is_press_trigger_complete(&self) -> bool;

    fn is_attack_complete(&self) -> bool;

    fn is_release_trigger_complete(&self) -> bool;

    /// Whether holding the trigger keeps attacking.
    fn is_fully_automatic(&self) -> bool;

    /// Whether the weapon in use has no round left to fire. Always false for
    /// melee.
    fn is_magazine_empty(&self) -> bool;

    fn can_reload(&self) -> bool;

    /// Whether switching in `direction` would change the weapon in use.
    fn can_select_weapon(&self, direction: SelectionDirection) -> bool;

    fn compute_end_attack_progress(&self) -> f64;

    fn compute_put_back_progress(&self) -> f64;

    fn compute_pull_out_progress(&self) -> f64;

    /// Perform one attack. Returns the rounds consumed, or the number of
    /// blows for melee.
    fn attack(&mut self) -> u32;

    /// Refill the magazines in use. Returns the rounds moved.
    fn reload(&mut self) -> u32;

    /// Switch weapon. Returns whether a weapon was selected.
    fn select_weapon(&mut self, direction: SelectionDirection) -> bool;

    fn press_trigger(&mut self, elapsed: f64);

    fn update_attack(&mut self, elapsed: f64);

    fn wait_for_attack_end(&mut self, elapsed: f64, initial_progress: f64);

    fn wait_for_trigger_release(&mut self, _elapsed: f64) {}

    fn release_trigger(&mut self, elapsed: f64);

    fn pull_out(&mut self, elapsed: f64);

    fn put_back(&mut self, elapsed: f64, initial_progress: f64);
}

/// Clamp a progress value into `[0, 1]`, mapping NaN to 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Progress of a motion lasting `duration` seconds after `elapsed` seconds.
///
/// Motions with no duration complete immediately.
pub fn motion_progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        1.0
    } else {
        clamp_progress(elapsed / duration)
    }
}
