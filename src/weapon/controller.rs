//! Input-facing front of the weapon machine.

use crate::checkpoint::CheckpointError;
use crate::config::MachineConfig;
use crate::core::Timer;
use crate::machine::MachineError;
use crate::weapon::checkpoint::WeaponCheckpoint;
use crate::weapon::error::ControllerError;
use crate::weapon::machine::{build_weapon_machine, WeaponEnv, WeaponStateMachine};
use crate::weapon::provider::{clamp_progress, WeaponActionProvider};
use crate::weapon::state::{PlayerEvent, PlayerState, SelectionDirection};

/// Drives a [`WeaponActionProvider`] through the weapon-handling cycle.
///
/// Input handlers call the `try_*` methods; the game loop calls
/// [`update_logical_layer`] once per frame.
///
/// [`update_logical_layer`]: WeaponActionController::update_logical_layer
///
/// # Example
///
/// ```rust
/// use holster::config::{ArmoryConfig, MachineConfig};
/// use holster::core::FixedStepTimer;
/// use holster::inventory::{Armory, PlayerData};
/// use holster::weapon::{PlayerState, WeaponActionController};
///
/// let armory = Armory::new(ArmoryConfig::default()).unwrap();
/// let pistol = armory.find("PISTOL_9MM").unwrap();
/// let mut player = PlayerData::new(armory);
/// assert!(player.give_weapon(pistol));
///
/// let mut controller = WeaponActionController::new(player, MachineConfig::default()).unwrap();
/// assert_eq!(controller.current_state(), PlayerState::Idle);
///
/// controller.try_start_attacking().unwrap();
/// let frame = FixedStepTimer::from_rate(4.0);
/// for _ in 0..3 {
///     controller.update_logical_layer(&frame).unwrap();
/// }
/// assert_eq!(controller.current_state(), PlayerState::Attack);
/// assert_eq!(controller.provider().magazine(pistol), Some(7));
/// ```
pub struct WeaponActionController<P> {
    machine: WeaponStateMachine<P>,
    env: WeaponEnv<P>,
    initial_put_back_progress: f64,
    initial_end_attack_progress: f64,
}

impl<P: WeaponActionProvider + 'static> WeaponActionController<P> {
    /// Build the weapon machine and make the weapon available.
    pub fn new(provider: P, config: MachineConfig) -> Result<Self, ControllerError> {
        let mut machine = build_weapon_machine(config)?;
        let mut env = WeaponEnv::new(provider);
        machine.fire_event(PlayerEvent::Available, &mut env)?;

        Ok(Self {
            machine,
            env,
            initial_put_back_progress: 0.0,
            initial_end_attack_progress: 0.0,
        })
    }

    /// Put the weapon back to reload it. Returns whether the request was
    /// accepted.
    pub fn try_reload(&mut self) -> Result<bool, MachineError> {
        self.fire_if_alive(PlayerEvent::PuttingBackBeforeReload)
    }

    pub fn try_select_next_weapon(&mut self) -> Result<bool, MachineError> {
        self.fire_if_alive(SelectionDirection::Next.put_back_event())
    }

    pub fn try_select_previous_weapon(&mut self) -> Result<bool, MachineError> {
        self.fire_if_alive(SelectionDirection::Previous.put_back_event())
    }

    /// Press the trigger.
    ///
    /// The trigger counts as held even when the press is refused, so pressing
    /// again during an attack keeps a fully automatic weapon firing.
    pub fn try_start_attacking(&mut self) -> Result<bool, MachineError> {
        if !self.env.provider.is_alive() {
            return Ok(false);
        }
        self.env.trigger_held = true;
        self.machine.fire_event(PlayerEvent::PressingTrigger, &mut self.env)
    }

    /// Release the trigger. Allowed even when the player is dead.
    pub fn try_stop_attacking(&mut self) -> Result<bool, MachineError> {
        self.env.trigger_held = false;
        self.machine.fire_event(PlayerEvent::ReleasingTrigger, &mut self.env)
    }

    /// Advance by one frame and drive the motion of the current state.
    pub fn update_logical_layer(&mut self, timer: &impl Timer) -> Result<(), MachineError> {
        self.machine.tick(timer.delta_time(), &mut self.env)?;

        let state = self.machine.current_state();
        if self.machine.changed_last_tick() {
            self.sample_initial_progress(state);
        }

        let elapsed = self.machine.elapsed_since_transition();
        let provider = &mut self.env.provider;
        match state {
            PlayerState::PressTrigger => provider.press_trigger(elapsed),
            PlayerState::Attack => provider.update_attack(elapsed),
            PlayerState::WaitForAttackEnd => {
                provider.wait_for_attack_end(elapsed, self.initial_end_attack_progress)
            }
            PlayerState::WaitForTriggerRelease => provider.wait_for_trigger_release(elapsed),
            PlayerState::ReleaseTrigger => provider.release_trigger(elapsed),
            PlayerState::PullOut => provider.pull_out(elapsed),
            PlayerState::PutBack => provider.put_back(elapsed, self.initial_put_back_progress),
            PlayerState::NotYetAvailable
            | PlayerState::Idle
            | PlayerState::Reload
            | PlayerState::SelectNext
            | PlayerState::SelectPrevious => {}
        }

        Ok(())
    }

    fn fire_if_alive(&mut self, event: PlayerEvent) -> Result<bool, MachineError> {
        if !self.env.provider.is_alive() {
            tracing::debug!("Ignoring {:?} from a dead player", event);
            return Ok(false);
        }
        self.machine.fire_event(event, &mut self.env)
    }

    fn sample_initial_progress(&mut self, state: PlayerState) {
        match state {
            PlayerState::PutBack => {
                self.initial_put_back_progress =
                    clamp_progress(self.env.provider.compute_put_back_progress());
            }
            PlayerState::WaitForAttackEnd => {
                self.initial_end_attack_progress =
                    clamp_progress(self.env.provider.compute_end_attack_progress());
            }
            _ => {}
        }
    }

    pub fn checkpoint(&self) -> WeaponCheckpoint {
        WeaponCheckpoint {
            machine: self.machine.checkpoint(),
            initial_put_back_progress: self.initial_put_back_progress,
            initial_end_attack_progress: self.initial_end_attack_progress,
        }
    }

    /// Restore the machine from `checkpoint`.
    ///
    /// The provider is left as is and the trigger counts as released. Motions
    /// in progress resume from their saved starting points.
    pub fn restore(&mut self, checkpoint: &WeaponCheckpoint) -> Result<(), CheckpointError> {
        self.machine.restore(&checkpoint.machine)?;
        self.env.trigger_held = false;
        self.initial_put_back_progress = clamp_progress(checkpoint.initial_put_back_progress);
        self.initial_end_attack_progress = clamp_progress(checkpoint.initial_end_attack_progress);
        Ok(())
    }

    pub fn provider(&self) -> &P {
        &self.env.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.env.provider
    }

    pub fn machine(&self) -> &WeaponStateMachine<P> {
        &self.machine
    }

    pub fn current_state(&self) -> PlayerState {
        self.machine.current_state()
    }

    pub fn trigger_held(&self) -> bool {
        self.env.trigger_held
    }

    /// Consume the controller, handing the provider back.
    pub fn into_provider(self) -> P {
        self.env.provider
    }
}

impl<P> std::fmt::Debug for WeaponActionController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaponActionController")
            .field("machine", &self.machine)
            .field("trigger_held", &self.env.trigger_held)
            .finish()
    }
}
