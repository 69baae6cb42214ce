//! The weapon-handling transition table and its time-driven tasks.
//!
//! Discrete input (trigger, reload, weapon switch) arrives as events. Motion
//! completion is detected by persistent scheduled tasks that poll the
//! provider each tick and raise the follow-up event. Every task is gated by
//! `settled_in`, so it only fires once the provider has been driven for at
//! least one frame in the state and never acts on progress left over from a
//! previous visit.

use crate::builder::{BuildError, StateMachineBuilder, TransitionBuilder};
use crate::config::MachineConfig;
use crate::core::{Condition, Guard};
use crate::machine::StateMachine;
use crate::scheduler::ScheduledTask;
use crate::weapon::provider::{clamp_progress, WeaponActionProvider};
use crate::weapon::state::{PlayerEvent, PlayerState, SelectionDirection};

/// Environment lent to the weapon machine on every call.
#[derive(Debug, Clone, Default)]
pub struct WeaponEnv<P> {
    pub provider: P,
    /// Whether the player currently holds the trigger down.
    pub trigger_held: bool,
}

impl<P> WeaponEnv<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            trigger_held: false,
        }
    }
}

pub type WeaponStateMachine<P> = StateMachine<PlayerState, PlayerEvent, WeaponEnv<P>>;

type WeaponCondition<P> = Condition<PlayerState, PlayerEvent, WeaponEnv<P>>;
type WeaponTask<P> = ScheduledTask<PlayerState, PlayerEvent, WeaponEnv<P>>;

/// Build the weapon-handling machine, starting in `NotYetAvailable`.
pub fn build_weapon_machine<P>(config: MachineConfig) -> Result<WeaponStateMachine<P>, BuildError>
where
    P: WeaponActionProvider + 'static,
{
    use PlayerEvent as Ev;
    use PlayerState as St;

    let route = |from: St, event: Ev, to: St| {
        TransitionBuilder::<St, Ev, WeaponEnv<P>>::new()
            .from(from)
            .on(event)
            .to(to)
    };

    let mut builder = StateMachineBuilder::<St, Ev, WeaponEnv<P>>::new()
        .initial(St::NotYetAvailable)
        .config(config)
        .transition(route(St::NotYetAvailable, Ev::Available, St::Idle))?
        .transition(route(St::Idle, Ev::PressingTrigger, St::PressTrigger))?
        .transition(route(St::PressTrigger, Ev::Attacking, St::Attack))?
        .transition(route(St::Attack, Ev::WaitingForAttackEnd, St::WaitForAttackEnd))?
        .transition(
            route(St::WaitForAttackEnd, Ev::PressingTrigger, St::PressTrigger)
                .guard(end_of_attack_reached()),
        )?
        .transition(route(
            St::WaitForAttackEnd,
            Ev::WaitingForTriggerRelease,
            St::WaitForTriggerRelease,
        ))?
        .transition(route(St::WaitForTriggerRelease, Ev::ReleasingTrigger, St::ReleaseTrigger))?
        .transition(route(St::ReleaseTrigger, Ev::Idle, St::Idle))?
        .transition(route(St::PutBack, Ev::PullingOut, St::PullOut))?
        .transition(route(St::Reload, Ev::PullingOut, St::PullOut))?
        .transition(route(St::SelectNext, Ev::PullingOut, St::PullOut))?
        .transition(route(St::SelectPrevious, Ev::PullingOut, St::PullOut))?
        .transition(route(St::PullOut, Ev::Idle, St::Idle))?;

    // a pull-out can be interrupted, the put-back then resumes from the
    // weapon's current position
    for from in [St::Idle, St::PullOut] {
        builder = builder
            .transition(
                route(from, Ev::PuttingBackBeforeReload, St::PutBack)
                    .when(|env: &WeaponEnv<P>| env.provider.can_reload()),
            )?
            .transition(
                route(from, Ev::PuttingBackBeforeSelectNext, St::PutBack).when(
                    |env: &WeaponEnv<P>| env.provider.can_select_weapon(SelectionDirection::Next),
                ),
            )?
            .transition(
                route(from, Ev::PuttingBackBeforeSelectPrevious, St::PutBack).when(
                    |env: &WeaponEnv<P>| {
                        env.provider.can_select_weapon(SelectionDirection::Previous)
                    },
                ),
            )?;
    }

    // reload or selection may stop being possible while the weapon goes away
    for follow_up in [Ev::Reloading, Ev::SelectingNext, Ev::SelectingPrevious] {
        let to = match follow_up {
            Ev::Reloading => St::Reload,
            Ev::SelectingNext => St::SelectNext,
            _ => St::SelectPrevious,
        };
        builder = builder.transition(
            route(St::PutBack, follow_up, to)
                .when(move |env: &WeaponEnv<P>| follow_up_possible(&env.provider, follow_up)),
        )?;
    }

    builder = builder
        .on_entry(St::Attack, |ctx| {
            let consumed = ctx.env.provider.attack();
            tracing::trace!("Attack consumed {}", consumed);
        })
        .on_entry(St::Reload, |ctx| {
            let reloaded = ctx.env.provider.reload();
            tracing::trace!("Reloaded {} rounds", reloaded);
            ctx.fire(Ev::PullingOut);
        });

    for direction in [SelectionDirection::Next, SelectionDirection::Previous] {
        builder = builder.on_entry(direction.selection_state(), move |ctx| {
            if !ctx.env.provider.select_weapon(direction) {
                tracing::debug!("No weapon selected going {:?}", direction);
            }
            ctx.fire(Ev::PullingOut);
        });
    }

    for task in motion_tasks::<P>()? {
        builder = builder.schedule(task);
    }

    builder.build()
}

/// Whether the provider can still carry out the step after a put-back.
fn follow_up_possible<P: WeaponActionProvider>(provider: &P, follow_up: PlayerEvent) -> bool {
    match follow_up {
        PlayerEvent::Reloading => provider.can_reload(),
        PlayerEvent::SelectingNext => provider.can_select_weapon(SelectionDirection::Next),
        PlayerEvent::SelectingPrevious => provider.can_select_weapon(SelectionDirection::Previous),
        _ => true,
    }
}

fn end_of_attack_reached<P: WeaponActionProvider + 'static>() -> Guard<WeaponEnv<P>> {
    Guard::new(|env: &WeaponEnv<P>| env.provider.compute_end_attack_progress() >= 1.0)
}

fn keeps_firing<P: WeaponActionProvider>(env: &WeaponEnv<P>) -> bool {
    env.trigger_held && env.provider.is_fully_automatic() && !env.provider.is_magazine_empty()
}

fn raise<P: WeaponActionProvider + 'static>(
    name: &str,
    condition: WeaponCondition<P>,
    event: PlayerEvent,
) -> Result<WeaponTask<P>, BuildError> {
    Ok(ScheduledTask::repeating(condition, 0.0, move |ctx| ctx.fire(event))?.named(name))
}

fn settled<P: WeaponActionProvider + 'static>(state: PlayerState) -> WeaponCondition<P> {
    Condition::settled_in(state)
}

fn provider_query<P, F>(query: F) -> WeaponCondition<P>
where
    P: WeaponActionProvider + 'static,
    F: Fn(&P) -> bool + Send + Sync + 'static,
{
    Condition::query(move |env: &WeaponEnv<P>| query(&env.provider))
}

fn motion_complete<P, F>(progress: F) -> WeaponCondition<P>
where
    P: WeaponActionProvider + 'static,
    F: Fn(&P) -> f64 + Send + Sync + 'static,
{
    provider_query(move |provider: &P| clamp_progress(progress(provider)) >= 1.0)
}

/// Persistent tasks turning completed motions into events.
fn motion_tasks<P: WeaponActionProvider + 'static>() -> Result<Vec<WeaponTask<P>>, BuildError> {
    use PlayerEvent as Ev;
    use PlayerState as St;

    let attack_ended = || {
        settled::<P>(St::WaitForAttackEnd)
            & motion_complete(|provider: &P| provider.compute_end_attack_progress())
    };
    let firing = || WeaponCondition::<P>::query(keeps_firing::<P>);

    let mut tasks = vec![
        raise(
            "trigger pressed",
            settled::<P>(St::PressTrigger)
                & provider_query(|provider: &P| provider.is_press_trigger_complete()),
            Ev::Attacking,
        )?,
        raise(
            "attack complete",
            settled::<P>(St::Attack) & provider_query(|provider: &P| provider.is_attack_complete()),
            Ev::WaitingForAttackEnd,
        )?,
        raise("automatic fire", attack_ended() & firing(), Ev::PressingTrigger)?,
        raise(
            "attack ended",
            attack_ended() & !firing(),
            Ev::WaitingForTriggerRelease,
        )?,
        raise(
            "trigger already released",
            settled::<P>(St::WaitForTriggerRelease)
                & WeaponCondition::<P>::query(|env: &WeaponEnv<P>| !env.trigger_held),
            Ev::ReleasingTrigger,
        )?,
        raise(
            "trigger released",
            settled::<P>(St::ReleaseTrigger)
                & provider_query(|provider: &P| provider.is_release_trigger_complete()),
            Ev::Idle,
        )?,
        raise(
            "pulled out",
            settled::<P>(St::PullOut)
                & motion_complete(|provider: &P| provider.compute_pull_out_progress()),
            Ev::Idle,
        )?,
    ];

    let follow_ups = [
        (Ev::PuttingBackBeforeReload, Ev::Reloading),
        (
            SelectionDirection::Next.put_back_event(),
            SelectionDirection::Next.selecting_event(),
        ),
        (
            SelectionDirection::Previous.put_back_event(),
            SelectionDirection::Previous.selecting_event(),
        ),
    ];
    for (reason, next) in follow_ups {
        let put_away = move || {
            settled::<P>(St::PutBack)
                & WeaponCondition::<P>::entered_by(reason)
                & motion_complete(|provider: &P| provider.compute_put_back_progress())
        };
        let possible =
            move || provider_query(move |provider: &P| follow_up_possible(provider, next));
        tasks.push(raise("put back", put_away() & possible(), next)?);
        tasks.push(raise(
            "put back with nothing to do",
            put_away() & !possible(),
            Ev::PullingOut,
        )?);
    }

    Ok(tasks)
}
