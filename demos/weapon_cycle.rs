//! Weapon cycle demo
//!
//! Drives a player through firing, reloading and switching weapons at a
//! fixed 30 frames per second, printing every state change.
//!
//! Run with `RUST_LOG=holster=debug cargo run --example weapon_cycle` to see
//! the machine's own logging.

use holster::config::Config;
use holster::core::FixedStepTimer;
use holster::inventory::{Armory, Collectible, PlayerData};
use holster::weapon::{PlayerState, WeaponActionController};
use tracing_subscriber::EnvFilter;

type Controller = WeaponActionController<PlayerData>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Weapon Cycle Demo ===\n");

    let config = Config::load()?;
    let armory = Armory::new(config.armory)?;
    let pistol = armory.find("PISTOL_9MM").ok_or("missing PISTOL_9MM")?;
    let uzi = armory.find("UZI").ok_or("missing UZI")?;
    let nine = armory.find_ammunition("BULLET_9MM").ok_or("missing BULLET_9MM")?;

    let mut player = PlayerData::new(armory);
    player.give_weapon(pistol);
    player.collect(&mut Collectible::fresh_weapon(uzi, true, 20));
    player.collect(&mut Collectible::fresh_weapon(uzi, false, 20));
    player.collect(&mut Collectible::Ammunition {
        ammunition: nine,
        count: 60,
    });

    let mut controller = Controller::new(player, config.machine)?;
    let frame = FixedStepTimer::from_rate(30.0);

    println!("1. Three single shots");
    for _ in 0..3 {
        controller.try_start_attacking()?;
        run(&mut controller, &frame, 20)?;
        controller.try_stop_attacking()?;
        run(&mut controller, &frame, 10)?;
    }
    println!("   magazine: {:?}\n", controller.provider().magazine(pistol));

    println!("2. Reload");
    controller.try_reload()?;
    run(&mut controller, &frame, 60)?;
    println!("   magazine: {:?}\n", controller.provider().magazine(pistol));

    println!("3. Switch to the next weapon");
    controller.try_select_next_weapon()?;
    run(&mut controller, &frame, 60)?;
    println!(
        "   in use: {:?}, dual: {}\n",
        controller.provider().weapon_in_use(),
        controller.provider().is_dual_use()
    );

    println!("4. Hold the trigger for one second");
    controller.try_start_attacking()?;
    run(&mut controller, &frame, 30)?;
    controller.try_stop_attacking()?;
    run(&mut controller, &frame, 10)?;
    println!("   magazine: {:?}\n", controller.provider().magazine(uzi));

    println!("5. Cues for the render and sound layers");
    for cue in controller.provider_mut().drain_cues() {
        println!("   {:?}", cue);
    }

    let checkpoint = controller.checkpoint();
    println!(
        "\nCheckpoint {} in state {:?}",
        checkpoint.machine.id, checkpoint.machine.current_state
    );
    println!(
        "History: {} transitions over {:.2}s",
        controller.machine().history().len(),
        controller.machine().history().duration().unwrap_or(0.0)
    );

    Ok(())
}

/// Run `frames` frames, printing state changes.
fn run(
    controller: &mut Controller,
    frame: &FixedStepTimer,
    frames: usize,
) -> Result<(), holster::MachineError> {
    let mut last: PlayerState = controller.current_state();
    for _ in 0..frames {
        controller.update_logical_layer(frame)?;
        let state = controller.current_state();
        if state != last {
            println!("   {:?} -> {:?}", last, state);
            last = state;
        }
    }
    Ok(())
}
