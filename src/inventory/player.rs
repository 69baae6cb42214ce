//! Reference gameplay layer: a player carrying weapons and ammunition.

use crate::inventory::ammo::{AmmunitionContainer, AmmunitionId};
use crate::inventory::collectible::Collectible;
use crate::inventory::weapon::{Armory, WeaponId, WeaponTimings};
use crate::weapon::{clamp_progress, motion_progress, SelectionDirection, WeaponActionProvider};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_HEALTH: u32 = 100;

/// Hand holding a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Primary,
    Secondary,
}

impl Hand {
    fn index(self) -> usize {
        match self {
            Hand::Primary => 0,
            Hand::Secondary => 1,
        }
    }
}

/// A weapon in one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldWeapon {
    /// Rounds in the magazine.
    pub magazine: u32,
}

/// Presentation hint queued for the render and sound layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCue {
    Shot { weapon: WeaponId, rounds: u32 },
    Blow { weapon: Option<WeaponId>, count: u32 },
    Reload { weapon: WeaponId, rounds: u32 },
    PullOut { weapon: Option<WeaponId> },
    PutBack { weapon: Option<WeaponId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Still,
    PullingOut,
    PuttingBack,
}

/// Player inventory, health and weapon motion.
///
/// Weapon position runs from 0 (put away) to 1 (fully out); pull-out and
/// put-back progress are both derived from it.
#[derive(Debug, Clone)]
pub struct PlayerData {
    id: Uuid,
    armory: Armory,
    hands: Vec<[Option<HeldWeapon>; 2]>,
    containers: Vec<AmmunitionContainer>,
    health: u32,
    invincible: bool,
    weapon_in_use: Option<WeaponId>,
    dual_use: bool,
    weapon_position: f64,
    press_progress: f64,
    attack_progress: f64,
    end_attack_progress: f64,
    release_progress: f64,
    motion: Motion,
    cues: Vec<WeaponCue>,
}

impl PlayerData {
    pub fn new(armory: Armory) -> Self {
        let hands = vec![[None, None]; armory.weapon_count()];
        let containers = armory
            .ammunition_ids()
            .filter_map(|id| armory.ammunition(id))
            .map(|spec| AmmunitionContainer::new(spec.capacity))
            .collect();

        Self {
            id: Uuid::new_v4(),
            armory,
            hands,
            containers,
            health: MAX_HEALTH,
            invincible: false,
            weapon_in_use: None,
            dual_use: false,
            weapon_position: 1.0,
            press_progress: 0.0,
            attack_progress: 0.0,
            end_attack_progress: 1.0,
            release_progress: 0.0,
            motion: Motion::Still,
            cues: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    // --- inventory ---

    /// Pick up `item`. Returns whether it was taken.
    ///
    /// A taken weapon becomes owned by this player.
    pub fn collect(&mut self, item: &mut Collectible) -> bool {
        match item {
            Collectible::Weapon {
                weapon,
                primary,
                owner,
                watermarked,
                magazine,
            } => {
                let allowed = *owner == Some(self.id) || !*watermarked;
                if !allowed {
                    tracing::debug!("Refusing watermarked weapon {:?}", weapon);
                    return false;
                }
                let hand = if *primary { Hand::Primary } else { Hand::Secondary };
                let taken = self.take_weapon(*weapon, hand, *magazine);
                if taken {
                    *owner = Some(self.id);
                }
                taken
            }
            Collectible::Ammunition { ammunition, count } => {
                self.give_ammunition(*ammunition, *count) > 0
            }
            Collectible::Medikit { health } => {
                if self.health >= MAX_HEALTH {
                    return false;
                }
                self.increase_health(*health);
                true
            }
            Collectible::Teleporter { .. } => {
                tracing::warn!("Teleporters cannot be collected");
                false
            }
        }
    }

    /// Give a full weapon in the primary hand.
    pub fn give_weapon(&mut self, weapon: WeaponId) -> bool {
        let magazine = self
            .armory
            .weapon(weapon)
            .map(|spec| spec.magazine_size)
            .unwrap_or(0);
        self.take_weapon(weapon, Hand::Primary, magazine)
    }

    fn take_weapon(&mut self, weapon: WeaponId, hand: Hand, magazine: u32) -> bool {
        let Some(spec) = self.armory.weapon(weapon) else {
            tracing::warn!("Ignoring unknown weapon {:?}", weapon);
            return false;
        };
        let magazine = if spec.is_for_melee() {
            0
        } else {
            magazine.min(spec.magazine_size)
        };
        let two_handed = spec.two_handed;

        let held = &mut self.hands[weapon.0];
        if held[hand.index()].is_some() {
            return false;
        }
        if hand == Hand::Secondary && (two_handed || held[Hand::Primary.index()].is_none()) {
            return false;
        }
        held[hand.index()] = Some(HeldWeapon { magazine });

        if self.weapon_in_use.is_none() {
            self.weapon_in_use = Some(weapon);
            self.dual_use = false;
            self.weapon_position = 1.0;
        }
        true
    }

    /// Add spare rounds. Returns how many fit.
    pub fn give_ammunition(&mut self, ammunition: AmmunitionId, count: u32) -> u32 {
        match self.containers.get_mut(ammunition.0) {
            Some(container) => container.add(count),
            None => {
                tracing::warn!("Ignoring unknown ammunition {:?}", ammunition);
                0
            }
        }
    }

    pub fn container(&self, ammunition: AmmunitionId) -> Option<&AmmunitionContainer> {
        self.containers.get(ammunition.0)
    }

    pub fn held(&self, weapon: WeaponId, hand: Hand) -> Option<&HeldWeapon> {
        self.hands.get(weapon.0)?[hand.index()].as_ref()
    }

    /// Rounds in the primary magazine of `weapon`.
    pub fn magazine(&self, weapon: WeaponId) -> Option<u32> {
        self.held(weapon, Hand::Primary).map(|held| held.magazine)
    }

    pub fn weapon_in_use(&self) -> Option<WeaponId> {
        self.weapon_in_use
    }

    pub fn is_dual_use(&self) -> bool {
        self.dual_use
    }

    /// Position of the weapon in use, 0 put away, 1 fully out.
    pub fn weapon_position(&self) -> f64 {
        self.weapon_position
    }

    /// Take every queued presentation cue.
    pub fn drain_cues(&mut self) -> Vec<WeaponCue> {
        std::mem::take(&mut self.cues)
    }

    // --- health ---

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Returns the health actually gained.
    pub fn increase_health(&mut self, amount: u32) -> u32 {
        let gained = amount.min(MAX_HEALTH.saturating_sub(self.health));
        self.health += gained;
        gained
    }

    /// Returns the health actually lost.
    pub fn decrease_health(&mut self, amount: u32) -> u32 {
        if self.invincible {
            return 0;
        }
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Bring the player back with full health and an empty inventory.
    pub fn respawn(&mut self) {
        self.health = MAX_HEALTH;
        self.weapon_in_use = None;
        self.dual_use = false;
        for held in &mut self.hands {
            *held = [None, None];
        }
        for container in &mut self.containers {
            container.clear();
        }
        self.weapon_position = 1.0;
        self.press_progress = 0.0;
        self.attack_progress = 0.0;
        self.end_attack_progress = 1.0;
        self.release_progress = 0.0;
        self.motion = Motion::Still;
    }

    // --- weapon use ---

    fn timings(&self) -> WeaponTimings {
        self.weapon_in_use
            .and_then(|weapon| self.armory.weapon(weapon))
            .map(|spec| spec.timings)
            .unwrap_or(WeaponTimings::INSTANT)
    }

    fn hands_in_use(&self) -> &'static [Hand] {
        if self.dual_use {
            &[Hand::Primary, Hand::Secondary]
        } else {
            &[Hand::Primary]
        }
    }

    /// Firearm in use with its ammunition and rounds per shot.
    fn firearm_in_use(&self) -> Option<(WeaponId, AmmunitionId, u32)> {
        let weapon = self.weapon_in_use?;
        let ammunition = self.armory.ammunition_of(weapon)?;
        let per_shot = self.armory.weapon(weapon)?.ammunition_per_shot;
        Some((weapon, ammunition, per_shot))
    }

    fn slot_available(&self, weapon: WeaponId, dual: bool) -> bool {
        let Some(held) = self.hands.get(weapon.0) else {
            return false;
        };
        held[Hand::Primary.index()].is_some() && (!dual || held[Hand::Secondary.index()].is_some())
    }

    /// Walk the (weapon, dual) slots in `direction`, starting next to the
    /// current one, and return the first the player can use.
    fn find_selection(&self, direction: SelectionDirection) -> Option<(WeaponId, bool)> {
        let weapons = self.armory.weapon_count();
        if weapons == 0 {
            return None;
        }
        let slots = weapons * 2;
        let next = direction == SelectionDirection::Next;

        let (first_weapon, first_dual) = match self.weapon_in_use {
            Some(weapon) => {
                let shift = usize::from(next == self.dual_use);
                let index = if next {
                    (weapon.0 + shift) % weapons
                } else {
                    (weapon.0 + weapons - shift) % weapons
                };
                (index, !self.dual_use)
            }
            None if next => (0, false),
            None => (weapons - 1, true),
        };

        let mut slot = first_weapon * 2 + usize::from(first_dual);
        for _ in 0..slots {
            let candidate = (WeaponId(slot / 2), slot % 2 == 1);
            if self.slot_available(candidate.0, candidate.1) {
                return Some(candidate);
            }
            slot = if next {
                (slot + 1) % slots
            } else {
                (slot + slots - 1) % slots
            };
        }
        None
    }

    fn start_motion(&mut self, motion: Motion) {
        if self.motion == motion {
            return;
        }
        self.motion = motion;
        let weapon = self.weapon_in_use;
        match motion {
            Motion::PullingOut => self.cues.push(WeaponCue::PullOut { weapon }),
            Motion::PuttingBack => self.cues.push(WeaponCue::PutBack { weapon }),
            Motion::Still => {}
        }
    }
}

impl WeaponActionProvider for PlayerData {
    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn is_press_trigger_complete(&self) -> bool {
        self.press_progress >= 1.0
    }

    fn is_attack_complete(&self) -> bool {
        self.attack_progress >= 1.0
    }

    fn is_release_trigger_complete(&self) -> bool {
        self.release_progress >= 1.0
    }

    fn is_fully_automatic(&self) -> bool {
        self.weapon_in_use
            .and_then(|weapon| self.armory.weapon(weapon))
            .is_some_and(|spec| spec.fully_automatic)
    }

    fn is_magazine_empty(&self) -> bool {
        let Some((weapon, _, per_shot)) = self.firearm_in_use() else {
            return false;
        };
        !self
            .hands_in_use()
            .iter()
            .filter_map(|hand| self.held(weapon, *hand))
            .any(|held| held.magazine >= per_shot)
    }

    fn can_reload(&self) -> bool {
        let Some((weapon, ammunition, _)) = self.firearm_in_use() else {
            return false;
        };
        let Some(spec) = self.armory.weapon(weapon) else {
            return false;
        };
        let has_rounds = self
            .container(ammunition)
            .is_some_and(|container| !container.is_empty());
        has_rounds
            && self
                .hands_in_use()
                .iter()
                .filter_map(|hand| self.held(weapon, *hand))
                .any(|held| held.magazine < spec.magazine_size)
    }

    fn can_select_weapon(&self, direction: SelectionDirection) -> bool {
        match self.find_selection(direction) {
            Some((weapon, dual)) => {
                self.weapon_in_use != Some(weapon) || self.dual_use != dual
            }
            None => false,
        }
    }

    fn compute_end_attack_progress(&self) -> f64 {
        self.end_attack_progress
    }

    fn compute_put_back_progress(&self) -> f64 {
        1.0 - self.weapon_position
    }

    fn compute_pull_out_progress(&self) -> f64 {
        self.weapon_position
    }

    fn attack(&mut self) -> u32 {
        self.attack_progress = 0.0;
        self.end_attack_progress = 0.0;

        let Some(weapon) = self.weapon_in_use else {
            self.cues.push(WeaponCue::Blow {
                weapon: None,
                count: 1,
            });
            return 1;
        };

        let Some((_, _, per_shot)) = self.firearm_in_use() else {
            let count = if self.dual_use { 2 } else { 1 };
            self.cues.push(WeaponCue::Blow {
                weapon: Some(weapon),
                count,
            });
            return count;
        };

        let mut consumed = 0;
        for hand in self.hands_in_use() {
            if let Some(held) = self.hands[weapon.0][hand.index()].as_mut() {
                let rounds = per_shot.min(held.magazine);
                held.magazine -= rounds;
                consumed += rounds;
            }
        }
        if consumed > 0 {
            self.cues.push(WeaponCue::Shot {
                weapon,
                rounds: consumed,
            });
        }
        consumed
    }

    fn reload(&mut self) -> u32 {
        let Some((weapon, ammunition, _)) = self.firearm_in_use() else {
            return 0;
        };
        let Some(size) = self.armory.weapon(weapon).map(|spec| spec.magazine_size) else {
            return 0;
        };

        let mut moved = 0;
        for hand in self.hands_in_use() {
            let Some(held) = self.hands[weapon.0][hand.index()].as_mut() else {
                continue;
            };
            let Some(container) = self.containers.get_mut(ammunition.0) else {
                continue;
            };
            let rounds = container.remove(size.saturating_sub(held.magazine));
            held.magazine += rounds;
            moved += rounds;
        }
        if moved > 0 {
            self.cues.push(WeaponCue::Reload {
                weapon,
                rounds: moved,
            });
        }
        moved
    }

    fn select_weapon(&mut self, direction: SelectionDirection) -> bool {
        match self.find_selection(direction) {
            Some((weapon, dual)) => {
                self.weapon_in_use = Some(weapon);
                self.dual_use = dual;
                self.weapon_position = 0.0;
                true
            }
            None => false,
        }
    }

    fn press_trigger(&mut self, elapsed: f64) {
        self.motion = Motion::Still;
        self.release_progress = 0.0;
        self.press_progress = motion_progress(elapsed, self.timings().press_trigger);
    }

    fn update_attack(&mut self, elapsed: f64) {
        self.attack_progress = motion_progress(elapsed, self.timings().shot);
    }

    fn wait_for_attack_end(&mut self, elapsed: f64, initial_progress: f64) {
        self.end_attack_progress = clamp_progress(
            initial_progress + motion_progress(elapsed, self.timings().end_attack),
        );
    }

    fn release_trigger(&mut self, elapsed: f64) {
        self.press_progress = 0.0;
        self.release_progress = motion_progress(elapsed, self.timings().release_trigger);
    }

    fn pull_out(&mut self, elapsed: f64) {
        self.start_motion(Motion::PullingOut);
        self.weapon_position = motion_progress(elapsed, self.timings().pull_out);
    }

    fn put_back(&mut self, elapsed: f64, initial_progress: f64) {
        self.start_motion(Motion::PuttingBack);
        let progress =
            clamp_progress(initial_progress + motion_progress(elapsed, self.timings().put_back));
        self.weapon_position = 1.0 - progress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArmoryConfig;
    use crate::inventory::weapon::WeaponSpec;

    fn armory() -> Armory {
        let mut config = ArmoryConfig::default();
        config.weapons.push(WeaponSpec {
            name: "KNIFE".to_string(),
            magazine_size: 0,
            ammunition: None,
            ammunition_per_shot: 0,
            two_handed: false,
            fully_automatic: false,
            timings: WeaponTimings::default(),
        });
        Armory::new(config).unwrap()
    }

    fn player() -> PlayerData {
        PlayerData::new(armory())
    }

    fn weapon(player: &PlayerData, name: &str) -> WeaponId {
        player.armory().find(name).unwrap()
    }

    fn dual(player: &mut PlayerData, name: &str, magazine: u32) -> WeaponId {
        let id = weapon(player, name);
        assert!(player.collect(&mut Collectible::fresh_weapon(id, true, magazine)));
        assert!(player.collect(&mut Collectible::fresh_weapon(id, false, magazine)));
        id
    }

    #[test]
    fn first_weapon_is_put_in_use() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");

        assert!(player.give_weapon(pistol));

        assert_eq!(player.weapon_in_use(), Some(pistol));
        assert_eq!(player.magazine(pistol), Some(8));
        assert!(!player.give_weapon(pistol));
    }

    #[test]
    fn secondary_hand_requires_the_primary() {
        let mut player = player();
        let uzi = weapon(&player, "UZI");

        assert!(!player.collect(&mut Collectible::fresh_weapon(uzi, false, 20)));
        assert!(player.collect(&mut Collectible::fresh_weapon(uzi, true, 20)));
        assert!(player.collect(&mut Collectible::fresh_weapon(uzi, false, 20)));
    }

    #[test]
    fn two_handed_weapons_cannot_be_dual() {
        let mut player = player();
        let shotgun = weapon(&player, "SHOTGUN");

        assert!(player.collect(&mut Collectible::fresh_weapon(shotgun, true, 3)));
        assert!(!player.collect(&mut Collectible::fresh_weapon(shotgun, false, 3)));
    }

    #[test]
    fn watermarked_weapons_stay_with_their_owner() {
        let mut player = player();
        let mut other = PlayerData::new(armory());
        let laser = weapon(&player, "LASER");

        let mut item = Collectible::Weapon {
            weapon: laser,
            primary: true,
            owner: Some(other.id()),
            watermarked: true,
            magazine: 15,
        };
        assert!(!player.collect(&mut item));
        assert!(other.collect(&mut item));

        let mut dropped = Collectible::Weapon {
            weapon: laser,
            primary: true,
            owner: Some(other.id()),
            watermarked: false,
            magazine: 15,
        };
        assert!(player.collect(&mut dropped));
        assert!(matches!(dropped, Collectible::Weapon { owner: Some(id), .. } if id == player.id()));
    }

    #[test]
    fn collected_magazine_is_capped() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");

        player.collect(&mut Collectible::fresh_weapon(pistol, true, 99));

        assert_eq!(player.magazine(pistol), Some(8));
    }

    #[test]
    fn ammunition_and_medikits() {
        let mut player = player();
        let cartridges = player.armory().find_ammunition("CARTRIDGE").unwrap();

        assert!(player.collect(&mut Collectible::Ammunition {
            ammunition: cartridges,
            count: 80,
        }));
        assert_eq!(player.container(cartridges).unwrap().count(), 50);
        assert!(!player.collect(&mut Collectible::Ammunition {
            ammunition: cartridges,
            count: 1,
        }));

        assert!(!player.collect(&mut Collectible::Medikit { health: 20 }));
        player.decrease_health(30);
        assert!(player.collect(&mut Collectible::Medikit { health: 50 }));
        assert_eq!(player.health(), MAX_HEALTH);

        assert!(!player.collect(&mut Collectible::Teleporter {
            destination: [0.0, 1.0, 0.0]
        }));
    }

    #[test]
    fn damage_respects_invincibility_and_floor() {
        let mut player = player();

        player.set_invincible(true);
        assert_eq!(player.decrease_health(40), 0);
        player.set_invincible(false);

        assert_eq!(player.decrease_health(150), 100);
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn respawn_empties_the_inventory() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");
        let nine = player.armory().find_ammunition("BULLET_9MM").unwrap();
        player.give_weapon(pistol);
        player.give_ammunition(nine, 40);
        player.decrease_health(100);

        player.respawn();

        assert_eq!(player.health(), MAX_HEALTH);
        assert_eq!(player.weapon_in_use(), None);
        assert_eq!(player.magazine(pistol), None);
        assert!(player.container(nine).unwrap().is_empty());
    }

    #[test]
    fn attack_without_weapon_is_a_punch() {
        let mut player = player();

        assert_eq!(player.attack(), 1);
        assert_eq!(
            player.drain_cues(),
            vec![WeaponCue::Blow {
                weapon: None,
                count: 1
            }]
        );
    }

    #[test]
    fn dual_melee_strikes_twice() {
        let mut player = player();
        let knife = dual(&mut player, "KNIFE", 0);
        player.select_weapon(SelectionDirection::Next);
        assert_eq!(player.weapon_in_use(), Some(knife));
        assert!(player.is_dual_use());

        assert_eq!(player.attack(), 2);
        assert!(!player.is_magazine_empty());
        assert!(!player.can_reload());
    }

    #[test]
    fn dual_firearm_uses_both_magazines() {
        let mut player = player();
        let uzi = dual(&mut player, "UZI", 20);
        assert!(player.select_weapon(SelectionDirection::Next));
        assert!(player.is_dual_use());

        assert_eq!(player.attack(), 2);
        assert_eq!(player.held(uzi, Hand::Primary).unwrap().magazine, 19);
        assert_eq!(player.held(uzi, Hand::Secondary).unwrap().magazine, 19);
    }

    #[test]
    fn empty_magazine_consumes_nothing() {
        let mut player = player();
        let rocket = weapon(&player, "ROCKET_LAUNCHER");
        player.give_weapon(rocket);

        assert_eq!(player.attack(), 1);
        assert!(player.is_magazine_empty());
        assert_eq!(player.attack(), 0);
    }

    #[test]
    fn dual_reload_shares_the_container() {
        let mut player = player();
        let mag = dual(&mut player, "MAG_60", 0);
        player.select_weapon(SelectionDirection::Next);
        let nine = player.armory().find_ammunition("BULLET_9MM").unwrap();
        player.give_ammunition(nine, 45);

        assert!(player.can_reload());
        assert_eq!(player.reload(), 45);

        assert_eq!(player.held(mag, Hand::Primary).unwrap().magazine, 30);
        assert_eq!(player.held(mag, Hand::Secondary).unwrap().magazine, 15);
        assert!(player.container(nine).unwrap().is_empty());
        assert!(!player.can_reload());
    }

    #[test]
    fn reload_leaves_the_remainder_in_the_container() {
        let mut player = player();
        let mag = dual(&mut player, "MAG_60", 10);
        player.select_weapon(SelectionDirection::Next);
        let nine = player.armory().find_ammunition("BULLET_9MM").unwrap();
        player.give_ammunition(nine, 45);

        assert_eq!(player.reload(), 40);

        assert_eq!(player.held(mag, Hand::Primary).unwrap().magazine, 30);
        assert_eq!(player.held(mag, Hand::Secondary).unwrap().magazine, 30);
        assert_eq!(player.container(nine).unwrap().count(), 5);
    }

    #[test]
    fn selection_walks_single_then_dual_slots() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");
        let uzi = dual(&mut player, "UZI", 20);
        player.give_weapon(pistol);
        assert_eq!(player.weapon_in_use(), Some(uzi));

        assert!(player.select_weapon(SelectionDirection::Next));
        assert_eq!((player.weapon_in_use(), player.is_dual_use()), (Some(uzi), true));

        assert!(player.select_weapon(SelectionDirection::Next));
        assert_eq!((player.weapon_in_use(), player.is_dual_use()), (Some(pistol), false));

        assert!(player.select_weapon(SelectionDirection::Previous));
        assert_eq!((player.weapon_in_use(), player.is_dual_use()), (Some(uzi), true));

        assert!(player.select_weapon(SelectionDirection::Previous));
        assert_eq!((player.weapon_in_use(), player.is_dual_use()), (Some(uzi), false));
    }

    #[test]
    fn single_weapon_cannot_be_switched() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");
        player.give_weapon(pistol);

        assert!(!player.can_select_weapon(SelectionDirection::Next));
        assert!(!player.can_select_weapon(SelectionDirection::Previous));
    }

    #[test]
    fn interrupted_pull_out_gives_partial_put_back() {
        let mut player = player();
        let pistol = weapon(&player, "PISTOL_9MM");
        player.give_weapon(pistol);

        player.pull_out(0.25);
        assert_eq!(player.compute_pull_out_progress(), 0.5);
        assert_eq!(player.compute_put_back_progress(), 0.5);

        player.put_back(0.0, player.compute_put_back_progress());
        assert_eq!(player.weapon_position(), 0.5);
        player.put_back(0.25, 0.5);
        assert_eq!(player.weapon_position(), 0.0);

        assert_eq!(
            player.drain_cues(),
            vec![
                WeaponCue::PullOut {
                    weapon: Some(pistol)
                },
                WeaponCue::PutBack {
                    weapon: Some(pistol)
                },
            ]
        );
    }
}
