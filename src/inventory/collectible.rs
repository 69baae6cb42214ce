//! Items a player can pick up.

use crate::inventory::ammo::AmmunitionId;
use crate::inventory::weapon::WeaponId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item lying in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Collectible {
    Weapon {
        weapon: WeaponId,
        /// Whether this is the copy held in the primary hand.
        primary: bool,
        /// Last player who held the weapon.
        owner: Option<Uuid>,
        /// Watermarked weapons can only be picked up by their owner.
        watermarked: bool,
        /// Rounds left in the magazine.
        magazine: u32,
    },
    Ammunition {
        ammunition: AmmunitionId,
        count: u32,
    },
    Medikit {
        health: u32,
    },
    Teleporter {
        destination: [f32; 3],
    },
}

impl Collectible {
    /// A weapon nobody owns yet, with a full magazine of `magazine` rounds.
    pub fn fresh_weapon(weapon: WeaponId, primary: bool, magazine: u32) -> Self {
        Collectible::Weapon {
            weapon,
            primary,
            owner: None,
            watermarked: false,
            magazine,
        }
    }
}
