//! Reference gameplay layer implementing [`WeaponActionProvider`].
//!
//! An [`Armory`] is the validated weapon and ammunition catalogue; a
//! [`PlayerData`] carries weapons per hand, spare ammunition and health, and
//! derives motion progress from the weapon timings.
//!
//! [`WeaponActionProvider`]: crate::weapon::WeaponActionProvider

mod ammo;
mod collectible;
mod player;
mod weapon;

pub use ammo::{AmmunitionContainer, AmmunitionId, AmmunitionSpec};
pub use collectible::Collectible;
pub use player::{Hand, HeldWeapon, PlayerData, WeaponCue, MAX_HEALTH};
pub use weapon::{Armory, WeaponId, WeaponSpec, WeaponTimings};
