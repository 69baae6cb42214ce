//! Weapon catalogue.

use crate::config::{ArmoryConfig, ConfigError};
use crate::inventory::ammo::{AmmunitionId, AmmunitionSpec};
use serde::{Deserialize, Serialize};

/// Index of a weapon in the [`Armory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub(crate) usize);

impl WeaponId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Duration in seconds of each motion of a weapon.
///
/// A duration of 0 completes the motion on its first frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTimings {
    pub pull_out: f64,
    pub put_back: f64,
    pub press_trigger: f64,
    /// Duration of one attack.
    pub shot: f64,
    /// Recovery after an attack before the next one may start.
    pub end_attack: f64,
    pub release_trigger: f64,
}

impl WeaponTimings {
    /// Timings of bare hands: every motion is immediate.
    pub const INSTANT: WeaponTimings = WeaponTimings {
        pull_out: 0.0,
        put_back: 0.0,
        press_trigger: 0.0,
        shot: 0.0,
        end_attack: 0.0,
        release_trigger: 0.0,
    };

    /// Every motion paired with its name.
    pub fn motions(&self) -> [(&'static str, f64); 6] {
        [
            ("pull_out", self.pull_out),
            ("put_back", self.put_back),
            ("press_trigger", self.press_trigger),
            ("shot", self.shot),
            ("end_attack", self.end_attack),
            ("release_trigger", self.release_trigger),
        ]
    }
}

impl Default for WeaponTimings {
    fn default() -> Self {
        Self {
            pull_out: 0.5,
            put_back: 0.5,
            press_trigger: 0.1,
            shot: 0.25,
            end_attack: 0.15,
            release_trigger: 0.1,
        }
    }
}

/// Catalogue entry for one weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    /// Rounds held by one magazine. Ignored for melee weapons.
    pub magazine_size: u32,
    /// Ammunition type by name; `None` for melee weapons.
    #[serde(default)]
    pub ammunition: Option<String>,
    #[serde(default = "default_ammunition_per_shot")]
    pub ammunition_per_shot: u32,
    #[serde(default)]
    pub two_handed: bool,
    #[serde(default)]
    pub fully_automatic: bool,
    #[serde(default)]
    pub timings: WeaponTimings,
}

fn default_ammunition_per_shot() -> u32 {
    1
}

impl WeaponSpec {
    pub fn is_for_melee(&self) -> bool {
        self.ammunition.is_none()
    }
}

/// Validated catalogue of weapons and ammunition types.
#[derive(Debug, Clone)]
pub struct Armory {
    ammunition: Vec<AmmunitionSpec>,
    weapons: Vec<WeaponSpec>,
    weapon_ammunition: Vec<Option<AmmunitionId>>,
}

impl Armory {
    /// Validate `config` and resolve ammunition references.
    pub fn new(config: ArmoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ArmoryConfig {
            ammunition,
            weapons,
        } = config;
        let weapon_ammunition = weapons
            .iter()
            .map(|weapon| {
                weapon.ammunition.as_deref().and_then(|name| {
                    ammunition
                        .iter()
                        .position(|spec| spec.name == name)
                        .map(AmmunitionId)
                })
            })
            .collect();

        Ok(Self {
            ammunition,
            weapons,
            weapon_ammunition,
        })
    }

    pub fn find(&self, name: &str) -> Option<WeaponId> {
        self.weapons
            .iter()
            .position(|weapon| weapon.name == name)
            .map(WeaponId)
    }

    pub fn find_ammunition(&self, name: &str) -> Option<AmmunitionId> {
        self.ammunition
            .iter()
            .position(|spec| spec.name == name)
            .map(AmmunitionId)
    }

    pub fn weapon(&self, id: WeaponId) -> Option<&WeaponSpec> {
        self.weapons.get(id.0)
    }

    pub fn ammunition(&self, id: AmmunitionId) -> Option<&AmmunitionSpec> {
        self.ammunition.get(id.0)
    }

    /// Ammunition used by `weapon`, `None` for melee weapons.
    pub fn ammunition_of(&self, weapon: WeaponId) -> Option<AmmunitionId> {
        self.weapon_ammunition.get(weapon.0).copied().flatten()
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn ammunition_count(&self) -> usize {
        self.ammunition.len()
    }

    pub fn weapon_ids(&self) -> impl Iterator<Item = WeaponId> {
        (0..self.weapons.len()).map(WeaponId)
    }

    pub fn ammunition_ids(&self) -> impl Iterator<Item = AmmunitionId> {
        (0..self.ammunition.len()).map(AmmunitionId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_armory_resolves_ammunition() {
        let armory = Armory::new(ArmoryConfig::default()).unwrap();

        let uzi = armory.find("UZI").unwrap();
        let nine = armory.find_ammunition("BULLET_9MM").unwrap();

        assert_eq!(armory.ammunition_of(uzi), Some(nine));
        assert_eq!(armory.weapon(uzi).unwrap().magazine_size, 20);
        assert_eq!(armory.weapon_count(), 8);
        assert!(armory.find("BFG").is_none());
    }

    #[test]
    fn melee_weapons_use_no_ammunition() {
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
        let armory = Armory::new(config).unwrap();
        let knife = armory.find("KNIFE").unwrap();

        assert!(armory.weapon(knife).unwrap().is_for_melee());
        assert_eq!(armory.ammunition_of(knife), None);
    }

    #[test]
    fn invalid_catalogue_is_rejected() {
        let mut config = ArmoryConfig::default();
        config.weapons[0].ammunition = Some("PLASMA".to_string());

        assert!(matches!(Armory::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn weapon_spec_fills_defaults_from_json() {
        let spec: WeaponSpec = serde_json::from_str(
            r#"{ "name": "FLARE", "magazine_size": 1, "ammunition": "CARTRIDGE" }"#,
        )
        .unwrap();

        assert_eq!(spec.ammunition_per_shot, 1);
        assert!(!spec.fully_automatic);
        assert_eq!(spec.timings, WeaponTimings::default());
    }
}
