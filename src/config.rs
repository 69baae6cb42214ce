//! Machine and armory configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. JSON config file (if specified via HOLSTER_CONFIG)
//! 3. Environment variables

use crate::inventory::{AmmunitionSpec, WeaponSpec, WeaponTimings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// State engine limits.
    pub machine: MachineConfig,
    /// Weapon and ammunition catalogue.
    pub armory: ArmoryConfig,
}

impl Config {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("HOLSTER_CONFIG") {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            origin: format!("file '{}'", path.display()),
            message: e.to_string(),
        })
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            origin: "string".to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) {
        self.machine.apply_env_overrides();
    }

    /// Checks every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        into_result(Validation::all_vec(vec![
            self.machine.check(),
            self.armory.check(),
        ])
        .map(|_| ()))
    }
}

/// How the machine reports events that match no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedEventPolicy {
    Ignore,
    #[default]
    Debug,
    Warn,
}

impl FromStr for UnmatchedEventPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "debug" => Ok(Self::Debug),
            "warn" => Ok(Self::Warn),
            other => Err(format!("unknown unmatched event policy '{}'", other)),
        }
    }
}

/// State engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of events applied by one `fire_event` or `tick`.
    pub max_cascade_steps: usize,
    /// Number of transitions kept in the history.
    pub history_capacity: usize,
    /// Reporting of events with no matching transition.
    pub unmatched_events: UnmatchedEventPolicy,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_cascade_steps: 32,
            history_capacity: crate::core::DEFAULT_HISTORY_CAPACITY,
            unmatched_events: UnmatchedEventPolicy::Debug,
        }
    }
}

impl MachineConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(steps) = std::env::var("HOLSTER_MAX_CASCADE_STEPS") {
            if let Ok(n) = steps.parse() {
                self.max_cascade_steps = n;
            }
        }

        if let Ok(capacity) = std::env::var("HOLSTER_HISTORY_CAPACITY") {
            if let Ok(n) = capacity.parse() {
                self.history_capacity = n;
            }
        }

        if let Ok(policy) = std::env::var("HOLSTER_UNMATCHED_EVENTS") {
            match policy.parse() {
                Ok(parsed) => self.unmatched_events = parsed,
                Err(e) => tracing::warn!("Ignoring HOLSTER_UNMATCHED_EVENTS: {}", e),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        into_result(self.check())
    }

    pub(crate) fn check(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        if self.max_cascade_steps == 0 {
            Validation::fail(ConfigViolation::ZeroCascadeLimit)
        } else {
            Validation::success(())
        }
    }
}

/// Weapon and ammunition catalogue.
///
/// Weapons and ammunition are addressed by their position in these lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmoryConfig {
    pub ammunition: Vec<AmmunitionSpec>,
    pub weapons: Vec<WeaponSpec>,
}

impl Default for ArmoryConfig {
    fn default() -> Self {
        let ammunition = [
            ("BULLET_5_56MM", 300),
            ("BULLET_7_62MM", 300),
            ("BULLET_9MM", 300),
            ("BULLET_10MM", 200),
            ("CARTRIDGE", 50),
            ("ENERGY_CELL", 150),
            ("ANTI_TANK_ROCKET_105MM", 10),
        ]
        .into_iter()
        .map(|(name, capacity)| AmmunitionSpec::new(name, capacity))
        .collect();

        let firearm = |name: &str, magazine: u32, ammo: &str, shot: f64, automatic: bool, two_handed: bool| {
            WeaponSpec {
                name: name.to_string(),
                magazine_size: magazine,
                ammunition: Some(ammo.to_string()),
                ammunition_per_shot: 1,
                two_handed,
                fully_automatic: automatic,
                timings: WeaponTimings {
                    shot,
                    ..WeaponTimings::default()
                },
            }
        };

        let weapons = vec![
            firearm("PISTOL_9MM", 8, "BULLET_9MM", 0.5, true, false),
            firearm("PISTOL_10MM", 10, "BULLET_10MM", 0.5, true, false),
            firearm("MAG_60", 30, "BULLET_9MM", 0.1, true, false),
            firearm("UZI", 20, "BULLET_9MM", 0.1, true, false),
            firearm("SMACH", 35, "BULLET_5_56MM", 0.1, true, false),
            firearm("LASER", 15, "ENERGY_CELL", 1.0, false, false),
            firearm("SHOTGUN", 3, "CARTRIDGE", 1.5, false, true),
            firearm("ROCKET_LAUNCHER", 1, "ANTI_TANK_ROCKET_105MM", 2.0, false, true),
        ];

        Self {
            ammunition,
            weapons,
        }
    }
}

impl ArmoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        into_result(self.check())
    }

    pub(crate) fn check(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        let mut ammunition_names = HashSet::new();
        for spec in &self.ammunition {
            if !ammunition_names.insert(spec.name.as_str()) {
                checks.push(Validation::fail(ConfigViolation::DuplicateAmmunition {
                    name: spec.name.clone(),
                }));
            }
        }

        let mut weapon_names = HashSet::new();
        for weapon in &self.weapons {
            if !weapon_names.insert(weapon.name.as_str()) {
                checks.push(Validation::fail(ConfigViolation::DuplicateWeapon {
                    name: weapon.name.clone(),
                }));
            }

            if let Some(ammunition) = &weapon.ammunition {
                if !ammunition_names.contains(ammunition.as_str()) {
                    checks.push(Validation::fail(ConfigViolation::UnknownAmmunition {
                        weapon: weapon.name.clone(),
                        ammunition: ammunition.clone(),
                    }));
                }
                if weapon.magazine_size == 0 {
                    checks.push(Validation::fail(ConfigViolation::EmptyMagazine {
                        weapon: weapon.name.clone(),
                    }));
                }
                if weapon.ammunition_per_shot == 0 {
                    checks.push(Validation::fail(ConfigViolation::ZeroAmmunitionPerShot {
                        weapon: weapon.name.clone(),
                    }));
                }
            }

            for (motion, seconds) in weapon.timings.motions() {
                if !seconds.is_finite() || seconds < 0.0 {
                    checks.push(Validation::fail(ConfigViolation::InvalidTiming {
                        weapon: weapon.name.clone(),
                        motion,
                        seconds,
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigViolation {
    #[error("max_cascade_steps must be at least 1")]
    ZeroCascadeLimit,

    #[error("ammunition '{name}' is declared more than once")]
    DuplicateAmmunition { name: String },

    #[error("weapon '{name}' is declared more than once")]
    DuplicateWeapon { name: String },

    #[error("weapon '{weapon}' uses unknown ammunition '{ammunition}'")]
    UnknownAmmunition { weapon: String, ammunition: String },

    #[error("firearm '{weapon}' has an empty magazine")]
    EmptyMagazine { weapon: String },

    #[error("firearm '{weapon}' consumes no ammunition per shot")]
    ZeroAmmunitionPerShot { weapon: String },

    #[error("weapon '{weapon}' has invalid {motion} duration {seconds}")]
    InvalidTiming {
        weapon: String,
        motion: &'static str,
        seconds: f64,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config from {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("invalid configuration: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn into_result(validation: Validation<(), NonEmptyVec<ConfigViolation>>) -> Result<(), ConfigError> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
    }
}
