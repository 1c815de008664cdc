//! Scenario definitions: who flies where, and with which airframe.
//!
//! Scenarios are plain JSON. Every struct uses `#[serde(default)]`, so a
//! file only names what it changes; `ScenarioConfig::default()` is the
//! built-in patrol exercise.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use wingman_core::constants::*;
use wingman_flight::AircraftConfig;
use wingman_pilot_ai::profiles::PilotTuning;
use wingman_pilot_ai::PatrolRoute;

use crate::error::ScenarioError;

/// Upper bound accepted for `time_scale`.
pub const MAX_TIME_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    /// RNG seed. Same seed, same commands: same flight.
    pub seed: u64,
    pub time_scale: f64,
    /// Fixed physics rate (Hz).
    pub physics_rate: u32,
    pub player: PlayerSetup,
    pub enemies: Vec<EnemySetup>,
    pub ground_units: Vec<GroundUnitSetup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    pub name: String,
    pub position: DVec3,
    /// Compass heading (degrees, 0 = +Z).
    pub heading_deg: f64,
    /// Initial airspeed along the nose (m/s).
    pub speed: f64,
    /// Initial throttle, [0, 1].
    pub thrust: f64,
    /// Initial stick pitch, [-1, 1]. Held until the first stick command.
    pub trim_pitch: f64,
    pub health: i32,
    pub aircraft: AircraftConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySetup {
    pub name: String,
    pub position: DVec3,
    pub heading_deg: f64,
    pub speed: f64,
    /// [0, 1]
    pub difficulty: f64,
    pub patrol: Vec<DVec3>,
    /// Defaults to the first patrol waypoint.
    pub home: Option<DVec3>,
    pub health: i32,
    pub tuning: PilotTuning,
    pub aircraft: AircraftConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundUnitSetup {
    pub name: String,
    pub position: DVec3,
    pub health: i32,
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self {
            name: "Player".into(),
            position: DVec3::new(0.0, 150.0, -400.0),
            heading_deg: 0.0,
            speed: 35.0,
            thrust: 0.8,
            trim_pitch: DEFAULT_PLAYER_TRIM_PITCH,
            health: DEFAULT_HEALTH,
            aircraft: AircraftConfig::default(),
        }
    }
}

impl Default for EnemySetup {
    fn default() -> Self {
        Self {
            name: "Bandit".into(),
            position: DVec3::new(0.0, 150.0, 0.0),
            heading_deg: 0.0,
            speed: INITIAL_SPEED,
            difficulty: DEFAULT_DIFFICULTY,
            patrol: Vec::new(),
            home: None,
            health: DEFAULT_HEALTH,
            tuning: PilotTuning::default(),
            aircraft: AircraftConfig::default(),
        }
    }
}

impl Default for GroundUnitSetup {
    fn default() -> Self {
        Self {
            name: "Soldier".into(),
            position: DVec3::ZERO,
            health: DEFAULT_HEALTH,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "Patrol Exercise".into(),
            seed: 42,
            time_scale: 1.0,
            physics_rate: PHYSICS_RATE,
            player: PlayerSetup::default(),
            enemies: vec![
                EnemySetup {
                    name: "Bandit 1".into(),
                    position: DVec3::new(-600.0, 180.0, 600.0),
                    heading_deg: 90.0,
                    difficulty: 0.5,
                    patrol: square(DVec3::new(-600.0, 180.0, 600.0), 400.0),
                    ..EnemySetup::default()
                },
                EnemySetup {
                    name: "Bandit 2".into(),
                    position: DVec3::new(600.0, 220.0, 900.0),
                    heading_deg: 270.0,
                    difficulty: 0.8,
                    patrol: square(DVec3::new(600.0, 220.0, 900.0), 500.0),
                    ..EnemySetup::default()
                },
            ],
            ground_units: vec![
                GroundUnitSetup {
                    name: "Soldier 1".into(),
                    position: DVec3::new(20.0, 0.0, 300.0),
                    ..GroundUnitSetup::default()
                },
                GroundUnitSetup {
                    name: "Soldier 2".into(),
                    position: DVec3::new(-15.0, 0.0, 320.0),
                    ..GroundUnitSetup::default()
                },
                GroundUnitSetup {
                    name: "Soldier 3".into(),
                    position: DVec3::new(5.0, 0.0, 345.0),
                    ..GroundUnitSetup::default()
                },
            ],
        }
    }
}

/// Four corners of a level square circuit starting at `start`.
fn square(start: DVec3, side: f64) -> Vec<DVec3> {
    vec![
        start,
        start + DVec3::new(side, 0.0, 0.0),
        start + DVec3::new(side, 0.0, side),
        start + DVec3::new(0.0, 0.0, side),
    ]
}

impl ScenarioConfig {
    /// Parse and validate a scenario.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.physics_rate == 0 {
            return Err(ScenarioError::Invalid("physics_rate must be positive".into()));
        }
        if !self.time_scale.is_finite() || !(0.0..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err(ScenarioError::Invalid(format!(
                "time_scale {} outside [0, {MAX_TIME_SCALE}]",
                self.time_scale
            )));
        }

        if !(-1.0..=1.0).contains(&self.player.trim_pitch) {
            return Err(ScenarioError::Invalid(format!(
                "{}: trim_pitch {} outside [-1, 1]",
                self.player.name, self.player.trim_pitch
            )));
        }
        check_health(&self.player.name, self.player.health)?;
        check_aircraft(&self.player.name, &self.player.aircraft)?;

        for enemy in &self.enemies {
            if !(0.0..=1.0).contains(&enemy.difficulty) {
                return Err(ScenarioError::Invalid(format!(
                    "{}: difficulty {} outside [0, 1]",
                    enemy.name, enemy.difficulty
                )));
            }
            check_health(&enemy.name, enemy.health)?;
            check_aircraft(&enemy.name, &enemy.aircraft)?;
        }

        for unit in &self.ground_units {
            check_health(&unit.name, unit.health)?;
        }
        Ok(())
    }

    /// Override every enemy's difficulty, clamped to [0, 1].
    pub fn set_difficulty(&mut self, difficulty: f64) {
        let difficulty = if difficulty.is_finite() {
            difficulty.clamp(0.0, 1.0)
        } else {
            DEFAULT_DIFFICULTY
        };
        for enemy in &mut self.enemies {
            enemy.difficulty = difficulty;
        }
    }
}

impl EnemySetup {
    pub fn route(&self) -> PatrolRoute {
        PatrolRoute {
            waypoints: self.patrol.clone(),
            home: self.home,
        }
    }
}

fn check_health(name: &str, health: i32) -> Result<(), ScenarioError> {
    if health <= 0 {
        return Err(ScenarioError::Invalid(format!(
            "{name}: health must be positive, got {health}"
        )));
    }
    Ok(())
}

fn check_aircraft(name: &str, aircraft: &AircraftConfig) -> Result<(), ScenarioError> {
    aircraft
        .validate()
        .map_err(|source| ScenarioError::Aircraft {
            name: name.to_string(),
            source,
        })
}
