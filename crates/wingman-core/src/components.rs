//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems,
//! except for the flight model, rigid body and pilot brain which carry
//! their own state machines and live in their own crates.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::LOW_HEALTH_FRACTION;

/// Stable identifier used by commands, events and snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Callsign {
    pub id: u32,
    pub name: String,
}

/// Marks the human-flown aircraft (the tracked target of every pilot).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerAircraft;

/// Marks an AI-flown aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyAircraft;

/// A destroyed aircraft. Its body keeps flying under physics until it
/// hits the ground hard enough to explode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wreck;

/// Stick and throttle state for the player aircraft.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerStick {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    /// Current throttle setting, [0, 1].
    pub thrust: f64,
    /// -1 throttle down, 0 hold, +1 throttle up.
    pub throttle_direction: f64,
}

/// Hit points for anything that can be shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    /// LOW_HEALTH fires once current/max drops to or below this.
    pub low_health_fraction: f64,
    /// Set once LOW_HEALTH has been reported.
    pub low_health_reported: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            low_health_fraction: LOW_HEALTH_FRACTION,
            low_health_reported: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_low(&self) -> bool {
        self.max > 0 && (self.current as f64) <= self.max as f64 * self.low_health_fraction
    }
}

/// A soldier on the ground. Only damage and death matter here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundUnit {
    pub position: DVec3,
    /// Cleared when the unit is killed (stops its idle animation).
    pub animated: bool,
}

/// Visual propeller angle driven by throttle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Propeller {
    pub angle_deg: f64,
}
