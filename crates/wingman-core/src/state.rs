//! Simulation snapshot: the complete visible state handed to consumers
//! (HUD, engine audio, propeller visuals, recorders) after each frame.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AimReference, SimEvent};
use crate::types::SimTime;

/// Complete simulation state after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub aircraft: Vec<AircraftView>,
    pub ground_units: Vec<GroundUnitView>,
    pub events: Vec<SimEvent>,
}

impl SimSnapshot {
    /// Look up an aircraft by callsign.
    pub fn aircraft(&self, callsign: u32) -> Option<&AircraftView> {
        self.aircraft.iter().find(|a| a.callsign == callsign)
    }
}

/// Telemetry for one aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub callsign: u32,
    pub name: String,
    pub control_mode: ControlMode,
    pub position: DVec3,
    pub orientation: DQuat,
    pub velocity: DVec3,
    /// Airspeed (m/s).
    pub speed: f64,
    /// Altitude (m).
    pub altitude: f64,
    /// Compass heading of the nose (degrees, 0 = +Z, 90 = +X).
    pub heading_deg: f64,
    /// Throttle setting, [0, 1].
    pub thrust: f64,
    pub angle_of_attack_deg: f64,
    pub sideslip_deg: f64,
    pub health: i32,
    /// Only for AI aircraft.
    pub behavior: Option<BehaviorState>,
    /// Only while chasing.
    pub chase_mode: Option<ChaseMode>,
    pub aim: Option<AimReference>,
    pub propeller_angle_deg: f64,
}

/// A ground unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundUnitView {
    pub callsign: u32,
    pub name: String,
    pub position: DVec3,
    pub health: i32,
    pub alive: bool,
}
