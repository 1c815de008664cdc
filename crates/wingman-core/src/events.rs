//! Events emitted by the simulation for HUD, audio and effects consumers.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Where a pilot is currently steering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index")]
pub enum AimReference {
    /// Nothing to steer toward (empty route).
    None,
    /// Patrol waypoint by index.
    Waypoint(usize),
    /// The home waypoint.
    Home,
    /// The tracked target.
    Target,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A behavior trigger changed an AI aircraft's state.
    BehaviorChanged {
        callsign: u32,
        from: BehaviorState,
        to: BehaviorState,
        trigger: BehaviorTrigger,
    },
    /// The combat tactics engine picked a new pursuit geometry.
    ChaseModeChanged {
        callsign: u32,
        from: ChaseMode,
        to: ChaseMode,
    },
    /// A pilot switched its steering reference (PIDs were reset).
    TargetSwitched { callsign: u32, target: AimReference },
    /// An entity took damage.
    Damaged {
        callsign: u32,
        amount: u32,
        remaining: i32,
    },
    /// An aircraft was destroyed (shot down or crashed).
    AircraftDestroyed { callsign: u32 },
    /// A wreck hit the ground hard enough to explode and was removed.
    WreckExploded { callsign: u32, position: DVec3 },
    /// A ground unit was killed.
    GroundUnitDestroyed { callsign: u32 },
    /// The player aircraft was catapult-launched.
    CatapultLaunch { callsign: u32 },
}
