//! Commands sent from outside the simulation (input reader, damage
//! collaborator, harness).
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

/// All possible external actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Player flight controls ---
    /// Set the player's stick deflections. Clamped to [-1, 1].
    SetStick { pitch: f64, roll: f64, yaw: f64 },
    /// Hold the throttle up (+1), down (-1) or steady (0).
    SetThrottleRate { direction: f64 },
    /// Set all four player control inputs at once.
    SetControlInputs {
        pitch: f64,
        roll: f64,
        yaw: f64,
        thrust: f64,
    },
    /// Catapult-launch the player aircraft if it is nearly stationary.
    CatapultLaunch,

    // --- Damage ---
    /// Apply damage to the entity with this callsign.
    ApplyDamage { callsign: u32, amount: u32 },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
