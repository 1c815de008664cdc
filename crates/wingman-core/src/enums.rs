//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level AI behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Flying the patrol circuit.
    #[default]
    Patrol,
    /// Engaging the tracked target.
    Chase,
    /// Heading home to disengage.
    ReturnToBase,
    /// Destroyed. Terminal.
    Dead,
}

/// Named events that drive behavior transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorTrigger {
    SeePlayer,
    LosePlayer,
    LowHealth,
    ReachedBase,
    Died,
}

impl BehaviorTrigger {
    pub const ALL: [BehaviorTrigger; 5] = [
        BehaviorTrigger::SeePlayer,
        BehaviorTrigger::LosePlayer,
        BehaviorTrigger::LowHealth,
        BehaviorTrigger::ReachedBase,
        BehaviorTrigger::Died,
    ];
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 4] = [
        BehaviorState::Patrol,
        BehaviorState::Chase,
        BehaviorState::ReturnToBase,
        BehaviorState::Dead,
    ];
}

/// Pursuit geometry chosen while chasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChaseMode {
    /// Nose on the target's current position.
    #[default]
    PurePursuit,
    /// Nose on the target's predicted position.
    LeadPursuit,
    /// Nose on a point behind the target.
    LagPursuit,
    /// Trade aggression for airspeed.
    Defensive,
}

/// Who is flying an aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Stick and throttle commands from outside the simulation.
    #[default]
    Player,
    /// Pilot AI drives the controls.
    Autopilot,
}
