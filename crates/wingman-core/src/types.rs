//! Fundamental geometric and simulation types.
//!
//! World frame: +Y is up, the ground is the XZ plane.
//! Body frame: +Z forward (nose), +Y up (canopy), +X right (starboard wing).

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World up direction.
pub const WORLD_UP: DVec3 = DVec3::Y;

/// Body forward axis (nose).
pub const BODY_FORWARD: DVec3 = DVec3::Z;

/// Body up axis.
pub const BODY_UP: DVec3 = DVec3::Y;

/// Body right axis (starboard wing).
pub const BODY_RIGHT: DVec3 = DVec3::X;

/// Positive rotation about this body axis raises the nose.
pub const PITCH_AXIS: DVec3 = DVec3::NEG_X;

/// Positive rotation about this body axis swings the nose right.
pub const YAW_AXIS: DVec3 = DVec3::Y;

/// Positive rotation about this body axis drops the right wing.
pub const ROLL_AXIS: DVec3 = DVec3::NEG_Z;

/// Rigid-body kinematic state in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub position: DVec3,
    pub orientation: DQuat,
    pub linear_velocity: DVec3,
    pub angular_velocity: DVec3,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            linear_velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
        }
    }
}

impl RigidBodyState {
    /// Body placed at `position`, level, with the nose on `heading_deg`
    /// (0 = +Z, 90 = +X, clockwise seen from above).
    pub fn level(position: DVec3, heading_deg: f64) -> Self {
        Self {
            position,
            orientation: DQuat::from_axis_angle(WORLD_UP, heading_deg.to_radians()),
            ..Default::default()
        }
    }

    /// Nose direction in world space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * BODY_FORWARD
    }

    /// Canopy direction in world space.
    pub fn up(&self) -> DVec3 {
        self.orientation * BODY_UP
    }

    /// Starboard wing direction in world space.
    pub fn right(&self) -> DVec3 {
        self.orientation * BODY_RIGHT
    }

    /// Express a world-space direction in the body frame.
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        self.orientation.inverse() * world
    }

    /// Express a body-frame direction in world space.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.orientation * local
    }

    /// World-space position of a body-frame offset.
    pub fn point_to_world(&self, local: DVec3) -> DVec3 {
        self.position + self.orientation * local
    }

    /// Airspeed (no wind model).
    pub fn speed(&self) -> f64 {
        self.linear_velocity.length()
    }

    /// Altitude above the world origin plane.
    pub fn altitude(&self) -> f64 {
        self.position.y
    }
}

/// Normalized pilot controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Nose up positive, [-1, 1].
    pub pitch: f64,
    /// Right wing down positive, [-1, 1].
    pub roll: f64,
    /// Nose right positive, [-1, 1].
    pub yaw: f64,
    /// Throttle, [0, 1].
    pub thrust: f64,
}

impl ControlInputs {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        roll: 0.0,
        yaw: 0.0,
        thrust: 0.0,
    };

    /// Build inputs, clamping each channel to its declared range.
    pub fn new(pitch: f64, roll: f64, yaw: f64, thrust: f64) -> Self {
        Self {
            pitch,
            roll,
            yaw,
            thrust,
        }
        .clamped()
    }

    /// Inputs with every channel clamped. NaN becomes zero.
    pub fn clamped(self) -> Self {
        fn sanitize(v: f64) -> f64 {
            if v.is_nan() {
                0.0
            } else {
                v
            }
        }
        Self {
            pitch: sanitize(self.pitch).clamp(-1.0, 1.0),
            roll: sanitize(self.roll).clamp(-1.0, 1.0),
            yaw: sanitize(self.yaw).clamp(-1.0, 1.0),
            thrust: sanitize(self.thrust).clamp(0.0, 1.0),
        }
    }
}

/// Quantities recomputed from `RigidBodyState` at the start of every physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedFlightState {
    /// Pitch-plane angle of attack (degrees). Positive when the airflow
    /// meets the wing from below.
    pub angle_of_attack_deg: f64,
    /// Yaw-plane sideslip (degrees). Positive when drifting to the right.
    pub sideslip_deg: f64,
    pub local_velocity: DVec3,
    pub local_angular_velocity: DVec3,
    pub speed: f64,
}

/// What a pilot knows about the aircraft it is hunting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetTrack {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Used when the velocity is too small to give a direction.
    pub forward: DVec3,
}

impl TargetTrack {
    pub fn from_state(state: &RigidBodyState) -> Self {
        Self {
            position: state.position,
            velocity: state.linear_velocity,
            forward: state.forward(),
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames advanced.
    pub frame: u64,
    /// Fixed physics ticks run.
    pub physics_tick: u64,
    /// Elapsed simulation time in seconds (sum of scaled frame time).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance the frame clock by `dt` seconds.
    pub fn advance_frame(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }

    /// Count one fixed physics tick.
    pub fn advance_physics(&mut self) {
        self.physics_tick += 1;
    }
}
