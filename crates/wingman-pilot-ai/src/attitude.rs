//! Attitude command translator.
//!
//! Converts an aim point into pitch, bank and heading errors and runs
//! them through three PID controllers to produce control inputs.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use wingman_core::constants::MIN_AIM_DISTANCE_SQ;
use wingman_core::math::{delta_angle_deg, project_on_plane, signed_angle_deg};
use wingman_core::types::{ControlInputs, RigidBodyState, WORLD_UP};
use wingman_flight::Pid;

use crate::profiles::{DifficultyProfile, PilotTuning};

/// What the pilot wants the aircraft to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttitudeCommand {
    pub aim_point: DVec3,
    pub thrust: f64,
    /// Live energy state while chasing, 1 otherwise.
    pub energy: f64,
    pub bank_limiter: f64,
    pub pitch_limiter: f64,
}

impl AttitudeCommand {
    /// Unrestricted steering toward a navigation point.
    pub fn cruise(aim_point: DVec3, thrust: f64) -> Self {
        Self {
            aim_point,
            thrust,
            energy: 1.0,
            bank_limiter: 1.0,
            pitch_limiter: 1.0,
        }
    }
}

/// Nose elevation above the horizon (degrees).
pub fn pitch_angle_deg(state: &RigidBodyState) -> f64 {
    state.forward().y.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Bank angle (degrees). Positive with the left wing down.
pub fn bank_angle_deg(state: &RigidBodyState) -> f64 {
    let local_up = state.to_local(WORLD_UP);
    local_up.x.atan2(local_up.y).to_degrees()
}

/// Horizontal angle from the nose to `aim_point` (degrees). Positive to the right.
pub fn heading_error_deg(state: &RigidBodyState, aim_point: DVec3) -> f64 {
    let flat_forward = project_on_plane(state.forward(), WORLD_UP);
    let flat_target = project_on_plane(aim_point - state.position, WORLD_UP);
    signed_angle_deg(flat_forward, flat_target, WORLD_UP)
}

/// Clamp to `[-limit, limit]`; a negative or non-finite limit pins to 0.
fn clamp_symmetric(value: f64, limit: f64) -> f64 {
    let limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
    value.clamp(-limit, limit)
}

/// Desired pitch and bank plus the three axis errors for one command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttitudeErrors {
    pub desired_pitch_deg: f64,
    pub desired_bank_deg: f64,
    pub pitch_error_deg: f64,
    pub bank_error_deg: f64,
    pub heading_error_deg: f64,
}

/// Errors for steering `state` toward `command.aim_point`. `None` when
/// the aim point is on top of the aircraft.
pub fn attitude_errors(
    state: &RigidBodyState,
    command: &AttitudeCommand,
    profile: &DifficultyProfile,
    tuning: &PilotTuning,
) -> Option<AttitudeErrors> {
    let to_aim = command.aim_point - state.position;
    if to_aim.length_squared() < MIN_AIM_DISTANCE_SQ {
        return None;
    }
    let direction = to_aim.normalize();

    let heading_error = heading_error_deg(state, command.aim_point);
    let safe_max_bank =
        tuning.max_bank_angle_deg * command.energy * command.bank_limiter * profile.bank_factor;
    let safe_max_pitch =
        tuning.max_pitch_angle_deg * command.energy * command.pitch_limiter * profile.pitch_factor;

    let pitch_to_aim = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
    let desired_pitch = clamp_symmetric(pitch_to_aim, safe_max_pitch);
    let desired_bank = -clamp_symmetric(heading_error * profile.heading_multiplier, safe_max_bank);

    Some(AttitudeErrors {
        desired_pitch_deg: desired_pitch,
        desired_bank_deg: desired_bank,
        pitch_error_deg: delta_angle_deg(pitch_angle_deg(state), desired_pitch),
        bank_error_deg: -delta_angle_deg(bank_angle_deg(state), desired_bank),
        heading_error_deg: heading_error,
    })
}

/// Three PIDs, one per axis.
#[derive(Debug, Clone)]
pub struct AttitudeTranslator {
    pitch: Pid,
    roll: Pid,
    yaw: Pid,
}

impl AttitudeTranslator {
    pub fn new(tuning: &PilotTuning) -> Self {
        Self {
            pitch: Pid::new(tuning.pitch_pid),
            roll: Pid::new(tuning.roll_pid),
            yaw: Pid::new(tuning.yaw_pid),
        }
    }

    pub fn reset(&mut self) {
        self.pitch.reset();
        self.roll.reset();
        self.yaw.reset();
    }

    pub fn pids(&self) -> [&Pid; 3] {
        [&self.pitch, &self.roll, &self.yaw]
    }

    /// Control inputs steering toward `command.aim_point`.
    pub fn translate(
        &mut self,
        state: &RigidBodyState,
        command: &AttitudeCommand,
        profile: &DifficultyProfile,
        tuning: &PilotTuning,
        dt: f64,
    ) -> Option<ControlInputs> {
        let errors = attitude_errors(state, command, profile, tuning)?;
        let response = profile.pid_response;
        Some(ControlInputs::new(
            self.pitch.calculate(errors.pitch_error_deg, dt) * response,
            self.roll.calculate(errors.bank_error_deg, dt) * response,
            self.yaw.calculate(errors.heading_error_deg, dt) * response,
            command.thrust,
        ))
    }
}
