//! The flight dynamics model.
//!
//! Turns the four normalized control inputs plus the current rigid-body
//! state into forces and torques each physics tick. Per tick, in order:
//! derived state, thrust/lift/side force, control and damping torques,
//! drag, then integration.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use wingman_core::constants::{MIN_AERODYNAMIC_SPEED, MIN_AOA_SPEED_SQ};
use wingman_core::math::clamp01;
use wingman_core::types::*;

use crate::config::AerodynamicConfig;
use crate::rigid_body::RigidBody;

/// Forces and body-frame torques produced during the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceBreakdown {
    pub thrust: DVec3,
    pub lift: DVec3,
    pub side: DVec3,
    pub drag: DVec3,
    pub control_torque: DVec3,
    pub damping_torque: DVec3,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
}

#[derive(Debug, Clone)]
pub struct FlightModel {
    config: AerodynamicConfig,
    inputs: ControlInputs,
    derived: DerivedFlightState,
    forces: ForceBreakdown,
}

impl FlightModel {
    /// Missing reference points and bad numbers are logged here. The
    /// model still builds and skips whatever depends on them.
    pub fn new(config: AerodynamicConfig) -> Self {
        for problem in config.missing_reference_points() {
            tracing::error!(%problem, "flight model configuration");
        }
        if let Err(problem) = config.validate() {
            tracing::error!(%problem, "flight model configuration");
        }
        Self {
            config,
            inputs: ControlInputs::ZERO,
            derived: DerivedFlightState::default(),
            forces: ForceBreakdown::default(),
        }
    }

    pub fn config(&self) -> &AerodynamicConfig {
        &self.config
    }

    /// Inputs take effect on the next physics tick.
    pub fn set_control_inputs(&mut self, inputs: ControlInputs) {
        self.inputs = inputs.clamped();
    }

    pub fn control_inputs(&self) -> ControlInputs {
        self.inputs
    }

    /// Current throttle setting, [0, 1].
    pub fn thrust(&self) -> f64 {
        self.inputs.thrust
    }

    /// Airspeed as of the last tick (m/s).
    pub fn speed(&self) -> f64 {
        self.derived.speed
    }

    /// Angle of attack as of the last tick (degrees).
    pub fn angle_of_attack(&self) -> f64 {
        self.derived.angle_of_attack_deg
    }

    pub fn sideslip(&self) -> f64 {
        self.derived.sideslip_deg
    }

    pub fn derived(&self) -> &DerivedFlightState {
        &self.derived
    }

    pub fn forces(&self) -> &ForceBreakdown {
        &self.forces
    }

    /// Fraction of the maximum control torque available right now.
    pub fn control_authority(&self) -> f64 {
        let c = &self.config;
        let speed_factor = if c.control_ramp_speed > 0.0 {
            clamp01((self.derived.speed - c.control_min_speed) / c.control_ramp_speed)
        } else if self.derived.speed >= c.control_min_speed {
            1.0
        } else {
            0.0
        };
        if self.is_stalled() {
            speed_factor * c.stall_control_authority
        } else {
            speed_factor
        }
    }

    pub fn is_stalled(&self) -> bool {
        self.derived.angle_of_attack_deg.abs() > self.config.stall_angle_deg
    }

    /// Accumulate this tick's forces on `body` without integrating.
    pub fn apply_forces(&mut self, body: &mut RigidBody) {
        self.derived = derive_state(body.state());
        let state = *body.state();
        let c = &self.config;
        let speed = self.derived.speed;
        let q = 0.5 * c.air_density * speed * speed;
        let aerodynamic = speed >= MIN_AERODYNAMIC_SPEED;
        let mut forces = ForceBreakdown::default();

        // Thrust
        if let Some(mount) = c.engine_position {
            let thrust = state.forward() * c.engine_power * self.inputs.thrust;
            body.add_force_at_position(thrust, state.point_to_world(mount));
            forces.thrust = thrust;
        }

        let cl = c.lift_curve.evaluate(self.derived.angle_of_attack_deg);
        forces.lift_coefficient = cl;

        if aerodynamic {
            // Lift
            if let Some(point) = c.lift_position {
                let lift = state.up() * cl * q * c.wing_area;
                body.add_force_at_position(lift, state.point_to_world(point));
                forces.lift = lift;
            }

            // Side force
            if state.altitude() >= c.side_force_min_altitude {
                let beta = self.derived.sideslip_deg.to_radians();
                let side =
                    state.right() * (-beta.sin() * c.side_force_coefficient * q * c.stabilizer_area);
                match c.stabilizer_position {
                    Some(point) => body.add_force_at_position(side, state.point_to_world(point)),
                    None => body.add_force(side),
                }
                forces.side = side;
            }
        }

        // Control torques
        let authority = self.control_authority();
        let control = (PITCH_AXIS * self.inputs.pitch * c.max_pitch_torque
            + ROLL_AXIS * self.inputs.roll * c.max_roll_torque
            + YAW_AXIS * self.inputs.yaw * c.max_yaw_torque)
            * authority;
        let omega = self.derived.local_angular_velocity;
        let damping = DVec3::new(
            -omega.x * c.pitch_damping,
            -omega.y * c.yaw_damping,
            -omega.z * c.roll_damping,
        );
        body.add_relative_torque(control + damping);
        forces.control_torque = control;
        forces.damping_torque = damping;

        // Drag
        if aerodynamic {
            let ar = c.aspect_ratio();
            let induced = if ar > 0.0 && c.wing_efficiency > 0.0 {
                cl * cl / (PI * c.wing_efficiency * ar)
            } else {
                0.0
            };
            let cd = c.drag_coefficient + induced;
            let drag = -state.linear_velocity / speed * (q * cd * c.reference_area);
            body.add_force(drag);
            forces.drag = drag;
            forces.drag_coefficient = cd;
        }

        self.forces = forces;
    }

    /// One physics tick: accumulate forces then integrate.
    pub fn step(&mut self, body: &mut RigidBody, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.apply_forces(body);
        body.integrate(dt);
    }
}

/// Body-frame velocities, airspeed, angle of attack and sideslip.
pub fn derive_state(state: &RigidBodyState) -> DerivedFlightState {
    let local_velocity = state.to_local(state.linear_velocity);
    let local_angular_velocity = state.to_local(state.angular_velocity);
    let speed_sq = local_velocity.length_squared();

    let (angle_of_attack_deg, sideslip_deg) = if speed_sq < MIN_AOA_SPEED_SQ {
        (0.0, 0.0)
    } else {
        (
            (-local_velocity.y).atan2(local_velocity.z).to_degrees(),
            local_velocity.x.atan2(local_velocity.z).to_degrees(),
        )
    };

    DerivedFlightState {
        angle_of_attack_deg,
        sideslip_deg,
        local_velocity,
        local_angular_velocity,
        speed: speed_sq.sqrt(),
    }
}
