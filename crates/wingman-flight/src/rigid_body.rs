//! Rigid-body integrator with force/torque accumulation and a flat ground.
//!
//! Forces and torques are accumulated in world space during a tick and
//! cleared by [`RigidBody::integrate`]. Semi-implicit Euler for both the
//! linear and angular parts; Euler's rotation equation is solved in the
//! body frame against the principal moments of inertia.

use glam::{DQuat, DVec3};
use wingman_core::constants::GRAVITY;
use wingman_core::types::{RigidBodyState, WORLD_UP};

use crate::config::MassProperties;

/// Height above the ground plane still treated as resting on it (m).
const GROUND_CONTACT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct RigidBody {
    state: RigidBodyState,
    mass: MassProperties,
    force: DVec3,
    torque: DVec3,
    last_impact_speed: Option<f64>,
}

impl RigidBody {
    pub fn new(state: RigidBodyState, mass: MassProperties) -> Self {
        Self {
            state,
            mass,
            force: DVec3::ZERO,
            torque: DVec3::ZERO,
            last_impact_speed: None,
        }
    }

    pub fn state(&self) -> &RigidBodyState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RigidBodyState {
        &mut self.state
    }

    pub fn mass(&self) -> &MassProperties {
        &self.mass
    }

    /// Force accumulated so far this tick (world frame).
    pub fn accumulated_force(&self) -> DVec3 {
        self.force
    }

    /// Torque accumulated so far this tick (world frame).
    pub fn accumulated_torque(&self) -> DVec3 {
        self.torque
    }

    /// Apply a world-space force through the center of mass.
    pub fn add_force(&mut self, force: DVec3) {
        self.force += force;
    }

    /// Apply a world-space force at a world-space point, producing a moment
    /// about the center of mass.
    pub fn add_force_at_position(&mut self, force: DVec3, point: DVec3) {
        self.force += force;
        self.torque += (point - self.state.position).cross(force);
    }

    /// Apply a world-space torque.
    pub fn add_torque(&mut self, torque: DVec3) {
        self.torque += torque;
    }

    /// Apply a body-frame torque.
    pub fn add_relative_torque(&mut self, torque: DVec3) {
        self.torque += self.state.orientation * torque;
    }

    /// Instantaneous change of momentum (world frame, N·s).
    pub fn add_impulse(&mut self, impulse: DVec3) {
        if self.mass.mass > 0.0 {
            self.state.linear_velocity += impulse / self.mass.mass;
        }
    }

    /// Instantaneous change of angular momentum (world frame, N·m·s).
    pub fn add_angular_impulse(&mut self, impulse: DVec3) {
        let local = self.state.orientation.inverse() * impulse;
        let delta = safe_div(local, self.mass.inertia);
        self.state.angular_velocity += self.state.orientation * delta;
    }

    /// Speed at the moment of the most recent touchdown, if it happened
    /// during the last `integrate` call.
    pub fn last_impact_speed(&self) -> Option<f64> {
        self.last_impact_speed
    }

    pub fn is_grounded(&self) -> bool {
        self.state.position.y <= self.mass.ground_level + GROUND_CONTACT_EPSILON
    }

    /// Advance the body by `dt` seconds and clear the accumulators.
    /// Non-positive `dt` does nothing.
    pub fn integrate(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.last_impact_speed = None;
        let was_airborne = !self.is_grounded();

        // Linear
        let mut acceleration = if self.mass.mass > 0.0 {
            self.force / self.mass.mass
        } else {
            DVec3::ZERO
        };
        if self.mass.use_gravity {
            acceleration -= WORLD_UP * GRAVITY;
        }
        self.state.linear_velocity += acceleration * dt;
        self.state.position += self.state.linear_velocity * dt;

        // Angular, body frame: I·α = τ − ω × (I·ω)
        let q = self.state.orientation;
        let omega = q.inverse() * self.state.angular_velocity;
        let tau = q.inverse() * self.torque;
        let inertia = self.mass.inertia;
        let alpha = safe_div(tau - omega.cross(inertia * omega), inertia);
        let mut omega = omega + alpha * dt;
        let max_rate = self.mass.max_angular_velocity;
        if max_rate > 0.0 && omega.length_squared() > max_rate * max_rate {
            omega = omega.normalize() * max_rate;
        }
        self.state.angular_velocity = q * omega;

        let rotation = self.state.angular_velocity * dt;
        if rotation.length_squared() > 1e-18 {
            self.state.orientation = DQuat::from_scaled_axis(rotation) * q;
        }
        self.state.orientation = self.state.orientation.normalize();

        // Ground
        let ground = self.mass.ground_level;
        if self.state.position.y < ground {
            if was_airborne {
                self.last_impact_speed = Some(self.state.linear_velocity.length());
            }
            self.state.position.y = ground;
            if self.state.linear_velocity.y < 0.0 {
                self.state.linear_velocity.y = 0.0;
            }
        }

        self.force = DVec3::ZERO;
        self.torque = DVec3::ZERO;
    }
}

/// Component-wise division that treats a zero divisor as infinite inertia.
fn safe_div(v: DVec3, by: DVec3) -> DVec3 {
    let div = |a: f64, b: f64| if b > 0.0 { a / b } else { 0.0 };
    DVec3::new(div(v.x, by.x), div(v.y, by.y), div(v.z, by.z))
}
