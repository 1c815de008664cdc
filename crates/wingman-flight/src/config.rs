//! Per-aircraft airframe parameters.
//!
//! All structs deserialize with `#[serde(default)]`, so a scenario file
//! only needs to name the fields it overrides.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use wingman_core::constants::*;

use crate::error::{non_negative, positive, ConfigError};
use crate::lift_curve::LiftCurve;

/// Aerodynamic coefficients and reference geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AerodynamicConfig {
    /// kg/m³
    pub air_density: f64,
    /// m²
    pub wing_area: f64,
    /// m
    pub wing_span: f64,
    /// Oswald efficiency factor.
    pub wing_efficiency: f64,
    /// Zero-lift drag coefficient.
    pub drag_coefficient: f64,
    /// m²
    pub reference_area: f64,
    pub lift_curve: LiftCurve,
    /// Maximum thrust (N).
    pub engine_power: f64,
    /// Thrust application point, body frame. `None` disables thrust.
    pub engine_position: Option<DVec3>,
    /// Lift application point, body frame. `None` disables lift.
    pub lift_position: Option<DVec3>,
    /// Side force application point, body frame. `None` applies the
    /// side force at the CG, which gives no weathercock moment.
    pub stabilizer_position: Option<DVec3>,
    /// N·m at full deflection and full authority.
    pub max_pitch_torque: f64,
    pub max_roll_torque: f64,
    pub max_yaw_torque: f64,
    /// Degrees.
    pub stall_angle_deg: f64,
    /// Authority multiplier once |AoA| exceeds the stall angle.
    pub stall_control_authority: f64,
    pub pitch_damping: f64,
    pub roll_damping: f64,
    pub yaw_damping: f64,
    /// Vertical stabilizer area (m²).
    pub stabilizer_area: f64,
    pub side_force_coefficient: f64,
    /// Control authority is zero below this airspeed (m/s).
    pub control_min_speed: f64,
    /// Authority reaches 1 at `control_min_speed + control_ramp_speed`.
    pub control_ramp_speed: f64,
    /// No side force below this altitude (m).
    pub side_force_min_altitude: f64,
}

impl Default for AerodynamicConfig {
    fn default() -> Self {
        Self {
            air_density: AIR_DENSITY_SEA_LEVEL,
            wing_area: DEFAULT_WING_AREA,
            wing_span: DEFAULT_WING_SPAN,
            wing_efficiency: DEFAULT_WING_EFFICIENCY,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            reference_area: DEFAULT_REFERENCE_AREA,
            lift_curve: LiftCurve::default(),
            engine_power: DEFAULT_ENGINE_POWER,
            engine_position: Some(DVec3::from_array(DEFAULT_ENGINE_POSITION)),
            lift_position: Some(DVec3::from_array(DEFAULT_LIFT_POSITION)),
            stabilizer_position: Some(DVec3::from_array(DEFAULT_STABILIZER_POSITION)),
            max_pitch_torque: DEFAULT_MAX_PITCH_TORQUE,
            max_roll_torque: DEFAULT_MAX_ROLL_TORQUE,
            max_yaw_torque: DEFAULT_MAX_YAW_TORQUE,
            stall_angle_deg: DEFAULT_STALL_ANGLE_DEG,
            stall_control_authority: DEFAULT_STALL_CONTROL_AUTHORITY,
            pitch_damping: DEFAULT_PITCH_DAMPING,
            roll_damping: DEFAULT_ROLL_DAMPING,
            yaw_damping: DEFAULT_YAW_DAMPING,
            stabilizer_area: DEFAULT_STABILIZER_AREA,
            side_force_coefficient: DEFAULT_SIDE_FORCE_COEFFICIENT,
            control_min_speed: CONTROL_MIN_SPEED,
            control_ramp_speed: CONTROL_RAMP_SPEED,
            side_force_min_altitude: SIDE_FORCE_MIN_ALTITUDE,
        }
    }
}

impl AerodynamicConfig {
    /// span² / area. Zero for a degenerate wing.
    pub fn aspect_ratio(&self) -> f64 {
        if self.wing_area > 0.0 {
            self.wing_span * self.wing_span / self.wing_area
        } else {
            0.0
        }
    }

    /// Reference points the model needs but the config does not provide.
    /// These degrade the model rather than reject it.
    pub fn missing_reference_points(&self) -> Vec<ConfigError> {
        let mut missing = Vec::new();
        if self.engine_position.is_none() {
            missing.push(ConfigError::MissingEnginePosition);
        }
        if self.lift_position.is_none() {
            missing.push(ConfigError::MissingLiftPosition);
        }
        missing
    }

    /// Check numeric parameters. Divisors must be positive, everything
    /// else non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("air_density", self.air_density)?;
        positive("wing_area", self.wing_area)?;
        positive("wing_span", self.wing_span)?;
        positive("wing_efficiency", self.wing_efficiency)?;
        positive("reference_area", self.reference_area)?;
        non_negative("drag_coefficient", self.drag_coefficient)?;
        non_negative("engine_power", self.engine_power)?;
        non_negative("max_pitch_torque", self.max_pitch_torque)?;
        non_negative("max_roll_torque", self.max_roll_torque)?;
        non_negative("max_yaw_torque", self.max_yaw_torque)?;
        non_negative("stall_angle_deg", self.stall_angle_deg)?;
        non_negative("stall_control_authority", self.stall_control_authority)?;
        non_negative("pitch_damping", self.pitch_damping)?;
        non_negative("roll_damping", self.roll_damping)?;
        non_negative("yaw_damping", self.yaw_damping)?;
        non_negative("stabilizer_area", self.stabilizer_area)?;
        non_negative("side_force_coefficient", self.side_force_coefficient)?;
        non_negative("control_min_speed", self.control_min_speed)?;
        non_negative("control_ramp_speed", self.control_ramp_speed)?;
        Ok(())
    }
}

/// Inertial properties of the airframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassProperties {
    /// kg
    pub mass: f64,
    /// Principal moments of inertia about body x / y / z (kg·m²).
    pub inertia: DVec3,
    pub use_gravity: bool,
    /// Altitude of the ground plane (m).
    pub ground_level: f64,
    /// Angular speed cap (rad/s). Zero disables the cap.
    pub max_angular_velocity: f64,
}

impl Default for MassProperties {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            inertia: DVec3::from_array(DEFAULT_INERTIA),
            use_gravity: true,
            ground_level: GROUND_LEVEL,
            max_angular_velocity: DEFAULT_MAX_ANGULAR_VELOCITY,
        }
    }
}

impl MassProperties {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mass", self.mass)?;
        positive("inertia.x", self.inertia.x)?;
        positive("inertia.y", self.inertia.y)?;
        positive("inertia.z", self.inertia.z)?;
        non_negative("max_angular_velocity", self.max_angular_velocity)?;
        Ok(())
    }
}

/// Complete airframe: aerodynamics plus mass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftConfig {
    pub aerodynamics: AerodynamicConfig,
    pub mass: MassProperties,
}

impl AircraftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aerodynamics.validate()?;
        self.mass.validate()
    }
}
