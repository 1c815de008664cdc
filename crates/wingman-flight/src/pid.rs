//! Single-axis PID controller with integral and output clamping.

use serde::{Deserialize, Serialize};
use wingman_core::constants::{PID_INTEGRAL_LIMIT, PID_OUTPUT_LIMIT};

/// Gains and clamp bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub output_min: f64,
    pub output_max: f64,
    pub integral_min: f64,
    pub integral_max: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl PidGains {
    /// Gains with the default bounds: output ±1, integral ±0.5.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            output_min: -PID_OUTPUT_LIMIT,
            output_max: PID_OUTPUT_LIMIT,
            integral_min: -PID_INTEGRAL_LIMIT,
            integral_max: PID_INTEGRAL_LIMIT,
        }
    }

    /// From a `(kp, ki, kd)` tuple.
    pub fn from_tuple((kp, ki, kd): (f64, f64, f64)) -> Self {
        Self::new(kp, ki, kd)
    }
}

#[derive(Debug, Clone)]
pub struct Pid {
    gains: PidGains,
    integral: f64,
    previous_error: f64,
    has_previous_error: bool,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: 0.0,
            has_previous_error: false,
        }
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    /// Current integral accumulator (already clamped).
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Error seen by the last accepted `calculate`, if any.
    pub fn previous_error(&self) -> Option<f64> {
        self.has_previous_error.then_some(self.previous_error)
    }

    /// Correction for `error` over a step of `dt` seconds.
    /// Non-positive `dt` returns 0 and leaves the state untouched.
    pub fn calculate(&mut self, error: f64, dt: f64) -> f64 {
        if dt <= 0.0 || !error.is_finite() {
            return 0.0;
        }
        let g = &self.gains;

        let p = g.kp * error;

        self.integral = (self.integral + g.ki * error * dt).clamp(g.integral_min, g.integral_max);

        let d = if self.has_previous_error {
            g.kd * (error - self.previous_error) / dt
        } else {
            0.0
        };
        self.previous_error = error;
        self.has_previous_error = true;

        (p + self.integral + d).clamp(g.output_min, g.output_max)
    }

    /// Forget the integral and derivative history. Returns 0.
    pub fn reset(&mut self) -> f64 {
        self.integral = 0.0;
        self.previous_error = 0.0;
        self.has_previous_error = false;
        0.0
    }
}
