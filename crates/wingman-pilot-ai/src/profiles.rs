//! Pilot tuning and difficulty-derived behavior profiles.
//!
//! `PilotTuning` holds the scenario-configurable knobs. `DifficultyProfile`
//! folds a difficulty scalar into the concrete thresholds the tactics
//! engine and attitude translator consume.

use serde::{Deserialize, Serialize};
use wingman_core::constants::*;
use wingman_core::math::lerp_range;
use wingman_flight::PidGains;

/// Per-pilot tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotTuning {
    /// Maximum distance at which the target is seen (m).
    pub vision_range: f64,
    /// Targets below this altitude are invisible (m).
    pub min_target_altitude: f64,
    /// Waypoint proximity threshold (m).
    pub reach_threshold: f64,
    /// Nominal lead prediction horizon (s).
    pub lead_pursuit_time: f64,
    /// m/s
    pub min_safe_speed: f64,
    /// Degrees.
    pub max_safe_aoa_deg: f64,
    /// Distance behind the target in lag pursuit (m).
    pub lag_pursuit_offset: f64,
    /// Reaction delay at difficulty 1 (s).
    pub reaction_delay_fast: f64,
    /// Reaction delay at difficulty 0 (s).
    pub reaction_delay_slow: f64,
    pub max_bank_angle_deg: f64,
    pub max_pitch_angle_deg: f64,
    /// Thrust while patrolling or returning to base.
    pub cruise_thrust: f64,
    pub pitch_pid: PidGains,
    pub roll_pid: PidGains,
    pub yaw_pid: PidGains,
}

impl Default for PilotTuning {
    fn default() -> Self {
        Self {
            vision_range: VISION_RANGE,
            min_target_altitude: MIN_TARGET_ALTITUDE,
            reach_threshold: TARGET_REACH_THRESHOLD,
            lead_pursuit_time: LEAD_PURSUIT_TIME,
            min_safe_speed: MIN_SAFE_SPEED,
            max_safe_aoa_deg: MAX_SAFE_AOA_DEG,
            lag_pursuit_offset: LAG_PURSUIT_OFFSET,
            reaction_delay_fast: REACTION_DELAY_FAST,
            reaction_delay_slow: REACTION_DELAY_SLOW,
            max_bank_angle_deg: MAX_BANK_ANGLE_DEG,
            max_pitch_angle_deg: MAX_PITCH_ANGLE_DEG,
            cruise_thrust: CRUISE_THRUST,
            pitch_pid: PidGains::from_tuple(PITCH_PID_GAINS),
            roll_pid: PidGains::from_tuple(ROLL_PID_GAINS),
            yaw_pid: PidGains::from_tuple(YAW_PID_GAINS),
        }
    }
}

/// Difficulty-scaled thresholds for one pilot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Clamped to [0, 1].
    pub difficulty: f64,
    /// Minimum time between chase-mode changes (s).
    pub reaction_delay: f64,
    /// Energy below this forces defensive mode.
    pub defensive_threshold: f64,
    /// Lag pursuit is considered inside this range (m).
    pub lag_distance: f64,
    /// Scales the lead prediction horizon.
    pub lead_time_multiplier: f64,
    /// Lead prediction error half-width on x/z (m). Zero for skilled pilots.
    pub lead_error_amplitude: f64,
    pub bank_factor: f64,
    pub pitch_factor: f64,
    /// Heading error (degrees) → desired bank multiplier.
    pub heading_multiplier: f64,
    /// Scales every PID output.
    pub pid_response: f64,
}

impl DifficultyProfile {
    pub fn new(difficulty: f64, tuning: &PilotTuning) -> Self {
        let d = if difficulty.is_nan() {
            DEFAULT_DIFFICULTY
        } else {
            difficulty.clamp(0.0, 1.0)
        };

        let lead_error_amplitude = if d < LEAD_ERROR_DIFFICULTY_CUTOFF {
            (1.0 - d) * LEAD_ERROR_MAX
        } else {
            0.0
        };

        Self {
            difficulty: d,
            reaction_delay: lerp_range((tuning.reaction_delay_slow, tuning.reaction_delay_fast), d),
            defensive_threshold: lerp_range(DEFENSIVE_THRESHOLD_RANGE, d),
            lag_distance: lerp_range(LAG_DISTANCE_RANGE, d),
            lead_time_multiplier: lerp_range(LEAD_TIME_MULTIPLIER_RANGE, d),
            lead_error_amplitude,
            bank_factor: lerp_range(BANK_FACTOR_RANGE, d),
            pitch_factor: lerp_range(PITCH_FACTOR_RANGE, d),
            heading_multiplier: lerp_range(HEADING_MULTIPLIER_RANGE, d),
            pid_response: lerp_range(PID_RESPONSE_RANGE, d),
        }
    }

    /// Lag pursuit is only flown by pilots above the lag floor.
    pub fn allows_lag_pursuit(&self) -> bool {
        self.difficulty > LAG_DIFFICULTY_FLOOR
    }

    /// Lead pursuit is only flown by pilots above the lead floor.
    pub fn allows_lead_pursuit(&self) -> bool {
        self.difficulty > LEAD_DIFFICULTY_FLOOR
    }
}
