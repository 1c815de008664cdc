//! Combat tactics engine.
//!
//! Runs only while chasing. Picks a pursuit geometry from the relative
//! geometry and the pilot's energy state, rate-limited by a
//! difficulty-scaled reaction delay, and turns the chosen mode into an
//! aim point with thrust and attitude limiters.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wingman_core::constants::*;
use wingman_core::enums::ChaseMode;
use wingman_core::math::clamp01;
use wingman_core::types::{DerivedFlightState, RigidBodyState, TargetTrack, WORLD_UP};

use crate::profiles::{DifficultyProfile, PilotTuning};

/// Relative geometry and energy for one chase evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TacticalPicture {
    /// Distance to the target (m).
    pub distance: f64,
    /// [0, 1]; 1 is fast and unloaded.
    pub energy: f64,
    /// Rate at which the gap shrinks (m/s). Positive when closing.
    pub closing_speed: f64,
}

impl TacticalPicture {
    pub fn measure(
        own: &RigidBodyState,
        flight: &DerivedFlightState,
        target: &TargetTrack,
        tuning: &PilotTuning,
    ) -> Self {
        Self {
            distance: own.position.distance(target.position),
            energy: energy_state(
                flight.speed,
                flight.angle_of_attack_deg,
                tuning.min_safe_speed,
                tuning.max_safe_aoa_deg,
            ),
            closing_speed: closing_speed(
                own.position,
                own.linear_velocity,
                target.position,
                target.velocity,
            ),
        }
    }
}

/// Energy metric: speed margin scaled down by AoA loading.
pub fn energy_state(speed: f64, aoa_deg: f64, min_safe_speed: f64, max_safe_aoa_deg: f64) -> f64 {
    let speed_factor = if min_safe_speed > 0.0 {
        clamp01(speed / min_safe_speed)
    } else {
        1.0
    };
    let aoa_factor = if max_safe_aoa_deg > 0.0 {
        1.0 - clamp01(aoa_deg.abs() / max_safe_aoa_deg)
    } else {
        1.0
    };
    speed_factor * aoa_factor
}

/// Relative velocity along the line of sight. Zero when co-located.
pub fn closing_speed(
    own_position: DVec3,
    own_velocity: DVec3,
    target_position: DVec3,
    target_velocity: DVec3,
) -> f64 {
    let line_of_sight = (target_position - own_position).normalize_or_zero();
    (own_velocity - target_velocity).dot(line_of_sight)
}

/// Pursuit mode for a picture, in priority order. Pure.
pub fn select_mode(picture: &TacticalPicture, profile: &DifficultyProfile) -> ChaseMode {
    if picture.energy < profile.defensive_threshold {
        return ChaseMode::Defensive;
    }
    if picture.distance < profile.lag_distance
        && picture.closing_speed > LAG_MIN_CLOSING_SPEED
        && profile.allows_lag_pursuit()
    {
        return ChaseMode::LagPursuit;
    }
    if picture.distance > LEAD_MIN_RANGE
        && picture.distance < LEAD_MAX_RANGE
        && profile.allows_lead_pursuit()
    {
        return ChaseMode::LeadPursuit;
    }
    ChaseMode::PurePursuit
}

pub fn mode_thrust(mode: ChaseMode) -> f64 {
    match mode {
        ChaseMode::PurePursuit => PURE_PURSUIT_THRUST,
        ChaseMode::LeadPursuit => LEAD_PURSUIT_THRUST,
        ChaseMode::LagPursuit => LAG_PURSUIT_THRUST,
        ChaseMode::Defensive => DEFENSIVE_THRUST,
    }
}

/// (bank limiter, pitch limiter)
pub fn mode_limiters(mode: ChaseMode) -> (f64, f64) {
    match mode {
        ChaseMode::LagPursuit => LAG_PURSUIT_LIMITERS,
        ChaseMode::Defensive => DEFENSIVE_LIMITERS,
        ChaseMode::PurePursuit | ChaseMode::LeadPursuit => (1.0, 1.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChange {
    pub from: ChaseMode,
    pub to: ChaseMode,
}

/// Chase-mode selection state.
#[derive(Debug, Clone, Default)]
pub struct CombatTactics {
    mode: ChaseMode,
    last_mode_change_time: f64,
    next_reaction_time: f64,
}

impl CombatTactics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ChaseMode {
        self.mode
    }

    pub fn last_mode_change_time(&self) -> f64 {
        self.last_mode_change_time
    }

    /// Earliest time the next re-evaluation may happen.
    pub fn next_reaction_time(&self) -> f64 {
        self.next_reaction_time
    }

    /// Every chase starts in pure pursuit. The reaction timer carries over.
    pub fn enter_chase(&mut self) {
        self.mode = ChaseMode::PurePursuit;
    }

    /// Re-evaluate the mode if the reaction timer allows it.
    pub fn update(
        &mut self,
        now: f64,
        picture: &TacticalPicture,
        profile: &DifficultyProfile,
    ) -> Option<ModeChange> {
        if now < self.next_reaction_time {
            return None;
        }
        let selected = select_mode(picture, profile);
        if selected == self.mode {
            return None;
        }
        let change = ModeChange {
            from: self.mode,
            to: selected,
        };
        self.mode = selected;
        self.last_mode_change_time = now;
        self.next_reaction_time = now + profile.reaction_delay;
        Some(change)
    }
}

/// Steering output of the tactics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatAim {
    pub mode: ChaseMode,
    pub aim_point: DVec3,
    pub thrust: f64,
    pub bank_limiter: f64,
    pub pitch_limiter: f64,
    pub energy: f64,
}

/// Aim point and limits for `mode`.
pub fn combat_aim<R: Rng>(
    mode: ChaseMode,
    own: &RigidBodyState,
    target: &TargetTrack,
    picture: &TacticalPicture,
    profile: &DifficultyProfile,
    tuning: &PilotTuning,
    rng: &mut R,
) -> CombatAim {
    let aim_point = match mode {
        ChaseMode::PurePursuit => target.position,
        ChaseMode::LeadPursuit => lead_point(target, picture.distance, profile, tuning, rng),
        ChaseMode::LagPursuit => lag_point(target, tuning.lag_pursuit_offset),
        ChaseMode::Defensive => defensive_point(own),
    };
    let (bank_limiter, pitch_limiter) = mode_limiters(mode);
    CombatAim {
        mode,
        aim_point,
        thrust: mode_thrust(mode),
        bank_limiter,
        pitch_limiter,
        energy: picture.energy,
    }
}

/// Predicted target position, with an aiming error for weaker pilots.
pub fn lead_point<R: Rng>(
    target: &TargetTrack,
    distance: f64,
    profile: &DifficultyProfile,
    tuning: &PilotTuning,
    rng: &mut R,
) -> DVec3 {
    let lead_time = tuning.lead_pursuit_time
        * profile.lead_time_multiplier
        * clamp01(distance / LEAD_RANGE_NORMALIZER);
    let predicted = target.position + target.velocity * lead_time;

    let a = profile.lead_error_amplitude;
    if a > 0.0 {
        predicted
            + DVec3::new(
                rng.gen_range(-a..=a),
                rng.gen_range(-a / 2.0..=a / 2.0),
                rng.gen_range(-a..=a),
            )
    } else {
        predicted
    }
}

/// A point `offset` metres behind the target along its track.
pub fn lag_point(target: &TargetTrack, offset: f64) -> DVec3 {
    let direction = target
        .velocity
        .try_normalize()
        .or_else(|| target.forward.try_normalize())
        .unwrap_or(DVec3::ZERO);
    target.position - direction * offset
}

/// Straight ahead and up: trade the fight for altitude and airspeed.
pub fn defensive_point(own: &RigidBodyState) -> DVec3 {
    own.position + own.forward() * DEFENSIVE_AIM_AHEAD + WORLD_UP * DEFENSIVE_AIM_CLIMB
}
