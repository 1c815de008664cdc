//! Simulation constants and tuning parameters.

// --- Scheduling ---

/// Fixed physics tick rate (Hz).
pub const PHYSICS_RATE: u32 = 50;

/// Seconds per physics tick.
pub const PHYSICS_DT: f64 = 1.0 / PHYSICS_RATE as f64;

/// Nominal frame rate driving AI decisions (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the nominal frame rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Upper bound on physics ticks run for a single frame.
/// Prevents a catch-up spiral after a long frame.
pub const MAX_PHYSICS_STEPS_PER_FRAME: u32 = 8;

// --- Environment ---

/// Gravitational acceleration (m/s²), applied along world -Y.
pub const GRAVITY: f64 = 9.81;

/// Ground plane altitude (m).
pub const GROUND_LEVEL: f64 = 0.0;

/// Air density at sea level (kg/m³).
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;

// --- Aerodynamics ---

/// Below this airspeed (m/s) lift, drag and side force are skipped.
pub const MIN_AERODYNAMIC_SPEED: f64 = 0.1;

/// Below this squared airspeed AoA and sideslip are forced to zero.
pub const MIN_AOA_SPEED_SQ: f64 = 0.01;

/// Side force is suppressed below this altitude (takeoff/landing roll).
pub const SIDE_FORCE_MIN_ALTITUDE: f64 = 15.0;

/// Airspeed at which control surfaces start to bite (m/s).
pub const CONTROL_MIN_SPEED: f64 = 10.0;

/// Speed span over which control authority ramps from 0 to 1 (m/s).
pub const CONTROL_RAMP_SPEED: f64 = 20.0;

/// Default airframe: small fixed-wing UAV.
pub const DEFAULT_WING_AREA: f64 = 0.55;
pub const DEFAULT_WING_SPAN: f64 = 2.12;
pub const DEFAULT_WING_EFFICIENCY: f64 = 0.85;
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.045;
pub const DEFAULT_REFERENCE_AREA: f64 = 0.55;
pub const DEFAULT_ENGINE_POWER: f64 = 60.0;
pub const DEFAULT_STABILIZER_AREA: f64 = 0.15;
pub const DEFAULT_SIDE_FORCE_COEFFICIENT: f64 = 0.8;
pub const DEFAULT_MAX_PITCH_TORQUE: f64 = 10.0;
pub const DEFAULT_MAX_ROLL_TORQUE: f64 = 8.0;
pub const DEFAULT_MAX_YAW_TORQUE: f64 = 4.0;
/// Stall begins above this |AoA| (degrees).
pub const DEFAULT_STALL_ANGLE_DEG: f64 = 16.0;
/// Fraction of control authority left once stalled.
pub const DEFAULT_STALL_CONTROL_AUTHORITY: f64 = 0.3;
pub const DEFAULT_PITCH_DAMPING: f64 = 3.0;
pub const DEFAULT_ROLL_DAMPING: f64 = 2.0;
pub const DEFAULT_YAW_DAMPING: f64 = 3.0;

/// Lift coefficient keyframes: (AoA degrees, Cl).
pub const DEFAULT_LIFT_CURVE: [(f64, f64); 11] = [
    (-10.0, -0.4),
    (-5.0, -0.2),
    (0.0, 0.0),
    (5.0, 0.5),
    (10.0, 0.9),
    (12.0, 1.1),
    (14.0, 1.2),
    (16.0, 1.0),
    (18.0, 0.6),
    (20.0, 0.2),
    (25.0, 0.0),
];

/// Default airframe mass (kg).
pub const DEFAULT_MASS: f64 = 12.0;

/// Default principal moments of inertia (kg·m²), body x / y / z.
pub const DEFAULT_INERTIA: [f64; 3] = [1.2, 1.6, 0.9];

/// Engine mount, body frame (m). Nose.
pub const DEFAULT_ENGINE_POSITION: [f64; 3] = [0.0, 0.0, 0.6];

/// Lift application point, body frame (m). Slightly aft of the CG.
pub const DEFAULT_LIFT_POSITION: [f64; 3] = [0.0, 0.0, -0.03];

/// Side force application point, body frame (m). The tail fin, well aft
/// of the CG, so sideslip yaws the nose back into the airflow.
pub const DEFAULT_STABILIZER_POSITION: [f64; 3] = [0.0, 0.0, -0.9];

/// Body angular speed cap (rad/s).
pub const DEFAULT_MAX_ANGULAR_VELOCITY: f64 = 3.0;

// --- Player input ---

/// Stick pitch that holds the default airframe near level flight at 80%
/// throttle, since the wing makes no lift at zero AoA.
pub const DEFAULT_PLAYER_TRIM_PITCH: f64 = 0.35;

/// Throttle ramp rate while a throttle key is held (per second).
pub const THROTTLE_RATE: f64 = 2.0;

/// Catapult launch only fires below this speed (m/s).
pub const CATAPULT_MAX_SPEED: f64 = 5.5;

/// Catapult impulse as a multiple of engine power (N·s per N).
pub const CATAPULT_IMPULSE_FACTOR: f64 = 5.0;

// --- Pilot AI: navigation & vision ---

/// Distance at which a waypoint counts as reached (m). A waypoint is
/// also reached once the aircraft has flown past it along its leg.
pub const TARGET_REACH_THRESHOLD: f64 = 10.0;

/// Leg progress (0 at the leg origin, 1 abeam the waypoint) at which a
/// waypoint counts as passed.
pub const WAYPOINT_PASSED_PROGRESS: f64 = 1.0;

/// Legs shorter than this are never treated as passed (m²).
pub const MIN_LEG_LENGTH_SQ: f64 = 1.0e-6;

/// Maximum distance at which the tracked target is seen (m).
pub const VISION_RANGE: f64 = 300.0;

/// Targets flying lower than this are invisible (m).
pub const MIN_TARGET_ALTITUDE: f64 = 50.0;

/// Airspeed given to AI aircraft at spawn (m/s).
pub const INITIAL_SPEED: f64 = 50.0;

/// Thrust used while patrolling or returning to base.
pub const CRUISE_THRUST: f64 = 0.7;

/// Absolute bank and pitch limits (degrees).
pub const MAX_BANK_ANGLE_DEG: f64 = 45.0;
pub const MAX_PITCH_ANGLE_DEG: f64 = 20.0;

// --- Pilot AI: combat tactics ---

/// Nominal lead-pursuit prediction horizon (s).
pub const LEAD_PURSUIT_TIME: f64 = 1.5;

/// Below this airspeed the energy state starts to drop (m/s).
pub const MIN_SAFE_SPEED: f64 = 30.0;

/// |AoA| at which the energy state reaches zero (degrees).
pub const MAX_SAFE_AOA_DEG: f64 = 12.0;

/// Distance behind the target aimed at in lag pursuit (m).
pub const LAG_PURSUIT_OFFSET: f64 = 80.0;

/// Reaction delay at difficulty 1 (s).
pub const REACTION_DELAY_FAST: f64 = 0.2;

/// Reaction delay at difficulty 0 (s).
pub const REACTION_DELAY_SLOW: f64 = 1.0;

/// Energy threshold for defensive mode: (difficulty 0, difficulty 1).
pub const DEFENSIVE_THRESHOLD_RANGE: (f64, f64) = (0.7, 0.4);

/// Lag pursuit distance threshold (m): (difficulty 0, difficulty 1).
pub const LAG_DISTANCE_RANGE: (f64, f64) = (80.0, 120.0);

/// Closing speed above which lag pursuit is considered (m/s).
pub const LAG_MIN_CLOSING_SPEED: f64 = 10.0;

/// Lag pursuit requires difficulty strictly above this.
pub const LAG_DIFFICULTY_FLOOR: f64 = 0.3;

/// Lead pursuit band (m), exclusive on both ends.
pub const LEAD_MIN_RANGE: f64 = 100.0;
pub const LEAD_MAX_RANGE: f64 = 300.0;

/// Lead pursuit requires difficulty strictly above this.
pub const LEAD_DIFFICULTY_FLOOR: f64 = 0.2;

/// Distance normalizer for the lead time (m).
pub const LEAD_RANGE_NORMALIZER: f64 = 300.0;

/// Lead time multiplier: (difficulty 0, difficulty 1).
pub const LEAD_TIME_MULTIPLIER_RANGE: (f64, f64) = (0.2, 1.5);

/// Prediction error is injected below this difficulty.
pub const LEAD_ERROR_DIFFICULTY_CUTOFF: f64 = 0.7;

/// Prediction error at difficulty 0 (m).
pub const LEAD_ERROR_MAX: f64 = 20.0;

/// Defensive aim point: ahead along the nose and above (m).
pub const DEFENSIVE_AIM_AHEAD: f64 = 150.0;
pub const DEFENSIVE_AIM_CLIMB: f64 = 80.0;

/// Per-mode thrust setpoints.
pub const PURE_PURSUIT_THRUST: f64 = 0.9;
pub const LEAD_PURSUIT_THRUST: f64 = 0.85;
pub const LAG_PURSUIT_THRUST: f64 = 0.8;
pub const DEFENSIVE_THRUST: f64 = 1.0;

/// Per-mode (bank limiter, pitch limiter).
pub const LAG_PURSUIT_LIMITERS: (f64, f64) = (0.7, 0.7);
pub const DEFENSIVE_LIMITERS: (f64, f64) = (0.5, 0.8);

// --- Pilot AI: attitude control ---

/// Bank limit factor: (difficulty 0, difficulty 1).
pub const BANK_FACTOR_RANGE: (f64, f64) = (0.6, 1.0);

/// Pitch limit factor: (difficulty 0, difficulty 1).
pub const PITCH_FACTOR_RANGE: (f64, f64) = (0.7, 1.0);

/// Heading error → bank multiplier: (difficulty 0, difficulty 1).
pub const HEADING_MULTIPLIER_RANGE: (f64, f64) = (0.5, 0.8);

/// PID output responsiveness: (difficulty 0, difficulty 1).
pub const PID_RESPONSE_RANGE: (f64, f64) = (0.7, 1.0);

/// Aim points closer than this produce no command (m²).
pub const MIN_AIM_DISTANCE_SQ: f64 = 0.01;

/// PID gains (kp, ki, kd).
/// Error is in degrees and the derivative in degrees per second, so the
/// derivative gains stay small to remain stable at the physics tick.
pub const PITCH_PID_GAINS: (f64, f64, f64) = (0.16, 0.1, 0.03);
pub const ROLL_PID_GAINS: (f64, f64, f64) = (0.06, 0.0, 0.02);
pub const YAW_PID_GAINS: (f64, f64, f64) = (0.02, 0.0, 0.005);

/// Default PID clamps.
pub const PID_OUTPUT_LIMIT: f64 = 1.0;
pub const PID_INTEGRAL_LIMIT: f64 = 0.5;

/// Default difficulty for enemies without an explicit setting.
pub const DEFAULT_DIFFICULTY: f64 = 0.5;

// --- Damage ---

/// Default hit points.
pub const DEFAULT_HEALTH: i32 = 100;

/// Fraction of max health at which LOW_HEALTH fires.
pub const LOW_HEALTH_FRACTION: f64 = 0.3;

/// Forward impulse applied on death (N·s).
pub const DEATH_IMPULSE: f64 = 100.0;

/// Magnitude of the random tumble impulse on death (N·m·s).
/// A 100 N·m·s tumble sized for a full-scale airframe, scaled down to
/// the default UAV inertia (about 1 kg·m²).
pub const DEATH_TORQUE_IMPULSE: f64 = 4.0;

/// Ground impacts at or above this speed destroy the wreck (m/s).
pub const MIN_CRASH_SPEED_FOR_EXPLOSION: f64 = 25.0;

// --- Telemetry ---

/// Propeller rotation per unit thrust (degrees per second).
pub const PROPELLER_ROTATION_MULTIPLIER: f64 = 1000.0;
