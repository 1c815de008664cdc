//! Flight dynamics for WINGMAN.
//!
//! A coefficient-curve fixed-wing model: lift from a keyframed Cl(AoA)
//! table, induced plus parasitic drag, a side force from the vertical
//! stabilizer, speed-scaled control torques with stall loss and rate
//! damping. Forces are accumulated on a [`RigidBody`] and integrated
//! once per fixed physics tick.
//!
//! Also hosts the generic single-axis [`Pid`] controller used by the
//! pilot AI's attitude translator.

pub mod config;
pub mod error;
pub mod lift_curve;
pub mod model;
pub mod pid;
pub mod rigid_body;

pub use config::{AerodynamicConfig, AircraftConfig, MassProperties};
pub use error::ConfigError;
pub use lift_curve::{LiftCurve, LiftKey};
pub use model::{derive_state, FlightModel, ForceBreakdown};
pub use pid::{Pid, PidGains};
pub use rigid_body::RigidBody;
