//! ECS systems that operate on the simulation world.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They do not own state: all state lives in components.
//! `pilot_ai` and `propeller` run once per frame; the rest run once per
//! fixed physics tick.

pub mod autopilot;
pub mod damage;
pub mod flight_dynamics;
pub mod pilot_ai;
pub mod player_input;
pub mod propeller;
pub mod snapshot;
