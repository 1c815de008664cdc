//! Pilot AI for WINGMAN.
//!
//! Behavior state machine, difficulty profiles, the combat tactics engine
//! and the attitude command translator, composed into a [`PilotBrain`].
//! No ECS dependency; operates on plain data.

pub mod attitude;
pub mod brain;
pub mod fsm;
pub mod profiles;
pub mod tactics;

pub use brain::{PatrolRoute, PilotBrain, PilotContext, PilotEvent};
pub use wingman_core as core;

#[cfg(test)]
mod tests;
