//! Simulation engine for WINGMAN.
//!
//! Owns the hecs ECS world, runs AI systems once per frame and flight
//! physics at a fixed tick rate, and produces SimSnapshots for consumers.

pub mod engine;
pub mod error;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use error::ScenarioError;
pub use scenario::ScenarioConfig;
pub use wingman_core as core;
