//! Headless WINGMAN runner.
//!
//! Loads a scenario, optionally replays a timed command script, steps the
//! simulation engine (paced to wall-clock time or as fast as possible) and
//! hands every snapshot to the caller.

pub mod error;
pub mod runner;
pub mod script;

pub use error::AppError;
pub use wingman_core as core;
