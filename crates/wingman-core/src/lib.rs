//! Core types and definitions for the WINGMAN flight simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! body-frame conventions, rigid-body and control types, behavior enums,
//! components, commands, events, snapshots and tuning constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;
