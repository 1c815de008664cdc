//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use wingman_core::components::*;
use wingman_core::enums::ControlMode;
use wingman_core::events::SimEvent;
use wingman_core::state::*;
use wingman_core::types::{RigidBodyState, SimTime};
use wingman_flight::{derive_state, FlightModel, RigidBody};
use wingman_pilot_ai::PilotBrain;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    paused: bool,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        paused,
        aircraft: build_aircraft(world),
        ground_units: build_ground_units(world),
        events,
    }
}

/// Compass heading of the nose in [0, 360). 0 = +Z, 90 = +X.
pub fn heading_deg(state: &RigidBodyState) -> f64 {
    let forward = state.forward();
    forward.x.atan2(forward.z).to_degrees().rem_euclid(360.0)
}

fn build_aircraft(world: &World) -> Vec<AircraftView> {
    let mut query = world.query::<(
        &Callsign,
        &RigidBody,
        &FlightModel,
        &Health,
        Option<&PilotBrain>,
        Option<&Propeller>,
    )>();

    let mut aircraft: Vec<AircraftView> = query
        .iter()
        .map(|(_entity, (callsign, body, model, health, brain, propeller))| {
            let state = body.state();
            let flight = derive_state(state);
            AircraftView {
                callsign: callsign.id,
                name: callsign.name.clone(),
                control_mode: if brain.is_some() {
                    ControlMode::Autopilot
                } else {
                    ControlMode::Player
                },
                position: state.position,
                orientation: state.orientation,
                velocity: state.linear_velocity,
                speed: flight.speed,
                altitude: state.altitude(),
                heading_deg: heading_deg(state),
                thrust: model.thrust(),
                angle_of_attack_deg: flight.angle_of_attack_deg,
                sideslip_deg: flight.sideslip_deg,
                health: health.current,
                behavior: brain.map(|b| b.state()),
                chase_mode: brain.and_then(|b| b.chase_mode()),
                aim: brain.map(|b| b.aim()),
                propeller_angle_deg: propeller.map(|p| p.angle_deg).unwrap_or(0.0),
            }
        })
        .collect();

    aircraft.sort_by_key(|a| a.callsign);
    aircraft
}

fn build_ground_units(world: &World) -> Vec<GroundUnitView> {
    let mut units: Vec<GroundUnitView> = world
        .query::<(&Callsign, &GroundUnit, &Health)>()
        .iter()
        .map(|(_entity, (callsign, unit, health))| GroundUnitView {
            callsign: callsign.id,
            name: callsign.name.clone(),
            position: unit.position,
            health: health.current,
            alive: !health.is_dead(),
        })
        .collect();

    units.sort_by_key(|u| u.callsign);
    units
}
