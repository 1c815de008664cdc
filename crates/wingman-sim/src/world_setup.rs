//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player aircraft, AI aircraft and ground units with
//! their component bundles. Callsigns are handed out in spawn order:
//! the player is always 1.

use glam::DVec3;
use hecs::World;

use wingman_core::components::*;
use wingman_core::types::{ControlInputs, RigidBodyState};
use wingman_flight::{FlightModel, RigidBody};
use wingman_pilot_ai::PilotBrain;

use crate::scenario::{EnemySetup, GroundUnitSetup, PlayerSetup, ScenarioConfig};

/// Populate an empty world from a scenario.
pub fn setup_scenario(world: &mut World, config: &ScenarioConfig) {
    let mut next_id = 1;

    spawn_player(world, next_id, &config.player);
    next_id += 1;

    for (index, enemy) in config.enemies.iter().enumerate() {
        let seed = config.seed.wrapping_add(index as u64);
        spawn_enemy(world, next_id, enemy, seed);
        next_id += 1;
    }

    for unit in &config.ground_units {
        spawn_ground_unit(world, next_id, unit);
        next_id += 1;
    }

    tracing::info!(
        scenario = %config.name,
        enemies = config.enemies.len(),
        ground_units = config.ground_units.len(),
        "scenario loaded"
    );
}

fn initial_body(position: DVec3, heading_deg: f64, speed: f64) -> RigidBodyState {
    let mut state = RigidBodyState::level(position, heading_deg);
    state.linear_velocity = state.forward() * speed;
    state
}

/// Spawn the human-flown aircraft.
pub fn spawn_player(world: &mut World, id: u32, setup: &PlayerSetup) -> hecs::Entity {
    let body = RigidBody::new(
        initial_body(setup.position, setup.heading_deg, setup.speed),
        setup.aircraft.mass.clone(),
    );
    let thrust = setup.thrust.clamp(0.0, 1.0);
    let pitch = if setup.trim_pitch.is_finite() {
        setup.trim_pitch.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let mut model = FlightModel::new(setup.aircraft.aerodynamics.clone());
    model.set_control_inputs(ControlInputs::new(pitch, 0.0, 0.0, thrust));

    world.spawn((
        Callsign {
            id,
            name: setup.name.clone(),
        },
        PlayerAircraft,
        body,
        model,
        PlayerStick {
            pitch,
            thrust,
            ..PlayerStick::default()
        },
        Health::new(setup.health),
        Propeller::default(),
    ))
}

/// Spawn an AI aircraft flying its patrol route.
pub fn spawn_enemy(world: &mut World, id: u32, setup: &EnemySetup, seed: u64) -> hecs::Entity {
    let body = RigidBody::new(
        initial_body(setup.position, setup.heading_deg, setup.speed),
        setup.aircraft.mass.clone(),
    );
    let mut model = FlightModel::new(setup.aircraft.aerodynamics.clone());
    model.set_control_inputs(ControlInputs::new(
        0.0,
        0.0,
        0.0,
        setup.tuning.cruise_thrust,
    ));
    let brain = PilotBrain::new(setup.route(), setup.difficulty, setup.tuning.clone(), seed);

    world.spawn((
        Callsign {
            id,
            name: setup.name.clone(),
        },
        EnemyAircraft,
        body,
        model,
        brain,
        Health::new(setup.health),
        Propeller::default(),
    ))
}

/// Spawn a soldier standing on the ground.
pub fn spawn_ground_unit(world: &mut World, id: u32, setup: &GroundUnitSetup) -> hecs::Entity {
    world.spawn((
        Callsign {
            id,
            name: setup.name.clone(),
        },
        GroundUnit {
            position: setup.position,
            animated: true,
        },
        Health::new(setup.health),
    ))
}
