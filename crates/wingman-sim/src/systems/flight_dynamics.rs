//! Flight dynamics system: aerodynamic forces plus rigid-body
//! integration for every aircraft, wrecks included.

use hecs::World;

use wingman_flight::{FlightModel, RigidBody};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (model, body)) in world.query_mut::<(&mut FlightModel, &mut RigidBody)>() {
        model.step(body, dt);
    }
}
