//! Autopilot system: each pilot turns its steering command into control
//! inputs, once per physics tick. A pilot with nothing to fly leaves the
//! previous inputs in place.

use hecs::World;

use wingman_flight::{FlightModel, RigidBody};
use wingman_pilot_ai::PilotBrain;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (brain, body, model)) in
        world.query_mut::<(&mut PilotBrain, &RigidBody, &mut FlightModel)>()
    {
        if let Some(inputs) = brain.control(body.state(), dt) {
            model.set_control_inputs(inputs);
        }
    }
}
