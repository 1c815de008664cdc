//! Propeller visuals: spin rate follows the applied thrust.

use hecs::World;

use wingman_core::components::Propeller;
use wingman_core::constants::PROPELLER_ROTATION_MULTIPLIER;
use wingman_flight::FlightModel;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (propeller, model)) in world.query_mut::<(&mut Propeller, &FlightModel)>() {
        propeller.angle_deg =
            (propeller.angle_deg + model.thrust() * PROPELLER_ROTATION_MULTIPLIER * dt)
                .rem_euclid(360.0);
    }
}
