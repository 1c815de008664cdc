//! Player input system: ramps the throttle and hands the stick to the
//! flight model, once per physics tick.

use hecs::World;

use wingman_core::components::{PlayerAircraft, PlayerStick, Wreck};
use wingman_core::constants::THROTTLE_RATE;
use wingman_core::types::ControlInputs;
use wingman_flight::FlightModel;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_player, stick, model, wreck)) in world.query_mut::<(
        &PlayerAircraft,
        &mut PlayerStick,
        &mut FlightModel,
        Option<&Wreck>,
    )>() {
        if wreck.is_some() {
            continue;
        }
        stick.thrust = (stick.thrust + stick.throttle_direction * THROTTLE_RATE * dt).clamp(0.0, 1.0);
        model.set_control_inputs(ControlInputs::new(
            stick.pitch,
            stick.roll,
            stick.yaw,
            stick.thrust,
        ));
    }
}
