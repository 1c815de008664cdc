//! Pilot AI system: per-frame behavior, vision and tactics for every
//! AI aircraft.
//!
//! The tracked target is the first player aircraft that is still flying.
//! A destroyed player leaves the pilots with nothing to hunt.

use hecs::World;

use wingman_core::components::{Callsign, PlayerAircraft, Wreck};
use wingman_core::events::SimEvent;
use wingman_core::types::TargetTrack;
use wingman_flight::{derive_state, RigidBody};
use wingman_pilot_ai::{PilotBrain, PilotContext, PilotEvent};

/// Run one frame of decisions for every pilot.
pub fn run(world: &mut World, now: f64, events: &mut Vec<SimEvent>) {
    let target = find_target(world);

    for (_entity, (callsign, body, brain)) in
        world.query_mut::<(&Callsign, &RigidBody, &mut PilotBrain)>()
    {
        let flight = derive_state(body.state());
        let ctx = PilotContext {
            now,
            body: body.state(),
            flight: &flight,
            target: target.as_ref(),
        };
        let pilot_events = brain.frame_update(&ctx);
        forward_events(callsign.id, pilot_events, events);
    }
}

fn find_target(world: &World) -> Option<TargetTrack> {
    world
        .query::<(&PlayerAircraft, &RigidBody, Option<&Wreck>)>()
        .iter()
        .find(|(_, (_, _, wreck))| wreck.is_none())
        .map(|(_, (_, body, _))| TargetTrack::from_state(body.state()))
}

/// Translate a pilot's decisions into simulation events.
pub fn forward_events(callsign: u32, pilot_events: Vec<PilotEvent>, events: &mut Vec<SimEvent>) {
    events.extend(pilot_events.into_iter().map(|event| match event {
        PilotEvent::Transition(t) => SimEvent::BehaviorChanged {
            callsign,
            from: t.from,
            to: t.to,
            trigger: t.trigger,
        },
        PilotEvent::ChaseModeChanged(change) => SimEvent::ChaseModeChanged {
            callsign,
            from: change.from,
            to: change.to,
        },
        PilotEvent::TargetSwitched(target) => SimEvent::TargetSwitched { callsign, target },
    }));
}
