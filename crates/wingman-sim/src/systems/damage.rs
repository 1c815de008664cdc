//! Damage and death.
//!
//! Anything with health is reached through the `Damageable` capability.
//! Each entity kind decides what dying means for it: an AI aircraft hands
//! its pilot the DIED trigger and tumbles, the player aircraft loses its
//! controls, a soldier stops moving. Destroyed aircraft become wrecks and
//! keep falling until a hard ground impact removes them.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use wingman_core::components::*;
use wingman_core::constants::*;
use wingman_core::events::SimEvent;
use wingman_core::types::ControlInputs;
use wingman_flight::{FlightModel, RigidBody};
use wingman_pilot_ai::PilotBrain;

use crate::systems::pilot_ai::forward_events;

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, or no damage.
    Ignored,
    Damaged { remaining: i32 },
    Destroyed,
}

pub trait Damageable {
    fn callsign(&self) -> u32;

    fn health_mut(&mut self) -> &mut Health;

    /// Health dropped to or below the low threshold for the first time.
    fn on_low_health(&mut self, _events: &mut Vec<SimEvent>) {}

    /// Health reached zero.
    fn on_destroyed(&mut self, rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>);

    fn take_damage(
        &mut self,
        amount: u32,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
    ) -> DamageOutcome {
        let callsign = self.callsign();
        let health = self.health_mut();
        if amount == 0 || health.is_dead() {
            return DamageOutcome::Ignored;
        }

        let amount_hp = i32::try_from(amount).unwrap_or(i32::MAX);
        health.current = health.current.saturating_sub(amount_hp);
        let remaining = health.current;
        let dead = health.is_dead();
        let low = !dead && !health.low_health_reported && health.is_low();
        if low {
            health.low_health_reported = true;
        }

        events.push(SimEvent::Damaged {
            callsign,
            amount,
            remaining,
        });

        if dead {
            self.on_destroyed(rng, events);
            return DamageOutcome::Destroyed;
        }
        if low {
            self.on_low_health(events);
        }
        DamageOutcome::Damaged { remaining }
    }

    /// Destroy outright, whatever the remaining health. False if already dead.
    fn kill(&mut self, rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) -> bool {
        let health = self.health_mut();
        if health.is_dead() {
            return false;
        }
        health.current = 0;
        self.on_destroyed(rng, events);
        true
    }
}

/// An AI-flown aircraft.
pub struct EnemyPlane<'a> {
    pub callsign: u32,
    pub health: &'a mut Health,
    pub brain: &'a mut PilotBrain,
    pub model: &'a mut FlightModel,
    pub body: &'a mut RigidBody,
}

impl Damageable for EnemyPlane<'_> {
    fn callsign(&self) -> u32 {
        self.callsign
    }

    fn health_mut(&mut self) -> &mut Health {
        self.health
    }

    fn on_low_health(&mut self, events: &mut Vec<SimEvent>) {
        forward_events(self.callsign, self.brain.on_low_health(), events);
    }

    fn on_destroyed(&mut self, rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) {
        forward_events(self.callsign, self.brain.on_died(), events);
        self.model.set_control_inputs(ControlInputs::ZERO);

        let forward = self.body.state().forward();
        self.body.add_impulse(forward * DEATH_IMPULSE);
        self.body
            .add_angular_impulse(random_direction(rng) * DEATH_TORQUE_IMPULSE);

        tracing::info!(callsign = self.callsign, "aircraft destroyed");
        events.push(SimEvent::AircraftDestroyed {
            callsign: self.callsign,
        });
    }
}

/// The human-flown aircraft.
pub struct PlayerPlane<'a> {
    pub callsign: u32,
    pub health: &'a mut Health,
    pub stick: &'a mut PlayerStick,
    pub model: &'a mut FlightModel,
}

impl Damageable for PlayerPlane<'_> {
    fn callsign(&self) -> u32 {
        self.callsign
    }

    fn health_mut(&mut self) -> &mut Health {
        self.health
    }

    fn on_destroyed(&mut self, _rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) {
        *self.stick = PlayerStick::default();
        self.model.set_control_inputs(ControlInputs::ZERO);

        tracing::info!(callsign = self.callsign, "player aircraft destroyed");
        events.push(SimEvent::AircraftDestroyed {
            callsign: self.callsign,
        });
    }
}

/// A soldier on the ground.
pub struct GroundTarget<'a> {
    pub callsign: u32,
    pub health: &'a mut Health,
    pub unit: &'a mut GroundUnit,
}

impl Damageable for GroundTarget<'_> {
    fn callsign(&self) -> u32 {
        self.callsign
    }

    fn health_mut(&mut self) -> &mut Health {
        self.health
    }

    fn on_destroyed(&mut self, _rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) {
        self.unit.animated = false;
        tracing::info!(callsign = self.callsign, "ground unit destroyed");
        events.push(SimEvent::GroundUnitDestroyed {
            callsign: self.callsign,
        });
    }
}

/// Uniformly distributed unit vector.
fn random_direction(rng: &mut ChaCha8Rng) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Run `f` against the entity's damage capability. `None` if the entity
/// is gone or cannot be damaged.
pub fn with_damageable<R>(
    world: &mut World,
    entity: Entity,
    f: impl FnOnce(&mut dyn Damageable) -> R,
) -> Option<R> {
    let (is_enemy, is_player, is_ground) = {
        let e = world.entity(entity).ok()?;
        (
            e.has::<EnemyAircraft>(),
            e.has::<PlayerAircraft>(),
            e.has::<GroundUnit>(),
        )
    };

    if is_enemy {
        let (callsign, health, brain, model, body) = world
            .query_one_mut::<(
                &Callsign,
                &mut Health,
                &mut PilotBrain,
                &mut FlightModel,
                &mut RigidBody,
            )>(entity)
            .ok()?;
        let mut plane = EnemyPlane {
            callsign: callsign.id,
            health,
            brain,
            model,
            body,
        };
        return Some(f(&mut plane));
    }

    if is_player {
        let (callsign, health, stick, model) = world
            .query_one_mut::<(&Callsign, &mut Health, &mut PlayerStick, &mut FlightModel)>(
                entity,
            )
            .ok()?;
        let mut plane = PlayerPlane {
            callsign: callsign.id,
            health,
            stick,
            model,
        };
        return Some(f(&mut plane));
    }

    if is_ground {
        let (callsign, health, unit) = world
            .query_one_mut::<(&Callsign, &mut Health, &mut GroundUnit)>(entity)
            .ok()?;
        let mut target = GroundTarget {
            callsign: callsign.id,
            health,
            unit,
        };
        return Some(f(&mut target));
    }

    None
}

pub fn find_by_callsign(world: &World, callsign: u32) -> Option<Entity> {
    world
        .query::<&Callsign>()
        .iter()
        .find(|(_, c)| c.id == callsign)
        .map(|(entity, _)| entity)
}

fn is_aircraft(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|e| e.has::<RigidBody>())
        .unwrap_or(false)
}

/// Apply `amount` damage to the entity with `callsign`. Unknown callsigns
/// are ignored.
pub fn apply_damage(
    world: &mut World,
    callsign: u32,
    amount: u32,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> DamageOutcome {
    let Some(entity) = find_by_callsign(world, callsign) else {
        tracing::warn!(callsign, "damage for unknown callsign ignored");
        return DamageOutcome::Ignored;
    };

    let outcome = with_damageable(world, entity, |target| {
        target.take_damage(amount, rng, events)
    })
    .unwrap_or(DamageOutcome::Ignored);

    if outcome == DamageOutcome::Destroyed && is_aircraft(world, entity) {
        let _ = world.insert_one(entity, Wreck);
    }
    outcome
}

/// Ground impacts from the last physics tick.
///
/// An AI aircraft dies on any touchdown. Any aircraft that hits at
/// `MIN_CRASH_SPEED_FOR_EXPLOSION` or faster is destroyed and its wreck
/// removed.
pub fn crash_check(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let impacts: Vec<(Entity, u32, f64, bool, DVec3)> = world
        .query::<(&Callsign, &RigidBody, Option<&EnemyAircraft>)>()
        .iter()
        .filter_map(|(entity, (callsign, body, enemy))| {
            body.last_impact_speed().map(|speed| {
                (
                    entity,
                    callsign.id,
                    speed,
                    enemy.is_some(),
                    body.state().position,
                )
            })
        })
        .collect();

    for (entity, callsign, speed, is_enemy, position) in impacts {
        let explodes = speed >= MIN_CRASH_SPEED_FOR_EXPLOSION;
        tracing::debug!(callsign, speed, explodes, "ground impact");

        if is_enemy || explodes {
            let killed = with_damageable(world, entity, |target| target.kill(rng, events))
                .unwrap_or(false);
            if killed {
                let _ = world.insert_one(entity, Wreck);
            }
        }

        if explodes {
            tracing::info!(callsign, speed, "wreck exploded");
            events.push(SimEvent::WreckExploded { callsign, position });
            despawn_buffer.push(entity);
        }
    }
}
