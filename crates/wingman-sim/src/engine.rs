//! Simulation engine: the core of the flight sim.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued commands,
//! runs the frame-rate AI systems and the fixed-rate physics systems, and
//! produces `SimSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wingman_core::commands::PlayerCommand;
use wingman_core::components::{Callsign, PlayerAircraft, PlayerStick, Wreck};
use wingman_core::constants::*;
use wingman_core::events::SimEvent;
use wingman_core::state::SimSnapshot;
use wingman_core::types::SimTime;
use wingman_flight::{FlightModel, RigidBody};

use crate::error::ScenarioError;
use crate::scenario::{ScenarioConfig, MAX_TIME_SCALE};
use crate::systems;
use crate::world_setup;

/// Slack when comparing the accumulator against the physics step, so a
/// frame that is an exact multiple of the step is not short one tick.
const ACCUMULATOR_EPSILON: f64 = 1e-9;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    paused: bool,
    time_scale: f64,
    physics_dt: f64,
    accumulator: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(&ScenarioConfig::default())
    }
}

impl SimulationEngine {
    /// Build a world from `config` without validating it. Out-of-range
    /// scheduling values are clamped.
    pub fn new(config: &ScenarioConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_scenario(&mut world, config);

        let time_scale = if config.time_scale.is_finite() {
            config.time_scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };

        Self {
            world,
            time: SimTime::default(),
            paused: false,
            time_scale,
            physics_dt: 1.0 / config.physics_rate.max(1) as f64,
            accumulator: 0.0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Validate `config`, then build the world.
    pub fn from_scenario(config: &ScenarioConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one nominal frame.
    pub fn tick(&mut self) -> SimSnapshot {
        self.advance(FRAME_DT)
    }

    /// Advance by a frame of `frame_dt` wall seconds and return the
    /// resulting snapshot.
    pub fn advance(&mut self, frame_dt: f64) -> SimSnapshot {
        self.process_commands();

        let dt = if frame_dt.is_finite() {
            frame_dt.max(0.0) * self.time_scale
        } else {
            0.0
        };

        if !self.paused && dt > 0.0 {
            self.time.advance_frame(dt);
            self.run_frame_systems(dt);
            self.run_physics(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.paused, events)
    }

    /// Current state without advancing. Carries no events.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, self.paused, Vec::new())
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn physics_dt(&self) -> f64 {
        self.physics_dt
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetStick { pitch, roll, yaw } => {
                for (_entity, stick) in self.world.query_mut::<&mut PlayerStick>() {
                    stick.pitch = clamp_axis(pitch);
                    stick.roll = clamp_axis(roll);
                    stick.yaw = clamp_axis(yaw);
                }
            }
            PlayerCommand::SetThrottleRate { direction } => {
                for (_entity, stick) in self.world.query_mut::<&mut PlayerStick>() {
                    stick.throttle_direction = clamp_axis(direction);
                }
            }
            PlayerCommand::SetControlInputs {
                pitch,
                roll,
                yaw,
                thrust,
            } => {
                for (_entity, stick) in self.world.query_mut::<&mut PlayerStick>() {
                    stick.pitch = clamp_axis(pitch);
                    stick.roll = clamp_axis(roll);
                    stick.yaw = clamp_axis(yaw);
                    stick.thrust = if thrust.is_finite() {
                        thrust.clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                }
            }
            PlayerCommand::CatapultLaunch => self.catapult_launch(),
            PlayerCommand::ApplyDamage { callsign, amount } => {
                systems::damage::apply_damage(
                    &mut self.world,
                    callsign,
                    amount,
                    &mut self.rng,
                    &mut self.events,
                );
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
            }
            PlayerCommand::Pause => {
                self.paused = true;
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
        }
    }

    /// Kick a parked player aircraft forward. Ignored once it is moving.
    fn catapult_launch(&mut self) {
        for (_entity, (callsign, _player, body, model, wreck)) in self.world.query_mut::<(
            &Callsign,
            &PlayerAircraft,
            &mut RigidBody,
            &FlightModel,
            Option<&Wreck>,
        )>() {
            let speed = body.state().speed();
            if wreck.is_some() || speed >= CATAPULT_MAX_SPEED {
                tracing::debug!(callsign = callsign.id, speed, "catapult launch ignored");
                continue;
            }
            let forward = body.state().forward();
            body.add_impulse(forward * model.config().engine_power * CATAPULT_IMPULSE_FACTOR);
            tracing::info!(callsign = callsign.id, "catapult launch");
            self.events.push(SimEvent::CatapultLaunch {
                callsign: callsign.id,
            });
        }
    }

    /// Systems that run once per frame.
    fn run_frame_systems(&mut self, dt: f64) {
        // 1. Pilot AI (behavior dispatch, vision, tactics)
        systems::pilot_ai::run(&mut self.world, self.time.elapsed_secs, &mut self.events);
        // 2. Propeller telemetry
        systems::propeller::run(&mut self.world, dt);
    }

    /// Accumulate frame time and run whole physics ticks.
    fn run_physics(&mut self, dt: f64) {
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator + ACCUMULATOR_EPSILON >= self.physics_dt
            && steps < MAX_PHYSICS_STEPS_PER_FRAME
        {
            self.run_physics_tick();
            self.accumulator -= self.physics_dt;
            steps += 1;
        }

        if self.accumulator + ACCUMULATOR_EPSILON >= self.physics_dt {
            tracing::debug!(
                backlog = self.accumulator,
                "physics falling behind, dropping backlog"
            );
            self.accumulator = 0.0;
        }
        self.accumulator = self.accumulator.max(0.0);
    }

    /// Run all fixed-rate systems in order.
    fn run_physics_tick(&mut self) {
        let dt = self.physics_dt;
        // 1. Player stick and throttle
        systems::player_input::run(&mut self.world, dt);
        // 2. Autopilot (attitude translator + PIDs)
        systems::autopilot::run(&mut self.world, dt);
        // 3. Forces and integration
        systems::flight_dynamics::run(&mut self.world, dt);
        // 4. Ground impacts
        systems::damage::crash_check(
            &mut self.world,
            &mut self.rng,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 5. Remove exploded wrecks
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        self.time.advance_physics();
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
