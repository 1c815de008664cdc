//! A complete AI pilot: behavior machine, tactics and attitude control.
//!
//! `frame_update` runs once per frame: behavior dispatch, then the vision
//! check, then the steering command is refreshed. `control` runs once per
//! physics tick and turns the current command into control inputs.

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use wingman_core::constants::{MIN_LEG_LENGTH_SQ, WAYPOINT_PASSED_PROGRESS};
use wingman_core::enums::{BehaviorState, BehaviorTrigger, ChaseMode};
use wingman_core::events::AimReference;
use wingman_core::types::{ControlInputs, DerivedFlightState, RigidBodyState, TargetTrack};

use crate::attitude::{AttitudeCommand, AttitudeTranslator};
use crate::fsm::{BehaviorMachine, Transition};
use crate::profiles::{DifficultyProfile, PilotTuning};
use crate::tactics::{combat_aim, CombatAim, CombatTactics, ModeChange, TacticalPicture};

/// Patrol circuit plus the home point used when returning to base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolRoute {
    pub waypoints: Vec<DVec3>,
    pub home: Option<DVec3>,
}

impl PatrolRoute {
    /// Home, falling back to the first patrol waypoint.
    pub fn home_point(&self) -> Option<DVec3> {
        self.home.or_else(|| self.waypoints.first().copied())
    }
}

/// Horizontal progress from `origin` towards `waypoint`: 0 at the origin,
/// 1 once abeam the waypoint. `None` for a degenerate leg.
pub fn leg_progress(origin: DVec3, waypoint: DVec3, position: DVec3) -> Option<f64> {
    let flat = |v: DVec3| DVec3::new(v.x, 0.0, v.z);
    let leg = flat(waypoint - origin);
    let length_sq = leg.length_squared();
    if length_sq < MIN_LEG_LENGTH_SQ {
        return None;
    }
    Some(flat(position - origin).dot(leg) / length_sq)
}

/// What the pilot observes this frame.
#[derive(Debug, Clone, Copy)]
pub struct PilotContext<'a> {
    /// Simulation time (s).
    pub now: f64,
    pub body: &'a RigidBodyState,
    pub flight: &'a DerivedFlightState,
    /// `None` when there is nothing to hunt.
    pub target: Option<&'a TargetTrack>,
}

/// Something the pilot decided this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PilotEvent {
    Transition(Transition),
    ChaseModeChanged(ModeChange),
    TargetSwitched(AimReference),
}

#[derive(Debug, Clone)]
pub struct PilotBrain {
    machine: BehaviorMachine,
    tactics: CombatTactics,
    translator: AttitudeTranslator,
    route: PatrolRoute,
    waypoint_index: usize,
    aim: AimReference,
    /// Where the current navigation leg started.
    leg_origin: Option<DVec3>,
    tuning: PilotTuning,
    profile: DifficultyProfile,
    combat: Option<CombatAim>,
    command: Option<AttitudeCommand>,
    rng: ChaCha8Rng,
}

impl PilotBrain {
    pub fn new(route: PatrolRoute, difficulty: f64, tuning: PilotTuning, seed: u64) -> Self {
        let aim = if route.waypoints.is_empty() {
            tracing::warn!("pilot has no patrol waypoints, it will hold its heading");
            AimReference::None
        } else {
            AimReference::Waypoint(0)
        };
        let profile = DifficultyProfile::new(difficulty, &tuning);
        let mut brain = Self {
            machine: BehaviorMachine::new(),
            tactics: CombatTactics::new(),
            translator: AttitudeTranslator::new(&tuning),
            route,
            waypoint_index: 0,
            aim,
            leg_origin: None,
            tuning,
            profile,
            combat: None,
            command: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        brain.refresh_command(None);
        brain
    }

    pub fn state(&self) -> BehaviorState {
        self.machine.state()
    }

    /// Current pursuit mode, only while chasing.
    pub fn chase_mode(&self) -> Option<ChaseMode> {
        (self.machine.state() == BehaviorState::Chase).then(|| self.tactics.mode())
    }

    pub fn aim(&self) -> AimReference {
        self.aim
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn tuning(&self) -> &PilotTuning {
        &self.tuning
    }

    pub fn tactics(&self) -> &CombatTactics {
        &self.tactics
    }

    pub fn translator(&self) -> &AttitudeTranslator {
        &self.translator
    }

    /// The steering command `control` will fly.
    pub fn command(&self) -> Option<&AttitudeCommand> {
        self.command.as_ref()
    }

    pub fn is_dead(&self) -> bool {
        self.machine.is_dead()
    }

    /// Per-frame decision step.
    pub fn frame_update(&mut self, ctx: &PilotContext<'_>) -> Vec<PilotEvent> {
        let mut events = Vec::new();
        if self.leg_origin.is_none() {
            self.leg_origin = Some(ctx.body.position);
        }

        match self.machine.state() {
            BehaviorState::Patrol => self.patrol(ctx, &mut events),
            BehaviorState::ReturnToBase => self.return_to_base(ctx, &mut events),
            BehaviorState::Chase => self.chase(ctx, &mut events),
            BehaviorState::Dead => return events,
        }

        self.check_vision(ctx, &mut events);
        self.refresh_command(ctx.target);
        events
    }

    /// Per-physics-tick control. `None` leaves the current inputs in place.
    pub fn control(&mut self, body: &RigidBodyState, dt: f64) -> Option<ControlInputs> {
        let command = self.command?;
        self.translator
            .translate(body, &command, &self.profile, &self.tuning, dt)
    }

    /// Damage collaborator reports health at or below the low threshold.
    pub fn on_low_health(&mut self) -> Vec<PilotEvent> {
        let mut events = Vec::new();
        if let Some(t) = self.fire(BehaviorTrigger::LowHealth, &mut events) {
            if t.to == BehaviorState::ReturnToBase {
                self.combat = None;
                let aim = if self.route.home_point().is_some() {
                    AimReference::Home
                } else {
                    AimReference::None
                };
                self.switch_target(aim, &mut events);
            }
        }
        self.refresh_command(None);
        events
    }

    /// The aircraft was destroyed. The pilot stops flying; the caller
    /// should zero the flight model's inputs.
    pub fn on_died(&mut self) -> Vec<PilotEvent> {
        let mut events = Vec::new();
        self.fire(BehaviorTrigger::Died, &mut events);
        self.combat = None;
        self.command = None;
        events
    }

    fn patrol(&mut self, ctx: &PilotContext<'_>, events: &mut Vec<PilotEvent>) {
        let count = self.route.waypoints.len();
        let Some(waypoint) = self.route.waypoints.get(self.waypoint_index).copied() else {
            return;
        };
        if self.reached(ctx.body.position, waypoint) {
            self.waypoint_index = (self.waypoint_index + 1) % count;
            self.switch_target(AimReference::Waypoint(self.waypoint_index), events);
        }
    }

    fn return_to_base(&mut self, ctx: &PilotContext<'_>, events: &mut Vec<PilotEvent>) {
        let Some(home) = self.route.home_point() else {
            return;
        };
        if self.reached(ctx.body.position, home) {
            if let Some(t) = self.fire(BehaviorTrigger::ReachedBase, events) {
                if t.to == BehaviorState::Patrol {
                    self.resume_patrol(events);
                }
            }
        }
    }

    /// Within the reach radius, or flown past the point along the current leg.
    fn reached(&self, position: DVec3, point: DVec3) -> bool {
        if position.distance(point) < self.tuning.reach_threshold {
            return true;
        }
        self.leg_origin
            .and_then(|origin| leg_progress(origin, point, position))
            .is_some_and(|progress| progress >= WAYPOINT_PASSED_PROGRESS)
    }

    fn chase(&mut self, ctx: &PilotContext<'_>, events: &mut Vec<PilotEvent>) {
        let Some(target) = ctx.target else {
            return;
        };
        let picture = TacticalPicture::measure(ctx.body, ctx.flight, target, &self.tuning);

        if let Some(change) = self.tactics.update(ctx.now, &picture, &self.profile) {
            tracing::debug!(from = ?change.from, to = ?change.to, "chase mode changed");
            self.translator.reset();
            events.push(PilotEvent::ChaseModeChanged(change));
        }

        tracing::trace!(
            difficulty = self.profile.difficulty,
            mode = ?self.tactics.mode(),
            energy = picture.energy,
            speed = ctx.flight.speed,
            "chasing"
        );

        self.combat = Some(combat_aim(
            self.tactics.mode(),
            ctx.body,
            target,
            &picture,
            &self.profile,
            &self.tuning,
            &mut self.rng,
        ));
    }

    fn check_vision(&mut self, ctx: &PilotContext<'_>, events: &mut Vec<PilotEvent>) {
        let chasing = self.machine.state() == BehaviorState::Chase;

        let Some(target) = ctx.target else {
            if chasing {
                self.lose_target(events);
            }
            return;
        };

        // Target dropped below the floor: lost, and no range check.
        if target.position.y < self.tuning.min_target_altitude {
            if chasing {
                self.lose_target(events);
            }
            return;
        }

        let distance = ctx.body.position.distance(target.position);
        if distance > self.tuning.vision_range {
            if chasing {
                self.lose_target(events);
            }
        } else if distance < self.tuning.vision_range && !chasing {
            if let Some(t) = self.fire(BehaviorTrigger::SeePlayer, events) {
                if t.to == BehaviorState::Chase {
                    self.enter_chase(ctx, target, events);
                }
            }
        }
    }

    fn enter_chase(
        &mut self,
        ctx: &PilotContext<'_>,
        target: &TargetTrack,
        events: &mut Vec<PilotEvent>,
    ) {
        self.tactics.enter_chase();
        self.switch_target(AimReference::Target, events);
        let picture = TacticalPicture::measure(ctx.body, ctx.flight, target, &self.tuning);
        self.combat = Some(combat_aim(
            ChaseMode::PurePursuit,
            ctx.body,
            target,
            &picture,
            &self.profile,
            &self.tuning,
            &mut self.rng,
        ));
    }

    fn lose_target(&mut self, events: &mut Vec<PilotEvent>) {
        if let Some(t) = self.fire(BehaviorTrigger::LosePlayer, events) {
            if t.to == BehaviorState::Patrol {
                self.resume_patrol(events);
            }
        }
    }

    /// Back to the first patrol waypoint.
    fn resume_patrol(&mut self, events: &mut Vec<PilotEvent>) {
        self.combat = None;
        self.waypoint_index = 0;
        let aim = if self.route.waypoints.is_empty() {
            AimReference::None
        } else {
            AimReference::Waypoint(0)
        };
        self.switch_target(aim, events);
    }

    fn switch_target(&mut self, aim: AimReference, events: &mut Vec<PilotEvent>) {
        tracing::info!(?aim, "switching target");
        self.aim = aim;
        self.leg_origin = None;
        self.translator.reset();
        events.push(PilotEvent::TargetSwitched(aim));
    }

    fn fire(
        &mut self,
        trigger: BehaviorTrigger,
        events: &mut Vec<PilotEvent>,
    ) -> Option<Transition> {
        let transition = self.machine.fire(trigger)?;
        events.push(PilotEvent::Transition(transition));
        Some(transition)
    }

    fn aim_position(&self, target: Option<&TargetTrack>) -> Option<DVec3> {
        match self.aim {
            AimReference::None => None,
            AimReference::Waypoint(i) => self.route.waypoints.get(i).copied(),
            AimReference::Home => self.route.home_point(),
            AimReference::Target => target.map(|t| t.position),
        }
    }

    fn refresh_command(&mut self, target: Option<&TargetTrack>) {
        self.command = match self.machine.state() {
            BehaviorState::Dead => None,
            BehaviorState::Chase => self.combat.map(|c| AttitudeCommand {
                aim_point: c.aim_point,
                thrust: c.thrust,
                energy: c.energy,
                bank_limiter: c.bank_limiter,
                pitch_limiter: c.pitch_limiter,
            }),
            BehaviorState::Patrol | BehaviorState::ReturnToBase => self
                .aim_position(target)
                .map(|p| AttitudeCommand::cruise(p, self.tuning.cruise_thrust)),
        };
    }
}
