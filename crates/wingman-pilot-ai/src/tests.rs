#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::DVec3;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wingman_core::enums::{BehaviorState, BehaviorTrigger, ChaseMode};
    use wingman_core::events::AimReference;
    use wingman_core::types::{DerivedFlightState, RigidBodyState, TargetTrack};
    use wingman_flight::{derive_state, PidGains};

    use crate::attitude::*;
    use crate::brain::{leg_progress, PatrolRoute, PilotBrain, PilotContext, PilotEvent};
    use crate::fsm::{next_state, BehaviorMachine};
    use crate::profiles::{DifficultyProfile, PilotTuning};
    use crate::tactics::*;

    fn flying(position: DVec3, heading_deg: f64, speed: f64) -> RigidBodyState {
        let mut state = RigidBodyState::level(position, heading_deg);
        state.linear_velocity = state.forward() * speed;
        state
    }

    fn track(position: DVec3, velocity: DVec3) -> TargetTrack {
        TargetTrack {
            position,
            velocity,
            forward: DVec3::Z,
        }
    }

    fn route() -> PatrolRoute {
        PatrolRoute {
            waypoints: vec![
                DVec3::new(0.0, 200.0, 0.0),
                DVec3::new(1000.0, 200.0, 0.0),
                DVec3::new(1000.0, 200.0, 1000.0),
            ],
            home: Some(DVec3::new(-500.0, 150.0, -500.0)),
        }
    }

    fn brain(difficulty: f64) -> PilotBrain {
        PilotBrain::new(route(), difficulty, PilotTuning::default(), 7)
    }

    fn update(
        brain: &mut PilotBrain,
        now: f64,
        body: &RigidBodyState,
        target: Option<&TargetTrack>,
    ) -> Vec<PilotEvent> {
        let flight: DerivedFlightState = derive_state(body);
        brain.frame_update(&PilotContext {
            now,
            body,
            flight: &flight,
            target,
        })
    }

    fn picture(distance: f64, energy: f64, closing_speed: f64) -> TacticalPicture {
        TacticalPicture {
            distance,
            energy,
            closing_speed,
        }
    }

    // ---- Behavior state machine ----

    #[test]
    fn test_transition_table() {
        use BehaviorState::*;

        // Columns follow BehaviorTrigger::ALL:
        // SeePlayer, LosePlayer, LowHealth, ReachedBase, Died
        let expected = [
            (Patrol, [Some(Chase), Some(Patrol), Some(ReturnToBase), None, Some(Dead)]),
            (Chase, [None, Some(Patrol), Some(ReturnToBase), None, Some(Dead)]),
            (ReturnToBase, [Some(Chase), None, None, Some(Patrol), Some(Dead)]),
            (Dead, [None, None, None, None, None]),
        ];
        for (state, row) in expected {
            for (trigger, want) in BehaviorTrigger::ALL.into_iter().zip(row) {
                assert_eq!(
                    next_state(state, trigger),
                    want,
                    "{state:?} + {trigger:?}"
                );
            }
        }
    }

    #[test]
    fn test_dead_is_absorbing() {
        let mut machine = BehaviorMachine::new();
        assert!(machine.fire(BehaviorTrigger::Died).is_some());
        for trigger in BehaviorTrigger::ALL {
            assert!(machine.fire(trigger).is_none());
            assert_eq!(machine.state(), BehaviorState::Dead);
        }
    }

    #[test]
    fn test_unhandled_trigger_keeps_state() {
        let mut machine = BehaviorMachine::new();
        assert!(machine.fire(BehaviorTrigger::ReachedBase).is_none());
        assert_eq!(machine.state(), BehaviorState::Patrol);

        let t = machine.fire(BehaviorTrigger::SeePlayer).unwrap();
        assert_eq!(t.from, BehaviorState::Patrol);
        assert_eq!(t.to, BehaviorState::Chase);
        assert!(machine.fire(BehaviorTrigger::SeePlayer).is_none());
        assert_eq!(machine.state(), BehaviorState::Chase);
    }

    // ---- Difficulty profiles ----

    #[test]
    fn test_profile_extremes() {
        let tuning = PilotTuning::default();
        let easy = DifficultyProfile::new(0.0, &tuning);
        let hard = DifficultyProfile::new(1.0, &tuning);

        assert_abs_diff_eq!(easy.reaction_delay, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hard.reaction_delay, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(easy.defensive_threshold, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(hard.defensive_threshold, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(easy.lag_distance, 80.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hard.lag_distance, 120.0, epsilon = 1e-12);
        assert_abs_diff_eq!(easy.lead_error_amplitude, 20.0, epsilon = 1e-12);
        assert_eq!(hard.lead_error_amplitude, 0.0);
        assert_abs_diff_eq!(easy.pid_response, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_profile_clamps_difficulty() {
        let tuning = PilotTuning::default();
        assert_eq!(DifficultyProfile::new(3.0, &tuning).difficulty, 1.0);
        assert_eq!(DifficultyProfile::new(-1.0, &tuning).difficulty, 0.0);
        assert_eq!(DifficultyProfile::new(f64::NAN, &tuning).difficulty, 0.5);
    }

    #[test]
    fn test_no_lead_error_for_skilled_pilots() {
        let tuning = PilotTuning::default();
        assert_eq!(DifficultyProfile::new(0.7, &tuning).lead_error_amplitude, 0.0);
        assert!(DifficultyProfile::new(0.69, &tuning).lead_error_amplitude > 0.0);
    }

    // ---- Tactics ----

    #[test]
    fn test_energy_state() {
        assert_abs_diff_eq!(energy_state(28.5, 0.0, 30.0, 12.0), 0.95, epsilon = 1e-12);
        assert_abs_diff_eq!(energy_state(60.0, 6.0, 30.0, 12.0), 0.5, epsilon = 1e-12);
        assert_eq!(energy_state(60.0, -12.0, 30.0, 12.0), 0.0);
        assert_eq!(energy_state(0.0, 0.0, 30.0, 12.0), 0.0);
    }

    #[test]
    fn test_closing_speed() {
        let closing = closing_speed(
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 50.0),
            DVec3::new(0.0, 0.0, 100.0),
            DVec3::new(0.0, 0.0, 30.0),
        );
        assert_abs_diff_eq!(closing, 20.0, epsilon = 1e-12);
        assert_eq!(closing_speed(DVec3::ZERO, DVec3::X, DVec3::ZERO, DVec3::ZERO), 0.0);
    }

    #[test]
    fn test_defensive_has_priority() {
        let profile = DifficultyProfile::new(0.5, &PilotTuning::default());
        // Close and closing fast, but out of energy.
        assert_eq!(select_mode(&picture(50.0, 0.3, 40.0), &profile), ChaseMode::Defensive);
    }

    #[test]
    fn test_lag_pursuit_selection() {
        let profile = DifficultyProfile::new(0.5, &PilotTuning::default());
        assert_eq!(select_mode(&picture(90.0, 1.0, 20.0), &profile), ChaseMode::LagPursuit);
        // Not closing fast enough.
        assert_eq!(select_mode(&picture(90.0, 1.0, 10.0), &profile), ChaseMode::PurePursuit);

        // Lag threshold grows with difficulty: 110 m is inside for d=1, outside for d=0.4.
        let hard = DifficultyProfile::new(1.0, &PilotTuning::default());
        let middling = DifficultyProfile::new(0.4, &PilotTuning::default());
        assert_eq!(select_mode(&picture(110.0, 1.0, 20.0), &hard), ChaseMode::LagPursuit);
        assert_eq!(select_mode(&picture(110.0, 1.0, 20.0), &middling), ChaseMode::LeadPursuit);

        // Easy pilots never fly lag pursuit.
        let easy = DifficultyProfile::new(0.3, &PilotTuning::default());
        assert_eq!(select_mode(&picture(60.0, 1.0, 20.0), &easy), ChaseMode::PurePursuit);
    }

    fn any_picture() -> impl Strategy<Value = TacticalPicture> {
        (0.0..500.0f64, 0.0..=1.0f64, -60.0..60.0f64)
            .prop_map(|(distance, energy, closing)| picture(distance, energy, closing))
    }

    proptest! {
        #[test]
        fn test_mode_selection_is_deterministic(p in any_picture(), difficulty in 0.0..=1.0f64) {
            let tuning = PilotTuning::default();
            let first = select_mode(&p, &DifficultyProfile::new(difficulty, &tuning));
            let copy = picture(p.distance, p.energy, p.closing_speed);
            let second = select_mode(&copy, &DifficultyProfile::new(difficulty, &tuning));
            prop_assert_eq!(first, second);

            let profile = DifficultyProfile::new(difficulty, &tuning);
            if p.energy < profile.defensive_threshold {
                prop_assert_eq!(first, ChaseMode::Defensive);
            }
        }

        #[test]
        fn test_tactics_replay_identically(
            difficulty in 0.0..=1.0f64,
            history in prop::collection::vec((0.0..0.5f64, any_picture()), 1..80),
        ) {
            let profile = DifficultyProfile::new(difficulty, &PilotTuning::default());
            let mut a = CombatTactics::new();
            let mut b = CombatTactics::new();
            a.enter_chase();
            b.enter_chase();
            let mut now = 0.0;
            for (step, p) in &history {
                now += step;
                let change = a.update(now, p, &profile);
                prop_assert_eq!(change, b.update(now, p, &profile));
                if let Some(change) = change {
                    prop_assert_eq!(change.to, select_mode(p, &profile));
                    prop_assert_ne!(change.from, change.to);
                }
                prop_assert_eq!(a.mode(), b.mode());
            }
        }
    }

    #[test]
    fn test_lead_pursuit_band() {
        let profile = DifficultyProfile::new(0.5, &PilotTuning::default());
        assert_eq!(select_mode(&picture(200.0, 1.0, 0.0), &profile), ChaseMode::LeadPursuit);
        assert_eq!(select_mode(&picture(100.0, 1.0, 0.0), &profile), ChaseMode::PurePursuit);
        assert_eq!(select_mode(&picture(300.0, 1.0, 0.0), &profile), ChaseMode::PurePursuit);

        let easy = DifficultyProfile::new(0.2, &PilotTuning::default());
        assert_eq!(select_mode(&picture(200.0, 1.0, 0.0), &easy), ChaseMode::PurePursuit);
    }

    #[test]
    fn test_reaction_delay_gates_mode_changes() {
        let profile = DifficultyProfile::new(0.5, &PilotTuning::default());
        let mut tactics = CombatTactics::new();

        let change = tactics.update(1.0, &picture(200.0, 1.0, 0.0), &profile).unwrap();
        assert_eq!(change.from, ChaseMode::PurePursuit);
        assert_eq!(change.to, ChaseMode::LeadPursuit);
        assert_eq!(tactics.last_mode_change_time(), 1.0);
        assert_abs_diff_eq!(tactics.next_reaction_time(), 1.6, epsilon = 1e-12);

        // Too soon: the defensive picture is ignored.
        assert!(tactics.update(1.5, &picture(200.0, 0.1, 0.0), &profile).is_none());
        assert_eq!(tactics.mode(), ChaseMode::LeadPursuit);

        let change = tactics.update(1.7, &picture(200.0, 0.1, 0.0), &profile).unwrap();
        assert_eq!(change.to, ChaseMode::Defensive);
    }

    #[test]
    fn test_enter_chase_resets_mode_keeps_timer() {
        let profile = DifficultyProfile::new(0.5, &PilotTuning::default());
        let mut tactics = CombatTactics::new();
        tactics.update(1.0, &picture(200.0, 1.0, 0.0), &profile);
        tactics.enter_chase();
        assert_eq!(tactics.mode(), ChaseMode::PurePursuit);
        assert_abs_diff_eq!(tactics.next_reaction_time(), 1.6, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_lead_point_for_skilled_pilot() {
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(0.8, &tuning);
        let target = track(DVec3::new(0.0, 100.0, 200.0), DVec3::new(10.0, 0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let point = lead_point(&target, 150.0, &profile, &tuning, &mut rng);
        let lead_time = 1.5 * (0.2 + 1.3 * 0.8) * 0.5;
        assert_abs_diff_eq!(point.x, 10.0 * lead_time, epsilon = 1e-9);
        assert_eq!(point.y, 100.0);
        assert_eq!(point.z, 200.0);
    }

    #[test]
    fn test_lead_error_bounded_and_reproducible() {
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(0.0, &tuning);
        let target = track(DVec3::new(0.0, 100.0, 200.0), DVec3::ZERO);
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..100 {
            let p = lead_point(&target, 150.0, &profile, &tuning, &mut a);
            let q = lead_point(&target, 150.0, &profile, &tuning, &mut b);
            assert_eq!(p, q);
            assert!(p.x.abs() <= 20.0);
            assert!((p.y - 100.0).abs() <= 10.0);
            assert!((p.z - 200.0).abs() <= 20.0);
        }
    }

    #[test]
    fn test_lag_point_behind_target() {
        let target = track(DVec3::new(0.0, 100.0, 0.0), DVec3::new(0.0, 0.0, 40.0));
        assert_eq!(lag_point(&target, 80.0), DVec3::new(0.0, 100.0, -80.0));

        let parked = TargetTrack {
            position: DVec3::new(0.0, 100.0, 0.0),
            velocity: DVec3::ZERO,
            forward: DVec3::X,
        };
        assert_eq!(lag_point(&parked, 80.0), DVec3::new(-80.0, 100.0, 0.0));
    }

    #[test]
    fn test_defensive_aim_point() {
        let own = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);
        let target = track(DVec3::new(0.0, 200.0, 50.0), DVec3::ZERO);
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(0.5, &tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let aim = combat_aim(
            ChaseMode::Defensive,
            &own,
            &target,
            &picture(50.0, 0.2, 0.0),
            &profile,
            &tuning,
            &mut rng,
        );
        assert_abs_diff_eq!(aim.aim_point.y, 280.0, epsilon = 1e-9);
        assert_abs_diff_eq!(aim.aim_point.z, 150.0, epsilon = 1e-9);
        assert_eq!(aim.thrust, 1.0);
        assert_eq!((aim.bank_limiter, aim.pitch_limiter), (0.5, 0.8));
    }

    // ---- Attitude translation ----

    #[test]
    fn test_attitude_measurements() {
        let level = RigidBodyState::default();
        assert_abs_diff_eq!(bank_angle_deg(&level), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pitch_angle_deg(&level), 0.0, epsilon = 1e-12);

        // Right wing down reads as negative bank.
        let rolled = RigidBodyState {
            orientation: glam::DQuat::from_axis_angle(
                wingman_core::types::ROLL_AXIS,
                30f64.to_radians(),
            ),
            ..Default::default()
        };
        assert_abs_diff_eq!(bank_angle_deg(&rolled), -30.0, epsilon = 1e-9);

        let right = heading_error_deg(&level, DVec3::new(100.0, 0.0, 100.0));
        assert_abs_diff_eq!(right, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_translate_turns_toward_aim() {
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(1.0, &tuning);
        let mut translator = AttitudeTranslator::new(&tuning);
        let state = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);

        // Up and to the right.
        let command = AttitudeCommand::cruise(DVec3::new(200.0, 260.0, 200.0), 0.7);
        let inputs = translator
            .translate(&state, &command, &profile, &tuning, 1.0 / 60.0)
            .unwrap();
        assert!(inputs.pitch > 0.0, "pitch up toward a higher aim point");
        assert!(inputs.roll > 0.0, "roll right toward an aim point on the right");
        assert!(inputs.yaw > 0.0, "yaw right toward an aim point on the right");
        assert_eq!(inputs.thrust, 0.7);
    }

    #[test]
    fn test_bank_target_limited_by_energy() {
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(1.0, &tuning);
        let state = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);
        let mut command = AttitudeCommand::cruise(DVec3::new(200.0, 200.0, 0.0), 0.9);

        let errors = attitude_errors(&state, &command, &profile, &tuning).unwrap();
        // 90 degrees right * 0.8 = 72, clamped to 45.
        assert_abs_diff_eq!(errors.desired_bank_deg, -45.0, epsilon = 1e-9);

        command.energy = 0.5;
        let errors = attitude_errors(&state, &command, &profile, &tuning).unwrap();
        assert_abs_diff_eq!(errors.desired_bank_deg, -22.5, epsilon = 1e-9);

        command.energy = 0.0;
        let errors = attitude_errors(&state, &command, &profile, &tuning).unwrap();
        assert_abs_diff_eq!(errors.desired_bank_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aim_on_top_of_aircraft_gives_no_command() {
        let tuning = PilotTuning::default();
        let profile = DifficultyProfile::new(0.5, &tuning);
        let mut translator = AttitudeTranslator::new(&tuning);
        let state = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);
        let command = AttitudeCommand::cruise(DVec3::new(0.0, 200.05, 0.0), 0.7);
        assert!(translator
            .translate(&state, &command, &profile, &tuning, 0.02)
            .is_none());
    }

    // ---- Pilot brain ----

    #[test]
    fn test_new_pilot_patrols_first_waypoint() {
        let pilot = brain(0.5);
        assert_eq!(pilot.state(), BehaviorState::Patrol);
        assert_eq!(pilot.aim(), AimReference::Waypoint(0));
        assert_eq!(pilot.chase_mode(), None);
        let command = pilot.command().unwrap();
        assert_eq!(command.aim_point, DVec3::new(0.0, 200.0, 0.0));
        assert_eq!(command.thrust, 0.7);
    }

    #[test]
    fn test_patrol_advances_in_one_frame() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(0.0, 200.0, 5.0), 90.0, 40.0);
        let events = update(&mut pilot, 0.0, &body, None);

        assert_eq!(pilot.waypoint_index(), 1);
        assert_eq!(pilot.aim(), AimReference::Waypoint(1));
        assert_eq!(events, vec![PilotEvent::TargetSwitched(AimReference::Waypoint(1))]);
        assert_eq!(pilot.command().unwrap().aim_point, DVec3::new(1000.0, 200.0, 0.0));
    }

    #[test]
    fn test_patrol_wraps_around() {
        let mut pilot = brain(0.5);
        let waypoints = route().waypoints;
        for (i, wp) in waypoints.iter().enumerate() {
            let body = flying(*wp, 0.0, 40.0);
            update(&mut pilot, i as f64, &body, None);
        }
        assert_eq!(pilot.waypoint_index(), 0);
        assert_eq!(pilot.aim(), AimReference::Waypoint(0));
    }

    #[test]
    fn test_far_waypoint_is_not_reached() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(0.0, 200.0, 50.0), 0.0, 40.0);
        let events = update(&mut pilot, 0.0, &body, None);
        assert!(events.is_empty());
        assert_eq!(pilot.waypoint_index(), 0);
    }

    #[test]
    fn test_leg_progress() {
        let origin = DVec3::new(0.0, 200.0, 0.0);
        let waypoint = DVec3::new(100.0, 200.0, 0.0);
        assert_abs_diff_eq!(
            leg_progress(origin, waypoint, DVec3::new(50.0, 500.0, 30.0)).unwrap(),
            0.5,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            leg_progress(origin, waypoint, DVec3::new(120.0, 0.0, -40.0)).unwrap(),
            1.2,
            epsilon = 1e-12
        );
        // Purely vertical leg.
        assert_eq!(leg_progress(origin, DVec3::new(0.0, 300.0, 0.0), origin), None);
    }

    #[test]
    fn test_overflown_waypoint_counts_as_reached() {
        let mut pilot = brain(0.5);
        let start = flying(DVec3::new(0.0, 200.0, -300.0), 0.0, 40.0);
        assert!(update(&mut pilot, 0.0, &start, None).is_empty());

        // 30 m abeam, short of the waypoint: still inbound.
        let short = flying(DVec3::new(30.0, 200.0, -15.0), 0.0, 40.0);
        assert!(update(&mut pilot, 1.0, &short, None).is_empty());
        assert_eq!(pilot.waypoint_index(), 0);

        // 30 m abeam, past the waypoint: it was missed, move on.
        let past = flying(DVec3::new(30.0, 180.0, 15.0), 0.0, 40.0);
        let events = update(&mut pilot, 2.0, &past, None);
        assert_eq!(events, vec![PilotEvent::TargetSwitched(AimReference::Waypoint(1))]);

        // The next leg starts where the switch happened.
        assert!(update(&mut pilot, 3.0, &past, None).is_empty());
        assert_eq!(pilot.waypoint_index(), 1);
    }

    #[test]
    fn test_overflown_home_ends_return_to_base() {
        let mut pilot = brain(0.5);
        pilot.on_low_health();
        let start = flying(DVec3::new(-500.0, 150.0, -800.0), 0.0, 40.0);
        update(&mut pilot, 0.0, &start, None);
        assert_eq!(pilot.state(), BehaviorState::ReturnToBase);

        let past = flying(DVec3::new(-460.0, 150.0, -480.0), 0.0, 40.0);
        update(&mut pilot, 1.0, &past, None);
        assert_eq!(pilot.state(), BehaviorState::Patrol);
        assert_eq!(pilot.aim(), AimReference::Waypoint(0));
    }

    #[test]
    fn test_see_player_chases_in_one_frame() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(500.0, 200.0, 500.0), 0.0, 50.0);
        let target = track(DVec3::new(500.0, 200.0, 650.0), DVec3::new(0.0, 0.0, 40.0));
        let events = update(&mut pilot, 0.0, &body, Some(&target));

        assert_eq!(pilot.state(), BehaviorState::Chase);
        assert_eq!(pilot.aim(), AimReference::Target);
        assert_eq!(pilot.chase_mode(), Some(ChaseMode::PurePursuit));
        assert_eq!(pilot.command().unwrap().aim_point, target.position);
        assert_eq!(pilot.command().unwrap().thrust, 0.9);
        assert!(events.iter().any(|e| matches!(
            e,
            PilotEvent::Transition(t) if t.trigger == BehaviorTrigger::SeePlayer
                && t.to == BehaviorState::Chase
        )));
    }

    #[test]
    fn test_chase_picks_lead_pursuit() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(500.0, 200.0, 500.0), 0.0, 50.0);
        let target = track(DVec3::new(500.0, 200.0, 650.0), DVec3::new(0.0, 0.0, 40.0));
        update(&mut pilot, 0.0, &body, Some(&target));

        let events = update(&mut pilot, 1.0 / 60.0, &body, Some(&target));
        assert_eq!(pilot.chase_mode(), Some(ChaseMode::LeadPursuit));
        assert!(events.contains(&PilotEvent::ChaseModeChanged(ModeChange {
            from: ChaseMode::PurePursuit,
            to: ChaseMode::LeadPursuit,
        })));
        assert_eq!(pilot.command().unwrap().thrust, 0.85);
    }

    #[test]
    fn test_target_below_floor_is_lost() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(500.0, 200.0, 500.0), 0.0, 50.0);
        let target = track(DVec3::new(500.0, 200.0, 650.0), DVec3::ZERO);
        update(&mut pilot, 0.0, &body, Some(&target));
        assert_eq!(pilot.state(), BehaviorState::Chase);

        // Still close, but low.
        let low = track(DVec3::new(500.0, 40.0, 550.0), DVec3::ZERO);
        update(&mut pilot, 0.1, &body, Some(&low));
        assert_eq!(pilot.state(), BehaviorState::Patrol);
        assert_eq!(pilot.aim(), AimReference::Waypoint(0));
        assert_eq!(pilot.chase_mode(), None);

        // A low target is never acquired.
        update(&mut pilot, 0.2, &body, Some(&low));
        assert_eq!(pilot.state(), BehaviorState::Patrol);
    }

    #[test]
    fn test_target_out_of_range_is_lost() {
        let mut pilot = brain(0.5);
        let body = flying(DVec3::new(500.0, 200.0, 500.0), 0.0, 50.0);
        let target = track(DVec3::new(500.0, 200.0, 650.0), DVec3::ZERO);
        update(&mut pilot, 0.0, &body, Some(&target));

        let far = track(DVec3::new(500.0, 200.0, 1000.0), DVec3::ZERO);
        let events = update(&mut pilot, 0.1, &body, Some(&far));
        assert_eq!(pilot.state(), BehaviorState::Patrol);
        assert!(events.contains(&PilotEvent::TargetSwitched(AimReference::Waypoint(0))));
    }

    #[test]
    fn test_low_health_returns_home_then_patrols() {
        let mut pilot = brain(0.5);
        let events = pilot.on_low_health();
        assert_eq!(pilot.state(), BehaviorState::ReturnToBase);
        assert_eq!(pilot.aim(), AimReference::Home);
        assert!(events.contains(&PilotEvent::TargetSwitched(AimReference::Home)));
        assert_eq!(
            pilot.command().unwrap().aim_point,
            DVec3::new(-500.0, 150.0, -500.0)
        );

        let body = flying(DVec3::new(-500.0, 150.0, -495.0), 0.0, 40.0);
        update(&mut pilot, 1.0, &body, None);
        assert_eq!(pilot.state(), BehaviorState::Patrol);
        assert_eq!(pilot.aim(), AimReference::Waypoint(0));
    }

    #[test]
    fn test_return_to_base_can_reengage() {
        let mut pilot = brain(0.5);
        pilot.on_low_health();
        let body = flying(DVec3::new(500.0, 200.0, 500.0), 0.0, 50.0);
        let target = track(DVec3::new(500.0, 200.0, 650.0), DVec3::ZERO);
        update(&mut pilot, 0.0, &body, Some(&target));
        assert_eq!(pilot.state(), BehaviorState::Chase);
    }

    #[test]
    fn test_dead_pilot_stops() {
        let mut pilot = brain(0.5);
        let events = pilot.on_died();
        assert_eq!(events.len(), 1);
        assert!(pilot.is_dead());
        assert!(pilot.command().is_none());

        let body = flying(DVec3::new(0.0, 200.0, 5.0), 0.0, 40.0);
        let target = track(DVec3::new(0.0, 200.0, 100.0), DVec3::ZERO);
        assert!(update(&mut pilot, 0.0, &body, Some(&target)).is_empty());
        assert!(pilot.control(&body, 0.02).is_none());
        assert!(pilot.on_low_health().is_empty());
        assert_eq!(pilot.state(), BehaviorState::Dead);
    }

    #[test]
    fn test_target_switch_resets_pids() {
        let tuning = PilotTuning {
            pitch_pid: PidGains::new(0.8, 1.0, 0.0),
            ..Default::default()
        };
        let mut pilot = PilotBrain::new(route(), 0.5, tuning, 3);
        // Waypoint 0 is far above: pitch error accumulates.
        let body = flying(DVec3::new(0.0, 100.0, -200.0), 0.0, 40.0);
        for _ in 0..10 {
            pilot.control(&body, 0.02);
        }
        assert!(pilot.translator().pids()[0].integral() > 0.0);

        let at_waypoint = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);
        update(&mut pilot, 0.0, &at_waypoint, None);
        assert_eq!(pilot.translator().pids()[0].integral(), 0.0);
    }

    #[test]
    fn test_empty_route_holds() {
        let mut pilot = PilotBrain::new(PatrolRoute::default(), 0.5, PilotTuning::default(), 0);
        assert_eq!(pilot.aim(), AimReference::None);
        assert!(pilot.command().is_none());
        let body = flying(DVec3::new(0.0, 200.0, 0.0), 0.0, 40.0);
        assert!(update(&mut pilot, 0.0, &body, None).is_empty());
        assert!(pilot.control(&body, 0.02).is_none());
    }
}
