//! Run loop: steps the simulation engine frame by frame and hands each
//! snapshot to a sink.
//!
//! Unpaced runs go as fast as the CPU allows. Paced runs sleep to match
//! wall-clock time, adjusted for the engine's time scale, and reset the
//! schedule when they fall too far behind instead of catching up.

use std::time::{Duration, Instant};

use serde::Serialize;
use wingman_core::events::SimEvent;
use wingman_core::state::SimSnapshot;
use wingman_sim::SimulationEngine;

use crate::error::AppError;
use crate::script::CommandScript;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Run-clock length of the run (s).
    pub duration_secs: f64,
    /// Frames per run-clock second.
    pub frame_rate: u32,
    /// Sleep between frames to track wall-clock time.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            duration_secs: 30.0,
            frame_rate: 60,
            realtime: false,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.frame_rate == 0 {
            return Err(AppError::Options("frame rate must be positive".into()));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(AppError::Options(format!(
                "duration {} must be a non-negative number of seconds",
                self.duration_secs
            )));
        }
        Ok(())
    }

    pub fn frame_dt(&self) -> f64 {
        1.0 / self.frame_rate.max(1) as f64
    }

    /// Whole frames needed to cover the duration.
    pub fn frame_count(&self) -> u64 {
        (self.duration_secs * self.frame_rate as f64).ceil() as u64
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub physics_ticks: u64,
    /// Simulated seconds (time-scaled).
    pub sim_secs: f64,
    pub commands: usize,
    pub events: usize,
    pub aircraft_destroyed: usize,
    pub wrecks_exploded: usize,
    pub ground_units_destroyed: usize,
}

impl RunSummary {
    fn record(&mut self, events: &[SimEvent]) {
        self.events += events.len();
        for event in events {
            match event {
                SimEvent::AircraftDestroyed { .. } => self.aircraft_destroyed += 1,
                SimEvent::WreckExploded { .. } => self.wrecks_exploded += 1,
                SimEvent::GroundUnitDestroyed { .. } => self.ground_units_destroyed += 1,
                _ => {}
            }
        }
    }
}

/// Run `engine` for `options.duration_secs`, feeding `script` commands as
/// they fall due. `on_snapshot` sees every frame; its error ends the run.
pub fn run<F>(
    engine: &mut SimulationEngine,
    script: &mut CommandScript,
    options: &RunOptions,
    mut on_snapshot: F,
) -> Result<RunSummary, AppError>
where
    F: FnMut(&SimSnapshot) -> Result<(), AppError>,
{
    options.validate()?;

    let frame_dt = options.frame_dt();
    let frame_duration = Duration::from_secs_f64(frame_dt);
    let mut summary = RunSummary::default();
    let mut next_frame_time = Instant::now();

    for frame in 0..options.frame_count() {
        // 1. Queue scripted commands that are due
        let due = script.due(frame as f64 * frame_dt);
        summary.commands += due.len();
        engine.queue_commands(due);

        // 2. Advance one frame (the engine handles pause and time scale)
        let snapshot = engine.advance(frame_dt);
        summary.record(&snapshot.events);
        summary.frames += 1;

        // 3. Hand the snapshot to the sink
        on_snapshot(&snapshot)?;

        // 4. Sleep until the next frame when pacing to wall-clock time
        if options.realtime {
            let time_scale = engine.time_scale();
            let effective = if time_scale > 0.001 {
                frame_duration.div_f64(time_scale)
            } else {
                frame_duration
            };

            next_frame_time += effective;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > effective * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_frame_time = now;
            }
        }
    }

    let time = engine.time();
    summary.physics_ticks = time.physics_tick;
    summary.sim_secs = time.elapsed_secs;
    Ok(summary)
}
