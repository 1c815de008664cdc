//! Timed command scripts.
//!
//! A script is a JSON array of `{ "at": seconds, "command": {...} }`
//! entries. `at` is measured on the run clock (frames × frame time), so a
//! scripted `Resume` still fires after a scripted `Pause`.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wingman_core::commands::PlayerCommand;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCommand {
    /// Run-clock time (s) at which the command is queued.
    pub at: f64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, Default)]
pub struct CommandScript {
    pending: VecDeque<ScheduledCommand>,
}

impl CommandScript {
    /// Entries are ordered by time; equal times keep file order.
    pub fn new(mut commands: Vec<ScheduledCommand>) -> Self {
        commands.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            pending: commands.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let commands: Vec<ScheduledCommand> = serde_json::from_str(json)?;
        Ok(Self::new(commands))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::ScriptIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop every command due at or before `now`.
    pub fn due(&mut self, now: f64) -> Vec<PlayerCommand> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|c| c.at <= now) {
            if let Some(entry) = self.pending.pop_front() {
                due.push(entry.command);
            }
        }
        due
    }
}
