//! Behavior finite state machine.
//!
//! The transition table is a pure function; `BehaviorMachine` holds the
//! current state and logs every trigger.

use serde::{Deserialize, Serialize};
use wingman_core::enums::{BehaviorState, BehaviorTrigger};

/// Destination state for `trigger` fired in `state`, or `None` when the
/// pair is not handled.
pub fn next_state(state: BehaviorState, trigger: BehaviorTrigger) -> Option<BehaviorState> {
    use BehaviorState::*;
    use BehaviorTrigger::*;

    match (state, trigger) {
        // Terminal
        (Dead, _) => None,
        (_, Died) => Some(Dead),

        (Patrol, SeePlayer) => Some(Chase),
        (Patrol, LosePlayer) => Some(Patrol),
        (Patrol, LowHealth) => Some(ReturnToBase),

        (Chase, LosePlayer) => Some(Patrol),
        (Chase, LowHealth) => Some(ReturnToBase),

        (ReturnToBase, SeePlayer) => Some(Chase),
        (ReturnToBase, ReachedBase) => Some(Patrol),

        _ => None,
    }
}

/// A taken transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: BehaviorState,
    pub to: BehaviorState,
    pub trigger: BehaviorTrigger,
}

#[derive(Debug, Clone, Default)]
pub struct BehaviorMachine {
    state: BehaviorState,
}

impl BehaviorMachine {
    /// Starts in PATROL.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == BehaviorState::Dead
    }

    /// Apply `trigger`. Unhandled pairs leave the state alone.
    pub fn fire(&mut self, trigger: BehaviorTrigger) -> Option<Transition> {
        let from = self.state;
        match next_state(from, trigger) {
            Some(to) => {
                tracing::info!(?from, ?to, ?trigger, "behavior transition");
                self.state = to;
                Some(Transition { from, to, trigger })
            }
            None => {
                tracing::debug!(state = ?from, ?trigger, "trigger ignored");
                None
            }
        }
    }
}
