//! Game-phase state machine
//!
//! `Idle -> Running` on start, `Running -> Running` on score,
//! `Running -> PostGame` on end, and back to `Idle` on reset. Anything
//! else is ignored rather than treated as an error.

use super::spawn::spawn_entities;
use super::state::{ControlMode, EndReason, GamePhase, GameState, SpawnClass};

/// Phase events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEvent {
    Start { mode: ControlMode, now: f64 },
    Score { value: f64 },
    End { reason: EndReason },
    /// Full restart to the launch screen
    Reset,
}

/// What an event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Started(ControlMode),
    Scored(f64),
    Ended { reason: EndReason, score: f64 },
    Reset,
    /// Event not valid in the current phase; state untouched
    Ignored,
}

/// Apply a phase event to the state
pub fn apply(state: &mut GameState, event: PhaseEvent) -> Transition {
    match (state.phase, event) {
        (GamePhase::Idle, PhaseEvent::Start { mode, now }) => {
            state.phase = GamePhase::Running;
            state.game_start = Some(now);
            state.dive_start = None;
            state.control_mode = Some(mode);
            state.score = 0.0;
            state.end_reason = None;
            state.lives = state.config.lives;
            log::info!("Game started ({mode:?} controls)");
            Transition::Started(mode)
        }

        (GamePhase::Running, PhaseEvent::Score { value }) => {
            state.score += value;
            // Each catch buys a little more time
            if let Some(start) = state.game_start.as_mut() {
                *start += state.config.catch_time_bonus;
            }
            Transition::Scored(value)
        }

        (GamePhase::Running, PhaseEvent::End { reason }) => {
            state.phase = GamePhase::PostGame;
            state.game_start = None;
            state.dive_start = None;
            state.control_mode = None;
            state.caught = None;
            state.end_reason = Some(reason);
            log::info!("Game over: {reason} (score {:.1})", state.score);
            Transition::Ended {
                reason,
                score: state.score,
            }
        }

        (GamePhase::Running | GamePhase::PostGame, PhaseEvent::Reset) => {
            reset(state);
            log::info!("Game reset");
            Transition::Reset
        }

        (phase, event) => {
            log::debug!("Ignoring {event:?} in {phase:?}");
            Transition::Ignored
        }
    }
}

/// Restore every transient value to its launch-screen default
fn reset(state: &mut GameState) {
    state.phase = GamePhase::Idle;
    state.control_mode = None;
    state.game_start = None;
    state.dive_start = None;
    state.score = 0.0;
    state.end_reason = None;
    state.lives = state.config.lives;
    state.caught = None;
    state.reset_player();

    state.entities.clear();
    let count = state.config.initial_entities;
    spawn_entities(state, count, SpawnClass::Any);
}
