//! Read model for presentation
//!
//! Everything a frontend needs to draw one frame, computed from the state
//! at a given time. Presentation never writes back through this.

use glam::Vec2;
use serde::Serialize;

use super::state::{ControlMode, GamePhase, GameState, Player};

/// One fish or enemy as drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub pos: Vec2,
    pub vx: f32,
    pub glyph: &'static str,
    pub enemy: bool,
    pub held: bool,
}

/// Frame snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub control_mode: Option<ControlMode>,
    pub player: Player,
    pub entities: Vec<EntityView>,
    pub ocean_level: f32,
    pub score: f64,
    /// Seconds left in the run (None outside a run)
    pub remaining_time: Option<f64>,
    /// Seconds of air left (None when surfaced or breath is unlimited)
    pub remaining_breath: Option<f64>,
    /// Breath meter fill, 0.0 (fresh) to 1.0 (out of air)
    pub breath_ratio: f64,
    pub lives: u8,
    pub end_reason: Option<String>,
    pub high_score: Option<f64>,
    pub debug: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState, now: f64, high_score: Option<f64>) -> Self {
        let held = state.caught.map(|c| c.fish_id);
        let entities = state
            .entities
            .iter()
            .map(|e| EntityView {
                id: e.id,
                pos: e.pos,
                vx: e.vel.x,
                glyph: e.icon.glyph(),
                enemy: e.is_enemy(),
                held: Some(e.id) == held,
            })
            .collect();

        let remaining_time = state
            .game_start
            .map(|start| (state.config.game_duration - (now - start)).max(0.0));

        let dive = state.dive_start.zip(state.config.breath_limit);
        let remaining_breath = dive.map(|(start, limit)| (limit - (now - start)).max(0.0));
        let breath_ratio = match dive {
            Some((start, limit)) if limit > 0.0 => ((now - start) / limit).clamp(0.0, 1.0),
            Some(_) => 1.0,
            None => 0.0,
        };

        Self {
            phase: state.phase,
            control_mode: state.control_mode,
            player: state.player,
            entities,
            ocean_level: state.ocean_level(),
            score: state.score,
            remaining_time,
            remaining_breath,
            breath_ratio,
            lives: state.lives,
            end_reason: state.end_reason.map(|r| r.to_string()),
            high_score,
            debug: state.debug,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
