//! Per-frame simulation step
//!
//! Core game loop. One call advances the world by one animation frame:
//! entity glide, player motion, control input, contacts and catches, then
//! the breath and session clocks. Velocities are in pixels per frame;
//! clocks are wall-clock seconds supplied by the host.

use glam::Vec2;

use super::collision::scan_proximity;
use super::phase::{PhaseEvent, Transition, apply};
use super::spawn::spawn_replacements;
use super::state::{Catch, ControlMode, EndReason, GamePhase, GameState, Icon, Viewport};
use crate::clamp;
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// A dive key is held
    pub dive: bool,
    /// A left/right key is held
    pub left: bool,
    pub right: bool,
    /// Active pointer/touch press (world coordinates)
    pub press: Option<Vec2>,
    /// First input that should start a session, and with which controls
    pub start: Option<ControlMode>,
    /// Restart / retry
    pub reset: bool,
    pub toggle_debug: bool,
}

/// Advance the game state by one frame
///
/// Returns the phase transitions that happened, in order.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Vec<Transition> {
    let mut transitions = Vec::new();

    if input.toggle_debug {
        state.debug = !state.debug;
        log::info!("Debug overlay: {}", state.debug);
    }

    if input.reset && record(&mut transitions, apply(state, PhaseEvent::Reset)) {
        return transitions;
    }

    if let Some(mode) = input.start {
        if state.phase == GamePhase::Idle {
            record(&mut transitions, apply(state, PhaseEvent::Start { mode, now }));
        }
    }

    // Nothing moves outside a run
    if state.phase != GamePhase::Running {
        return transitions;
    }

    advance_entities(state);
    advance_player(state);
    apply_controls(state, input);
    resolve_contacts(state, &mut transitions);

    if state.phase == GamePhase::Running {
        if let Some(reason) = update_clocks(state, now) {
            record(&mut transitions, apply(state, PhaseEvent::End { reason }));
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();

    transitions
}

/// Functional form of [`tick`]: read the previous snapshot, return the next
pub fn step(state: &GameState, input: &TickInput, now: f64) -> (GameState, Vec<Transition>) {
    let mut next = state.clone();
    let transitions = tick(&mut next, input, now);
    (next, transitions)
}

fn record(transitions: &mut Vec<Transition>, transition: Transition) -> bool {
    if transition == Transition::Ignored {
        return false;
    }
    transitions.push(transition);
    true
}

/// Height of the glide path at `x`
#[inline]
pub fn glide_height(x: f32, speed: f32, viewport_height: f32) -> f32 {
    viewport_height * FISH_WAVE_BASELINE + viewport_height * FISH_WAVE_AMPLITUDE * (x / speed).sin()
}

/// Keep a player position inside its allowed band
pub fn clamp_player_pos(pos: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        clamp(MIN_COORD, viewport.player_max_x(), pos.x),
        clamp(MIN_COORD, viewport.player_max_y(), pos.y),
    )
}

fn clamp_player_vel(vel: Vec2) -> Vec2 {
    Vec2::new(
        clamp(-MAX_PLAYER_VELOCITY, MAX_PLAYER_VELOCITY, vel.x),
        clamp(-MAX_PLAYER_VELOCITY, MAX_PLAYER_VELOCITY, vel.y),
    )
}

/// Free entities glide along their wave and bounce off the side walls
fn advance_entities(state: &mut GameState) {
    let held = state.caught.map(|c| c.fish_id);
    let Viewport { width, height } = state.viewport;

    for entity in state.entities.iter_mut().filter(|e| Some(e.id) != held) {
        entity.pos.x += entity.vel.x;
        if entity.pos.x < 0.0 {
            entity.pos.x = 0.0;
            entity.vel.x = entity.vel.x.abs();
        } else if entity.pos.x > width {
            entity.pos.x = width;
            entity.vel.x = -entity.vel.x.abs();
        }
        entity.pos.y = glide_height(entity.pos.x, entity.speed, height);
    }
}

/// Integrate, then drag and the fixed glide/dive vertical speed
fn advance_player(state: &mut GameState) {
    let viewport = state.viewport;
    let player = &mut state.player;

    player.pos = clamp_player_pos(player.pos + player.vel, viewport);
    player.vel.x *= FRICTION_COEFFICIENT;
    // Floaty dive: constant speed, no accumulation
    player.vel.y = if player.diving {
        -GLIDE_SPEED
    } else {
        GLIDE_SPEED
    };
    player.vel = clamp_player_vel(player.vel);
}

/// Dive input. Direction is only chosen when a dive begins.
fn apply_controls(state: &mut GameState, input: &TickInput) {
    let ocean = state.ocean_level();
    let center = state.viewport.width / 2.0;
    let player = &mut state.player;

    match state.control_mode {
        Some(ControlMode::Keyboard) => {
            if input.dive {
                if !player.diving {
                    if input.left {
                        player.vel.x = -PLAYER_SPEED;
                    } else if input.right {
                        player.vel.x = PLAYER_SPEED;
                    }
                    player.diving = true;
                }
            } else {
                player.diving = false;
            }
        }
        Some(ControlMode::Press) => match input.press {
            Some(press) if press.y < ocean => {
                if !player.diving {
                    player.diving = true;
                    if press.x - MIDDLE_TAP_REGION < center {
                        player.vel.x = -PLAYER_SPEED;
                    } else if press.x + MIDDLE_TAP_REGION > center {
                        player.vel.x = PLAYER_SPEED;
                    }
                }
            }
            // Press in the sky: keep doing whatever we were doing
            Some(_) => {}
            None => {
                player.diving = false;
                player.vel.x = 0.0;
            }
        },
        None => {}
    }
}

/// Enemy contacts, then catch selection, then carry or release
fn resolve_contacts(state: &mut GameState, transitions: &mut Vec<Transition>) {
    let held = state.caught.map(|c| c.fish_id);
    let scan = scan_proximity(state.player.pos, &state.entities, held, PLAYER_SIZE);

    // Enemies win over any catch bookkeeping this frame
    if let Some(enemy) = scan.enemy {
        enemy_contact(state, enemy.icon, transitions);
        return;
    }

    if let Some(fish) = scan.closest_fish {
        log::debug!("Caught fish {} (vx {:.2})", fish.id, fish.vx);
        state.caught = Some(Catch {
            fish_id: fish.id,
            vx_at_catch: fish.vx,
        });
    }

    let Some(catch) = state.caught else {
        return;
    };

    if state.player.pos.y > state.ocean_level() {
        release(state, catch, transitions);
    } else {
        carry(state, catch);
    }
}

fn enemy_contact(state: &mut GameState, icon: Icon, transitions: &mut Vec<Transition>) {
    state.reset_player();
    drop_catch(state);
    state.dive_start = None;
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        let reason = EndReason::Eaten(icon);
        record(transitions, apply(state, PhaseEvent::End { reason }));
    } else {
        log::info!(
            "Bitten by {}, {} lives left",
            icon.display_name(),
            state.lives
        );
    }
}

/// Let go of the held fish without scoring; it swims off at its old speed
fn drop_catch(state: &mut GameState) {
    let Some(catch) = state.caught.take() else {
        return;
    };
    if let Some(fish) = state.entities.iter_mut().find(|e| e.id == catch.fish_id) {
        fish.vel = Vec2::new(catch.vx_at_catch, 0.0);
    }
}

/// Surfaced with a fish: bank it and refill the pool
fn release(state: &mut GameState, catch: Catch, transitions: &mut Vec<Transition>) {
    state.caught = None;

    let Some(index) = state.entities.iter().position(|e| e.id == catch.fish_id) else {
        log::debug!("Held fish {} no longer in pool, nothing to score", catch.fish_id);
        return;
    };
    state.entities.remove(index);

    let value = catch.value();
    record(transitions, apply(state, PhaseEvent::Score { value }));
    let added = spawn_replacements(state);
    log::debug!(
        "Released fish {} for {value:.2} points, {added} entities spawned",
        catch.fish_id
    );
}

/// Still underwater: the fish hangs just under the player
fn carry(state: &mut GameState, catch: Catch) {
    let pos = state.player.pos - Vec2::new(0.0, PLAYER_SIZE);
    match state.entities.iter_mut().find(|e| e.id == catch.fish_id) {
        Some(fish) => {
            fish.pos = pos;
            fish.vel = Vec2::ZERO;
        }
        None => state.caught = None,
    }
}

/// Start/clear the dive timer; report breath or session expiry
fn update_clocks(state: &mut GameState, now: f64) -> Option<EndReason> {
    let y = state.player.pos.y;
    let ocean = state.ocean_level();

    if y < ocean && state.dive_start.is_none() {
        state.dive_start = Some(now);
    } else if y > ocean && state.dive_start.is_some() {
        state.dive_start = None;
    }

    if let (Some(limit), Some(start)) = (state.config.breath_limit, state.dive_start) {
        if now - start >= limit {
            return Some(EndReason::Drowned);
        }
    }

    if let Some(start) = state.game_start {
        if now - start >= state.config.game_duration {
            return Some(EndReason::TimeUp);
        }
    }

    None
}
