//! Entity generator
//!
//! New fish and enemies enter at a random x, somewhere in the ocean band,
//! gliding sideways in a random direction.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, GameState, Icon, SpawnClass, Viewport};
use crate::consts::*;
use crate::pick;

/// Build one random entity of the given class
pub fn random_entity<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    viewport: Viewport,
    class: SpawnClass,
) -> Entity {
    let magnitude = rng.random_range(FISH_MIN_SPEED..FISH_MAX_SPEED);
    let vx = if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    };

    Entity {
        id,
        pos: Vec2::new(
            rng.random::<f32>() * viewport.width,
            rng.random::<f32>() * viewport.ocean_level(),
        ),
        vel: Vec2::new(vx, 0.0),
        // Icon pools are never empty
        icon: pick(rng, Icon::pool(class)).copied().unwrap_or(Icon::Fish),
        speed: rng.random_range(FISH_MIN_WAVE..FISH_MAX_WAVE),
    }
}

/// Add `count` new entities of `class` to the pool
pub fn spawn_entities(state: &mut GameState, count: usize, class: SpawnClass) {
    for _ in 0..count {
        let id = state.next_entity_id();
        let entity = random_entity(&mut state.rng, id, state.viewport, class);
        state.entities.push(entity);
    }
}

/// Refill after a released catch: a few fish, maybe one enemy
pub fn spawn_replacements(state: &mut GameState) -> usize {
    let min = state.config.replacement_fish_min;
    let max = state.config.replacement_fish_max.max(min);
    let fish = state.rng.random_range(min..=max);
    let enemies = usize::from(state.rng.random::<f64>() < state.config.replacement_enemy_chance);

    spawn_entities(state, fish, SpawnClass::Fish);
    spawn_entities(state, enemies, SpawnClass::Enemy);

    log::debug!("Spawned {fish} fish and {enemies} enemies");
    fish + enemies
}
