//! Plummet - a diving-bird arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion, catches, game phases)
//! - `input`: Live key/press tracking
//! - `config`: Session configuration (lives, breath, duration)
//! - `highscore`: Best score, loaded once and saved on a new best
//! - `persistence`: Key-value storage backends for scores and config
//! - `platform`: Browser/native clock and seed sources
//! - `game`: Driver tying the above together one frame at a time

pub mod config;
pub mod game;
pub mod highscore;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use game::Game;
pub use highscore::HighScore;
pub use input::{InputState, Key};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Player glyph size in pixels; also the capture radius
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Lowest coordinate the player may reach on either axis
    pub const MIN_COORD: f32 = PLAYER_SIZE / 2.0;

    /// Ocean surface as a fraction of viewport height (measured from the bottom)
    pub const OCEAN_LEVEL_FRACTION: f32 = 0.4;

    /// Horizontal speed applied when a dive begins (pixels/frame)
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Multiplicative drag applied to vx each frame
    pub const FRICTION_COEFFICIENT: f32 = 1.0 - 1.0 / 100.0;
    pub const GRAVITY_ACCELERATION: f32 = 1.0 / 5.0;
    /// Vertical speed while gliding (upward) or diving (downward)
    pub const GLIDE_SPEED: f32 = 30.0 * GRAVITY_ACCELERATION;
    /// Velocity clamp on both axes
    pub const MAX_PLAYER_VELOCITY: f32 = 10.0;

    /// Tolerance around the screen center for press-to-dive direction
    pub const MIDDLE_TAP_REGION: f32 = 20.0;

    /// Fish wave path: baseline and amplitude as fractions of viewport height
    pub const FISH_WAVE_BASELINE: f32 = 0.1;
    pub const FISH_WAVE_AMPLITUDE: f32 = 0.02;
    /// Spawned fish horizontal speed magnitude range
    pub const FISH_MIN_SPEED: f32 = 0.25;
    pub const FISH_MAX_SPEED: f32 = 2.0;
    /// Fish wave period modifier range
    pub const FISH_MIN_WAVE: f32 = 5.0;
    pub const FISH_MAX_WAVE: f32 = 10.0;

    /// Default session length (seconds)
    pub const GAME_DURATION: f64 = 30.0;
    /// Default breath limit (seconds)
    pub const BREATH_DURATION: f64 = 3.0;
    /// Clock extension awarded per released catch (seconds)
    pub const CATCH_TIME_BONUS: f64 = 1.0;

    pub const INITIAL_ENTITIES: usize = 10;
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(min: f32, max: f32, value: f32) -> f32 {
    value.max(min).min(max)
}

/// Euclidean distance between two points
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Pick a uniformly random element (None if empty)
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clamp_cases() {
        // min, max, value, expected
        let cases = [
            (0.0, 1000.0, 100.0, 100.0),
            (0.0, 1000.0, 1001.0, 1000.0),
            (0.0, 1000.0, -100.0, 0.0),
        ];
        for (min, max, value, expected) in cases {
            assert_eq!(clamp(min, max, value), expected);
        }
    }

    #[test]
    fn test_dist() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((dist(a, b) - 5.0).abs() < 1e-6);
        assert_eq!(dist(a, a), 0.0);
    }

    #[test]
    fn test_pick() {
        let mut rng = Pcg32::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());

        let items = [1, 2, 3];
        for _ in 0..50 {
            let v = pick(&mut rng, &items).copied();
            assert!(matches!(v, Some(1..=3)));
        }
    }
}
