//! Session configuration
//!
//! The game variants (single-hit vs. lives, breath timer on/off, session
//! length) are options on one core rather than separate builds.
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{Storage, load_json, save_json};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Session length in seconds
    pub game_duration: f64,
    /// Maximum continuous dive in seconds (None = unlimited breath)
    pub breath_limit: Option<f64>,
    /// Enemy contacts allowed before game over (1 = single hit)
    pub lives: u8,
    /// Seconds added to the clock per released catch
    pub catch_time_bonus: f64,
    /// Pool size at game start/reset
    pub initial_entities: usize,
    /// Fish spawned per released catch (inclusive range)
    pub replacement_fish_min: usize,
    pub replacement_fish_max: usize,
    /// Chance of one extra enemy per released catch (0.0 - 1.0)
    pub replacement_enemy_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_duration: GAME_DURATION,
            breath_limit: Some(BREATH_DURATION),
            lives: 1,
            catch_time_bonus: CATCH_TIME_BONUS,
            initial_entities: INITIAL_ENTITIES,
            replacement_fish_min: 1,
            replacement_fish_max: 3,
            replacement_enemy_chance: 0.5,
        }
    }
}

impl GameConfig {
    /// Variant with three lives and no breath limit
    pub fn relaxed() -> Self {
        Self {
            lives: 3,
            breath_limit: None,
            ..Self::default()
        }
    }

    /// Fix out-of-range values instead of rejecting them
    pub fn normalized(mut self) -> Self {
        self.lives = self.lives.max(1);
        self.game_duration = self.game_duration.max(0.0);
        self.catch_time_bonus = self.catch_time_bonus.max(0.0);
        self.breath_limit = self.breath_limit.map(|b| b.max(0.0));
        if self.replacement_fish_max < self.replacement_fish_min {
            self.replacement_fish_max = self.replacement_fish_min;
        }
        self.replacement_enemy_chance = if self.replacement_enemy_chance.is_nan() {
            0.0
        } else {
            self.replacement_enemy_chance.clamp(0.0, 1.0)
        };
        self
    }

    /// Storage key
    const STORAGE_KEY: &'static str = "plummet_config";

    /// Load from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<GameConfig>(storage, Self::STORAGE_KEY) {
            Ok(Some(config)) => {
                log::info!("Loaded game config from storage");
                config.normalized()
            }
            Ok(None) => {
                log::info!("Using default game config");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read game config ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Game config saved"),
            Err(e) => log::warn!("Could not save game config: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_normalized_fixes_bad_values() {
        let config = GameConfig {
            lives: 0,
            game_duration: -5.0,
            breath_limit: Some(-1.0),
            replacement_fish_min: 4,
            replacement_fish_max: 2,
            replacement_enemy_chance: 3.0,
            ..GameConfig::default()
        }
        .normalized();

        assert_eq!(config.lives, 1);
        assert_eq!(config.game_duration, 0.0);
        assert_eq!(config.breath_limit, Some(0.0));
        assert_eq!(config.replacement_fish_max, 4);
        assert_eq!(config.replacement_enemy_chance, 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("plummet_config", r#"{"lives": 3, "breath_limit": null}"#)
            .unwrap();
        let config = GameConfig::load(&storage);
        assert_eq!(config.lives, 3);
        assert_eq!(config.breath_limit, None);
        assert_eq!(config.game_duration, GAME_DURATION);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut storage = MemoryStorage::new();
        GameConfig::relaxed().save(&mut storage);
        assert_eq!(GameConfig::load(&storage), GameConfig::relaxed());
    }
}
