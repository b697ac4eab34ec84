//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`GameState`].

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Launch screen, waiting for the first input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; waits for a retry
    PostGame,
}

/// How the player steers; fixed when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Keyboard,
    /// Pointer/touch presses
    Press,
}

/// Which icons a spawn batch may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnClass {
    Fish,
    Enemy,
    Any,
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Blowfish,
    Fish,
    TropicalFish,
    Shrimp,
    Shark,
    Squid,
}

impl Icon {
    pub const FISH: [Icon; 4] = [Icon::Blowfish, Icon::Fish, Icon::TropicalFish, Icon::Shrimp];
    pub const ENEMIES: [Icon; 2] = [Icon::Shark, Icon::Squid];
    pub const ALL: [Icon; 6] = [
        Icon::Blowfish,
        Icon::Fish,
        Icon::TropicalFish,
        Icon::Shrimp,
        Icon::Shark,
        Icon::Squid,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Blowfish => "🐡",
            Icon::Fish => "🐟",
            Icon::TropicalFish => "🐠",
            Icon::Shrimp => "🦐",
            Icon::Shark => "🦈",
            Icon::Squid => "🦑",
        }
    }

    pub fn is_enemy(self) -> bool {
        matches!(self, Icon::Shark | Icon::Squid)
    }

    /// Name with article, as used in the game-over line
    pub fn display_name(self) -> &'static str {
        match self {
            Icon::Blowfish => "a blowfish",
            Icon::Fish => "a fish",
            Icon::TropicalFish => "a tropical fish",
            Icon::Shrimp => "a shrimp",
            Icon::Shark => "a shark",
            Icon::Squid => "an octopus",
        }
    }

    /// Icons allowed for a spawn class
    pub fn pool(class: SpawnClass) -> &'static [Icon] {
        match class {
            SpawnClass::Fish => &Self::FISH,
            SpawnClass::Enemy => &Self::ENEMIES,
            SpawnClass::Any => &Self::ALL,
        }
    }
}

/// A fish or enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub icon: Icon,
    /// Wave period modifier for the glide path
    pub speed: f32,
}

impl Entity {
    pub fn is_enemy(&self) -> bool {
        self.icon.is_enemy()
    }
}

/// The diving bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub diving: bool,
}

impl Player {
    /// Start-of-session player: centered, at the top of its band, at rest
    pub fn spawn(viewport: Viewport) -> Self {
        Self {
            pos: viewport.player_start(),
            vel: Vec2::ZERO,
            diving: false,
        }
    }
}

/// Viewport size in pixels; y grows upward from the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface line; below it is ocean
    pub fn ocean_level(&self) -> f32 {
        OCEAN_LEVEL_FRACTION * self.height
    }

    /// Highest the player may fly: middle of the sky region
    pub fn player_max_y(&self) -> f32 {
        ((1.0 - OCEAN_LEVEL_FRACTION) / 2.0 + OCEAN_LEVEL_FRACTION) * self.height
    }

    pub fn player_max_x(&self) -> f32 {
        self.width - MIN_COORD
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.player_max_y())
    }
}

/// The fish currently held by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Catch {
    pub fish_id: u32,
    /// Horizontal speed when caught (the carried fish has its velocity zeroed)
    pub vx_at_catch: f32,
}

impl Catch {
    /// Points awarded on release; faster fish are worth more
    pub fn value(&self) -> f64 {
        1.0 + f64::from(self.vx_at_catch.abs())
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Eaten(Icon),
    TimeUp,
    Drowned,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eaten(icon) => write!(f, "You were eaten by {}", icon.display_name()),
            Self::TimeUp => write!(f, "Times up!"),
            Self::Drowned => write!(f, "You drowned"),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Fixed for the session at start; None outside a run
    pub control_mode: Option<ControlMode>,
    /// Session clock origin in seconds (None when not running)
    pub game_start: Option<f64>,
    /// Time the current dive went under (None when not submerged)
    pub dive_start: Option<f64>,
    pub score: f64,
    pub end_reason: Option<EndReason>,
    pub lives: u8,
    pub player: Player,
    /// Fish and enemies (sorted by id)
    pub entities: Vec<Entity>,
    pub caught: Option<Catch>,
    /// Debug overlay flag (presentation only)
    pub debug: bool,
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with a freshly generated entity pool
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        let config = config.normalized();
        let mut state = Self {
            lives: config.lives,
            config,
            viewport,
            phase: GamePhase::Idle,
            control_mode: None,
            game_start: None,
            dive_start: None,
            score: 0.0,
            end_reason: None,
            player: Player::spawn(viewport),
            entities: Vec::new(),
            caught: None,
            debug: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        let count = state.config.initial_entities;
        super::spawn::spawn_entities(&mut state, count, SpawnClass::Any);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn ocean_level(&self) -> f32 {
        self.viewport.ocean_level()
    }

    pub fn is_submerged(&self) -> bool {
        self.player.pos.y < self.ocean_level()
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// The entity currently held, if it is still in the pool
    pub fn held_entity(&self) -> Option<&Entity> {
        self.caught.and_then(|c| self.entity(c.fish_id))
    }

    /// Put the player back at the session start position, at rest
    pub fn reset_player(&mut self) {
        self.player = Player::spawn(self.viewport);
    }

    /// Host window resized; keep the player inside the new bounds
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.pos = super::tick::clamp_player_pos(self.player.pos, viewport);
    }

    /// Ensure entities are sorted by ID
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
