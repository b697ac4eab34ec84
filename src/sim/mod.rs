//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - One `tick` per animation frame, run to completion
//! - Time comes in as an argument, never read from the platform
//! - Randomness only from the state's seeded RNG
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{EnemyContact, FishCandidate, ProximityScan, in_proximity, scan_proximity};
pub use phase::{PhaseEvent, Transition, apply};
pub use snapshot::{EntityView, Snapshot};
pub use spawn::{random_entity, spawn_entities, spawn_replacements};
pub use state::{
    Catch, ControlMode, EndReason, Entity, GamePhase, GameState, Icon, Player, SpawnClass,
    Viewport,
};
pub use tick::{TickInput, glide_height, step, tick};
