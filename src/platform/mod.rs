//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (seconds, monotonic enough for frame clocks)
//! - RNG seeds
//! - Storage backend selection

use crate::persistence::Storage;

/// Current time in seconds
#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or_else(|| js_sys::Date::now() / 1000.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Seed for a new session
#[cfg(target_arch = "wasm32")]
pub fn random_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

/// Storage backend for this platform
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn Storage> {
    Box::new(crate::persistence::LocalStorage::new())
}

/// Native builds keep scores for the life of the process only
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage() -> Box<dyn Storage> {
    Box::new(crate::persistence::MemoryStorage::new())
}
