//! Key-value persistence for the high score and configuration
//!
//! Backends:
//! - `LocalStorage`: browser LocalStorage (wasm32 only)
//! - `MemoryStorage`: in-process map (native builds and tests)
//!
//! Callers treat every error as recoverable: fall back to a default and log.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

mod memory;
pub use memory::MemoryStorage;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Storage access failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage available (no window, storage disabled, private mode)
    Unavailable,
    Read(String),
    Write(String),
    /// Stored value did not decode
    Parse(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Read(e) => write!(f, "storage read failed: {e}"),
            Self::Write(e) => write!(f, "storage write failed: {e}"),
            Self::Parse(e) => write!(f, "stored value is malformed: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// A string key-value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value; `Ok(None)` if the key is absent
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Parse(e.to_string())),
        None => Ok(None),
    }
}

/// Encode a value as JSON and store it
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Write(e.to_string()))?;
    storage.set_item(key, &json)
}
