//! # Preference Persistence
//!
//! Key-value persistence for everything the application restores between
//! sessions: image settings, the transform, colors and window geometry.
//!
//! The [`PreferenceStore`] trait is the only thing the rest of the crate
//! depends on. Values are stored as strings; the typed helpers parse on read
//! and fall back to the caller's default when a key is missing or holds
//! something unparseable.
//!
//! ## Backends
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryPreferences`] | Tests, one-shot CLI runs |
//! | [`FilePreferences`] | JSON file under the user config directory |

pub mod file;
pub mod keys;
pub mod memory;
pub mod window;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;
pub use window::WindowPrefs;

use crate::error::MoireError;
use log::warn;
use std::str::FromStr;

/// A string-keyed preference store.
pub trait PreferenceStore {
    /// Raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any previous value.
    fn put(&mut self, key: &str, value: String);

    /// Remove `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);

    /// All keys currently set, sorted.
    fn keys(&self) -> Vec<String>;

    /// Persist pending changes. In-memory stores have nothing to do.
    fn flush(&mut self) -> Result<(), MoireError> {
        Ok(())
    }

    fn clear(&mut self) {
        for key in self.keys() {
            self.remove(&key);
        }
    }

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        parse_or(key, self.get(key), default)
    }

    fn put_f64(&mut self, key: &str, value: f64) {
        self.put(key, value.to_string());
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        parse_or(key, self.get(key), default)
    }

    fn put_i64(&mut self, key: &str, value: i64) {
        self.put(key, value.to_string());
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        parse_or(key, self.get(key), default)
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, value.to_string());
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("preference '{}' has unparseable value '{}', using default", key, raw);
                default
            }
        },
    }
}
