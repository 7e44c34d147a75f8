//! Window geometry persisted across launches.

use super::PreferenceStore;
use super::keys::{WINDOW_HEIGHT, WINDOW_MAXIMIZED, WINDOW_WIDTH};

/// Last window size and maximized state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPrefs {
    pub width: f64,
    pub height: f64,
    pub maximized: bool,
}

impl WindowPrefs {
    /// Read window geometry, using `default` for anything not yet stored.
    ///
    /// Non-positive stored sizes are ignored in favor of the default.
    pub fn load(store: &dyn PreferenceStore, default: WindowPrefs) -> Self {
        let positive_or = |v: f64, d: f64| if v > 0.0 { v } else { d };
        Self {
            width: positive_or(store.get_f64(WINDOW_WIDTH, default.width), default.width),
            height: positive_or(store.get_f64(WINDOW_HEIGHT, default.height), default.height),
            maximized: store.get_bool(WINDOW_MAXIMIZED, default.maximized),
        }
    }

    pub fn store(&self, store: &mut dyn PreferenceStore) {
        store.put_f64(WINDOW_WIDTH, self.width);
        store.put_f64(WINDOW_HEIGHT, self.height);
        store.put_bool(WINDOW_MAXIMIZED, self.maximized);
    }
}

impl Default for WindowPrefs {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            maximized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    #[test]
    fn test_defaults_when_empty() {
        let prefs = MemoryPreferences::new();
        assert_eq!(WindowPrefs::load(&prefs, WindowPrefs::default()), WindowPrefs::default());
    }

    #[test]
    fn test_roundtrip() {
        let mut prefs = MemoryPreferences::new();
        let window = WindowPrefs {
            width: 900.5,
            height: 700.0,
            maximized: true,
        };
        window.store(&mut prefs);
        assert_eq!(WindowPrefs::load(&prefs, WindowPrefs::default()), window);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_f64(WINDOW_WIDTH, -10.0);
        let loaded = WindowPrefs::load(&prefs, WindowPrefs::default());
        assert_eq!(loaded.width, WindowPrefs::default().width);
    }
}
