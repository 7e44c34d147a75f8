//! JSON-file preference store.
//!
//! The whole store is one flat JSON object of string values:
//!
//! ```json
//! {
//!   "imageModeIndex": "1",
//!   "pixelSize": "4",
//!   "transformRotation": "2.5"
//! }
//! ```
//!
//! The file is read once on [`FilePreferences::open`] and rewritten on
//! [`flush`](PreferenceStore::flush) when anything changed.

use super::PreferenceStore;
use crate::error::MoireError;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "moire";
const FILE_NAME: &str = "preferences.json";

/// Preferences backed by a JSON file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl FilePreferences {
    /// Default location: `<config dir>/moire/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Open the store at [`default_path`](Self::default_path).
    pub fn open_default() -> Result<Self, MoireError> {
        let path = Self::default_path().ok_or_else(|| {
            MoireError::Preferences("no user configuration directory on this platform".to_string())
        })?;
        Self::open(path)
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MoireError> {
        let path = path.into();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    MoireError::Preferences(format!("{} is not a preference file: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!("loaded {} preferences from {}", values.len(), path.display());
        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are changes not yet written by `flush`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn flush(&mut self) -> Result<(), MoireError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        debug!("wrote {} preferences to {}", self.values.len(), self.path.display());
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("none.json")).unwrap();
        assert!(prefs.keys().is_empty());
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn test_flush_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.put_f64("transformRotation", 12.25);
        prefs.put_bool("transformUseCommonScaling", false);
        assert!(prefs.is_dirty());
        prefs.flush().unwrap();
        assert!(!prefs.is_dirty());

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get_f64("transformRotation", 0.0), 12.25);
        assert!(!reopened.get_bool("transformUseCommonScaling", true));
    }

    #[test]
    fn test_put_same_value_not_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.put_i64("pixelSize", 3);
        prefs.flush().unwrap();
        prefs.put_i64("pixelSize", 3);
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            FilePreferences::open(&path),
            Err(MoireError::Preferences(_))
        ));
    }
}
