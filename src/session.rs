//! # Session
//!
//! [`MoireSession`] owns everything one moiré window needs: the image
//! settings, the generated base image, the transform controller, the two
//! colors and the window geometry.
//!
//! ## Lifecycle
//!
//! ```text
//! load(prefs) ──► set_image_settings / reroll / transform_mut() ... ──► store(prefs)
//!                          │                                    │
//!                          └──────► render() / export(path) ◄───┘
//! ```
//!
//! The base image is regenerated synchronously whenever the image settings
//! change. The buffer is only reallocated when the dimensions change.

use crate::color::Rgba;
use crate::compose::{compose, to_rgba_image};
use crate::error::MoireError;
use crate::export::Exporter;
use crate::prefs::keys::{BACKGROUND_COLOR_PREFIX, FOREGROUND_COLOR_PREFIX, SCROLL_SENSITIVITY};
use crate::prefs::{PreferenceStore, WindowPrefs};
use crate::raster::PixelBuffer;
use crate::settings::ImageSettings;
use crate::transform::{
    DEFAULT_SCROLL_SENSITIVITY, TransformController, TransformDefaults, TransformState,
};
use image::RgbaImage;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Default pattern ink.
pub const DEFAULT_FOREGROUND: Rgba = Rgba::BLACK;

/// Default canvas color.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::WHITE;

pub struct MoireSession {
    settings: ImageSettings,
    image: PixelBuffer,
    transform: TransformController,
    foreground: Rgba,
    background: Rgba,
    window: WindowPrefs,
    exporter: Exporter,
}

impl MoireSession {
    /// Start a session with `settings` and every other value at its default.
    pub fn new(settings: ImageSettings) -> Result<Self, MoireError> {
        settings.validate()?;
        let image = settings.render()?;
        Ok(Self {
            settings,
            image,
            transform: TransformController::default(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            window: WindowPrefs::default(),
            exporter: Exporter::new(),
        })
    }

    /// Restore a session from preferences and generate its base image.
    ///
    /// Persisted image settings that no longer validate are replaced by the
    /// defaults, as is an unusable scroll sensitivity.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, MoireError> {
        let mut settings = ImageSettings::load(store);
        if let Err(e) = settings.validate() {
            warn!("ignoring stored image settings: {}", e);
            settings = ImageSettings::default();
        }

        let defaults = TransformDefaults::default();
        let mut transform =
            TransformController::with_defaults(TransformState::load(store, &defaults), defaults);
        let k = store.get_f64(SCROLL_SENSITIVITY, DEFAULT_SCROLL_SENSITIVITY);
        if let Err(e) = transform.set_scroll_sensitivity(k) {
            warn!("ignoring stored scroll sensitivity: {}", e);
        }

        let image = settings.render()?;
        debug!("loaded session: {} / {}", settings, transform.state());

        Ok(Self {
            settings,
            image,
            transform,
            foreground: Rgba::load(store, FOREGROUND_COLOR_PREFIX, DEFAULT_FOREGROUND),
            background: Rgba::load(store, BACKGROUND_COLOR_PREFIX, DEFAULT_BACKGROUND),
            window: WindowPrefs::load(store, WindowPrefs::default()),
            exporter: Exporter::new(),
        })
    }

    /// Write every persisted value to `store`. Call `flush` on the store afterwards.
    pub fn store(&self, store: &mut dyn PreferenceStore) {
        self.settings.store(store);
        self.transform.state().store(store);
        store.put_f64(SCROLL_SENSITIVITY, self.transform.scroll_sensitivity());
        self.foreground.store(store, FOREGROUND_COLOR_PREFIX);
        self.background.store(store, BACKGROUND_COLOR_PREFIX);
        self.window.store(store);
        debug!("stored session: {} / {}", self.settings, self.transform.state());
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Apply new image settings and regenerate.
    ///
    /// Invalid settings are refused and the session is left as it was.
    /// Returns false if the settings were already current.
    pub fn set_image_settings(&mut self, settings: ImageSettings) -> Result<bool, MoireError> {
        settings.validate()?;
        if settings == self.settings {
            return Ok(false);
        }
        if self.image.matches(settings.width, settings.height) {
            settings.render_into(&mut self.image)?;
        } else {
            self.image = settings.render()?;
        }
        self.settings = settings;
        Ok(true)
    }

    /// Regenerate the base image with unchanged settings.
    ///
    /// Only random mode without a fixed seed produces a different image.
    pub fn reroll(&mut self) -> Result<(), MoireError> {
        self.settings.render_into(&mut self.image)
    }

    /// The current base image.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn transform(&self) -> &TransformController {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut TransformController {
        &mut self.transform
    }

    pub fn foreground(&self) -> Rgba {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Rgba) {
        self.foreground = color;
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    pub fn window(&self) -> &WindowPrefs {
        &self.window
    }

    pub fn set_window(&mut self, window: WindowPrefs) {
        self.window = window;
    }

    /// Composite the base image with its transformed copy.
    pub fn render(&self) -> Result<RgbaImage, MoireError> {
        let pixmap = compose(
            &self.image,
            &self.transform.affine(),
            self.foreground,
            self.background,
        )?;
        to_rgba_image(&pixmap)
    }

    /// Render and save as PNG. Returns the path actually written.
    pub fn export(&mut self, path: &Path) -> Result<PathBuf, MoireError> {
        let image = self.render()?;
        self.exporter.export(&image, path)
    }

    /// Directory of the last successful export.
    pub fn last_export_dir(&self) -> Option<&Path> {
        self.exporter.last_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternMode;
    use crate::prefs::MemoryPreferences;
    use crate::prefs::keys::IMAGE_WIDTH;

    fn small() -> ImageSettings {
        ImageSettings {
            mode: PatternMode::Squares,
            width: 120,
            height: 100,
            pixel_size: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_generates_image() {
        let session = MoireSession::new(small()).unwrap();
        assert!(session.image().matches(120, 100));
        assert!(session.image().is_opaque(0, 0));
        assert!(!session.image().is_opaque(4, 0));
    }

    #[test]
    fn test_invalid_settings_leave_session_untouched() {
        let mut session = MoireSession::new(small()).unwrap();
        let before = session.image().clone();
        let bad = ImageSettings { width: 50, ..small() };
        assert!(session.set_image_settings(bad).is_err());
        assert_eq!(*session.settings(), small());
        assert_eq!(*session.image(), before);
    }

    #[test]
    fn test_set_image_settings_regenerates() {
        let mut session = MoireSession::new(small()).unwrap();
        assert!(!session.set_image_settings(small()).unwrap());

        let lines = ImageSettings { mode: PatternMode::HorizontalLines, ..small() };
        assert!(session.set_image_settings(lines).unwrap());
        // second row of tiles is transparent everywhere
        assert!(!session.image().is_opaque(0, 4));

        let bigger = ImageSettings { width: 200, ..small() };
        session.set_image_settings(bigger).unwrap();
        assert!(session.image().matches(200, 100));
    }

    #[test]
    fn test_store_load_roundtrip() {
        let mut session = MoireSession::new(small()).unwrap();
        session.transform_mut().set_rotation(12.5);
        session.transform_mut().set_use_common_scale(false);
        session.transform_mut().set_scroll_sensitivity(300.0).unwrap();
        session.set_foreground(Rgba::new(10, 20, 30, 255));
        session.set_window(WindowPrefs { width: 900.0, height: 700.0, maximized: true });

        let mut prefs = MemoryPreferences::new();
        session.store(&mut prefs);
        let restored = MoireSession::load(&prefs).unwrap();

        assert_eq!(restored.settings(), session.settings());
        assert_eq!(restored.transform().state(), session.transform().state());
        assert_eq!(restored.transform().scroll_sensitivity(), 300.0);
        assert_eq!(restored.foreground(), session.foreground());
        assert_eq!(restored.background(), DEFAULT_BACKGROUND);
        assert_eq!(restored.window(), session.window());
    }

    #[test]
    fn test_load_rejects_invalid_stored_settings() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_i64(IMAGE_WIDTH, 5);
        prefs.put_f64(SCROLL_SENSITIVITY, -1.0);
        let session = MoireSession::load(&prefs).unwrap();
        assert_eq!(*session.settings(), ImageSettings::default());
        assert_eq!(session.transform().scroll_sensitivity(), DEFAULT_SCROLL_SENSITIVITY);
    }

    #[test]
    fn test_render_size() {
        let session = MoireSession::new(small()).unwrap();
        let image = session.render().unwrap();
        assert_eq!(image.dimensions(), (120, 100));
    }

    #[test]
    fn test_seeded_reroll_is_stable() {
        let settings = ImageSettings {
            mode: PatternMode::Random,
            seed: Some(7),
            pixel_density: 50.0,
            ..small()
        };
        let mut session = MoireSession::new(settings).unwrap();
        let first = session.image().clone();
        session.reroll().unwrap();
        assert_eq!(*session.image(), first);
    }
}
