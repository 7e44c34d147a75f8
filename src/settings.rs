//! # Image Settings
//!
//! Everything that determines the base image: mode, dimensions, pixel size
//! and (for random mode) density. Changing any of these means regenerating.
//!
//! Density is held as a percentage in `[0, 100]`, the way it is entered and
//! persisted; [`ImageSettings::density_fraction`] converts it for the
//! generator.

use crate::error::MoireError;
use crate::pattern::PatternMode;
use crate::prefs::PreferenceStore;
use crate::prefs::keys::{IMAGE_HEIGHT, IMAGE_MODE_INDEX, IMAGE_WIDTH, PIXEL_DENSITY, PIXEL_SIZE};
use crate::raster::PixelBuffer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted image width or height.
pub const MIN_DIMENSION: u32 = 100;

/// Largest accepted image width or height.
pub const MAX_DIMENSION: u32 = 10_000;

/// Parameters for base image generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Generation algorithm. Default: Random
    pub mode: PatternMode,
    /// Image width in pixels. Default: 1000
    pub width: u32,
    /// Image height in pixels. Default: 1000
    pub height: u32,
    /// Side length of one pattern cell. Default: 1
    pub pixel_size: u32,
    /// Percentage of opaque tiles in random mode. Default: 20.0
    pub pixel_density: f64,
    /// Fixed seed for random mode; `None` rerolls on every generation.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            mode: PatternMode::Random,
            width: 1000,
            height: 1000,
            pixel_size: 1,
            pixel_density: 20.0,
            seed: None,
        }
    }
}

impl ImageSettings {
    /// Check the input-boundary constraints.
    pub fn validate(&self) -> Result<(), MoireError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(MoireError::InvalidSettings(format!(
                    "{} must be between {} and {}, got {}",
                    name, MIN_DIMENSION, MAX_DIMENSION, value
                )));
            }
        }
        if self.pixel_size < 1 {
            return Err(MoireError::InvalidSettings(format!(
                "pixel size must be at least 1, got {}",
                self.pixel_size
            )));
        }
        if !(0.0..=100.0).contains(&self.pixel_density) {
            return Err(MoireError::InvalidSettings(format!(
                "pixel density must be between 0 and 100, got {}",
                self.pixel_density
            )));
        }
        Ok(())
    }

    /// Density as the `[0, 1]` probability the generator expects.
    pub fn density_fraction(&self) -> f64 {
        self.pixel_density / 100.0
    }

    /// Generate a new base image.
    pub fn render(&self) -> Result<PixelBuffer, MoireError> {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        self.render_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Redraw into an existing buffer, which must already have this size.
    pub fn render_into(&self, buffer: &mut PixelBuffer) -> Result<(), MoireError> {
        if !buffer.matches(self.width, self.height) {
            return Err(MoireError::Image(format!(
                "buffer is {}x{}, settings want {}x{}",
                buffer.width(),
                buffer.height(),
                self.width,
                self.height
            )));
        }
        let density = self.density_fraction();
        match self.seed {
            Some(seed) => self
                .mode
                .draw(buffer, self.pixel_size, density, &mut StdRng::seed_from_u64(seed)),
            None => self.mode.draw(buffer, self.pixel_size, density, &mut rand::rng()),
        }
    }

    /// Read settings from preferences, using [`Default`] for missing values.
    ///
    /// The seed is never persisted.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        let clamp_u32 = |v: i64, d: u32| u32::try_from(v).unwrap_or(d);
        Self {
            mode: PatternMode::from_index_or_default(
                store.get_i64(IMAGE_MODE_INDEX, defaults.mode.index() as i64),
            ),
            width: clamp_u32(store.get_i64(IMAGE_WIDTH, defaults.width as i64), defaults.width),
            height: clamp_u32(store.get_i64(IMAGE_HEIGHT, defaults.height as i64), defaults.height),
            pixel_size: clamp_u32(
                store.get_i64(PIXEL_SIZE, defaults.pixel_size as i64),
                defaults.pixel_size,
            ),
            pixel_density: store.get_f64(PIXEL_DENSITY, defaults.pixel_density),
            seed: None,
        }
    }

    pub fn store(&self, store: &mut dyn PreferenceStore) {
        store.put_i64(IMAGE_MODE_INDEX, self.mode.index() as i64);
        store.put_i64(IMAGE_WIDTH, self.width as i64);
        store.put_i64(IMAGE_HEIGHT, self.height as i64);
        store.put_i64(PIXEL_SIZE, self.pixel_size as i64);
        store.put_f64(PIXEL_DENSITY, self.pixel_density);
    }
}

impl fmt::Display for ImageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} size={}",
            self.mode, self.width, self.height, self.pixel_size
        )?;
        if self.mode.uses_density() {
            write!(f, " density={:.1}%", self.pixel_density)?;
        }
        Ok(())
    }
}
