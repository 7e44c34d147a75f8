//! Transform parameters, their defaults, and the resulting affine transform.

use crate::prefs::PreferenceStore;
use crate::prefs::keys::{
    COMMON_SCALING, ROTATION, SCALING_X, SCALING_Y, TRANSLATION_X, TRANSLATION_Y, USE_COMMON_SCALING,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for "is this parameter at its default" checks.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// The five continuous transform parameters plus the scale-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Rotation in degrees, unbounded.
    pub rotation: f64,
    /// Horizontal offset in pixels.
    pub translate_x: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Uniform scale, used when `use_common_scale` is set.
    pub scale_common: f64,
    /// Horizontal scale, used when `use_common_scale` is clear.
    pub scale_x: f64,
    /// Vertical scale, used when `use_common_scale` is clear.
    pub scale_y: f64,
    /// Which scale source feeds the effective scale.
    pub use_common_scale: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        TransformDefaults::default().state()
    }
}

impl TransformState {
    /// Effective `(scale_x, scale_y)` after applying the scale-mode flag.
    pub fn effective_scale(&self) -> (f64, f64) {
        if self.use_common_scale {
            (self.scale_common, self.scale_common)
        } else {
            (self.scale_x, self.scale_y)
        }
    }

    pub fn affine(&self) -> Affine {
        let (scale_x, scale_y) = self.effective_scale();
        Affine {
            rotation_deg: self.rotation,
            translate_x: self.translate_x,
            translate_y: self.translate_y,
            scale_x,
            scale_y,
        }
    }

    /// Read the transform from preferences, using `defaults` for missing values.
    pub fn load(store: &dyn PreferenceStore, defaults: &TransformDefaults) -> Self {
        Self {
            rotation: store.get_f64(ROTATION, defaults.rotation),
            translate_x: store.get_f64(TRANSLATION_X, defaults.translate_x),
            translate_y: store.get_f64(TRANSLATION_Y, defaults.translate_y),
            scale_common: store.get_f64(COMMON_SCALING, defaults.scale_common).max(0.0),
            scale_x: store.get_f64(SCALING_X, defaults.scale_x).max(0.0),
            scale_y: store.get_f64(SCALING_Y, defaults.scale_y).max(0.0),
            use_common_scale: store.get_bool(USE_COMMON_SCALING, defaults.use_common_scale),
        }
    }

    pub fn store(&self, store: &mut dyn PreferenceStore) {
        store.put_f64(ROTATION, self.rotation);
        store.put_f64(TRANSLATION_X, self.translate_x);
        store.put_f64(TRANSLATION_Y, self.translate_y);
        store.put_f64(SCALING_X, self.scale_x);
        store.put_f64(SCALING_Y, self.scale_y);
        store.put_f64(COMMON_SCALING, self.scale_common);
        store.put_bool(USE_COMMON_SCALING, self.use_common_scale);
    }
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.affine())
    }
}

/// Values each parameter group resets to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDefaults {
    /// Default: 0.0
    pub rotation: f64,
    /// Default: 0.0
    pub translate_x: f64,
    /// Default: 0.0
    pub translate_y: f64,
    /// Default: 1.0
    pub scale_common: f64,
    /// Default: 1.0
    pub scale_x: f64,
    /// Default: 1.0
    pub scale_y: f64,
    /// Default: true
    pub use_common_scale: bool,
}

impl Default for TransformDefaults {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale_common: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            use_common_scale: true,
        }
    }
}

impl TransformDefaults {
    /// A state with every parameter at its default.
    pub fn state(&self) -> TransformState {
        TransformState {
            rotation: self.rotation,
            translate_x: self.translate_x,
            translate_y: self.translate_y,
            scale_common: self.scale_common,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            use_common_scale: self.use_common_scale,
        }
    }
}

/// Resolved transform for the overlay layer.
///
/// Applied the way a scene-graph node applies its own transform: scale and
/// rotate about the image centre, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub rotation_deg: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        rotation_deg: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a point of the untransformed image into view space, pivoting at `(pivot_x, pivot_y)`.
    pub fn apply(&self, x: f64, y: f64, pivot_x: f64, pivot_y: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let sx = (x - pivot_x) * self.scale_x;
        let sy = (y - pivot_y) * self.scale_y;
        (
            sx * cos - sy * sin + pivot_x + self.translate_x,
            sx * sin + sy * cos + pivot_y + self.translate_y,
        )
    }

    /// The same mapping as [`apply`](Self::apply), as a rasterizer transform.
    pub fn to_matrix(&self, pivot_x: f32, pivot_y: f32) -> tiny_skia::Transform {
        use tiny_skia::Transform;

        Transform::from_translate(
            pivot_x + self.translate_x as f32,
            pivot_y + self.translate_y as f32,
        )
        .pre_concat(Transform::from_rotate(self.rotation_deg as f32))
        .pre_concat(Transform::from_scale(self.scale_x as f32, self.scale_y as f32))
        .pre_concat(Transform::from_translate(-pivot_x, -pivot_y))
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotate={:.2}° translate=({:.1},{:.1}) scale=({:.3},{:.3})",
            self.rotation_deg, self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }
}
