//! Preference key names.
//!
//! Stable string keys shared by every [`PreferenceStore`](super::PreferenceStore)
//! backend. Renaming one orphans the value persisted under the old name.

// transformation
pub const ROTATION: &str = "transformRotation";
pub const TRANSLATION_X: &str = "transformTranslationX";
pub const TRANSLATION_Y: &str = "transformTranslationY";
pub const COMMON_SCALING: &str = "transformCommonScaling";
pub const USE_COMMON_SCALING: &str = "transformUseCommonScaling";
pub const SCALING_X: &str = "transformScalingX";
pub const SCALING_Y: &str = "transformScalingY";
pub const SCROLL_SENSITIVITY: &str = "scrollSensitivity";

// image settings
pub const PIXEL_DENSITY: &str = "pixelDensityPercents";
pub const PIXEL_SIZE: &str = "pixelSize";
pub const IMAGE_MODE_INDEX: &str = "imageModeIndex";
pub const IMAGE_WIDTH: &str = "imageWidth";
pub const IMAGE_HEIGHT: &str = "imageHeight";

// window
pub const WINDOW_WIDTH: &str = "windowWidth";
pub const WINDOW_HEIGHT: &str = "windowHeight";
pub const WINDOW_MAXIMIZED: &str = "windowMaximized";

// colors
pub const BACKGROUND_COLOR_PREFIX: &str = "backgroundColor";
pub const FOREGROUND_COLOR_PREFIX: &str = "foregroundColor";
pub const ALPHA_SUFFIX: &str = "_alphaChannel";
pub const RED_SUFFIX: &str = "_redChannel";
pub const GREEN_SUFFIX: &str = "_greenChannel";
pub const BLUE_SUFFIX: &str = "_blueChannel";
