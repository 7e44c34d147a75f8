//! # Moire - Interference Pattern Generator
//!
//! Moire draws simple procedural pixel patterns and overlays them with a
//! rotated, shifted and scaled copy of themselves. It provides:
//!
//! - **Pattern generation**: checkerboard, random dots, triangles, horizontal and diagonal lines
//! - **Transform model**: pointer gestures mapped to rotation, translation and scale
//! - **Compositing**: foreground/background recoloring and PNG export
//! - **Preferences**: settings, transform, colors and window geometry restored between runs
//!
//! ## Quick Start
//!
//! ```no_run
//! use moire::{ImageSettings, MoireSession, PatternMode};
//! use moire::transform::{PointerButton, ViewGeometry};
//!
//! let settings = ImageSettings {
//!     mode: PatternMode::Squares,
//!     pixel_size: 4,
//!     ..Default::default()
//! };
//! let mut session = MoireSession::new(settings)?;
//!
//! // Rotate the overlay with a secondary-button drag above the centre
//! let view = ViewGeometry::new(1000.0, 1000.0);
//! let ctl = session.transform_mut();
//! ctl.press(500.0, 100.0);
//! ctl.drag(560.0, 100.0, PointerButton::Secondary, &view);
//! ctl.release();
//!
//! session.export("moire.png".as_ref())?;
//!
//! # Ok::<(), moire::MoireError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pattern`] | Base image generators |
//! | [`raster`] | ARGB pixel buffer |
//! | [`settings`] | Image settings and validation |
//! | [`transform`] | Overlay transform state and gesture controller |
//! | [`compose`] | Layer compositing |
//! | [`export`] | PNG export |
//! | [`prefs`] | Preference persistence |
//! | [`session`] | Application-level state owner |
//! | [`error`] | Error types |

pub mod color;
pub mod compose;
pub mod error;
pub mod export;
pub mod pattern;
pub mod prefs;
pub mod raster;
pub mod session;
pub mod settings;
pub mod transform;

// Re-exports for convenience
pub use color::Rgba;
pub use error::MoireError;
pub use pattern::{PatternMode, generate, generate_with_rng};
pub use raster::PixelBuffer;
pub use session::MoireSession;
pub use settings::ImageSettings;
pub use transform::{Affine, TransformController, TransformState};
