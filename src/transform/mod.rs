//! # Overlay Transform
//!
//! The transform applied to the second copy of the base image: rotation,
//! translation, and either a common or independent X/Y scale.
//!
//! - [`state`]: parameters, defaults, persistence, [`Affine`] output
//! - [`controller`]: pointer gestures, direct edits, resets, change listeners
//!
//! ## Example
//!
//! ```
//! use moire::transform::{PointerButton, TransformController, ViewGeometry};
//!
//! let mut ctl = TransformController::default();
//! let view = ViewGeometry::new(1000.0, 1000.0);
//!
//! ctl.press(100.0, 100.0);
//! ctl.drag(110.0, 95.0, PointerButton::Primary, &view);
//! ctl.release();
//!
//! assert_eq!(ctl.affine().translate_x, 10.0);
//! assert_eq!(ctl.affine().translate_y, -5.0);
//! ```

pub mod controller;
pub mod state;

pub use controller::{
    DEFAULT_SCROLL_SENSITIVITY, ListenerId, PointerButton, ROTATION_DRAG_DIVISOR,
    TransformChange, TransformController, ViewGeometry, rotation_delta,
};
pub use state::{Affine, TransformDefaults, TransformState};
