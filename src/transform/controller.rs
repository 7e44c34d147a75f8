//! Pointer-driven transform controller.

use super::state::{Affine, DEFAULT_TOLERANCE, TransformDefaults, TransformState};
use crate::error::MoireError;
use log::debug;

/// Scroll units per unit of common scale.
pub const DEFAULT_SCROLL_SENSITIVITY: f64 = 600.0;

/// Pixels of drag per degree of rotation.
pub const ROTATION_DRAG_DIVISOR: f64 = 60.0;

/// Which pointer button is held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Translate.
    Primary,
    /// Rotate around the image centre.
    Secondary,
    /// Independent X/Y scale.
    Middle,
}

/// Where the untransformed image sits in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub image_width: f64,
    pub image_height: f64,
}

impl ViewGeometry {
    /// Image at the view origin.
    pub fn new(image_width: f64, image_height: f64) -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            image_width,
            image_height,
        }
    }

    pub fn with_origin(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Whether both image dimensions are positive.
    pub fn has_area(&self) -> bool {
        self.image_width > 0.0 && self.image_height > 0.0
    }

    /// Image centre in view coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.origin_x + self.image_width / 2.0,
            self.origin_y + self.image_height / 2.0,
        )
    }
}

/// Parameter group reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformChange {
    Rotation,
    Translation,
    CommonScale,
    IndependentScale,
    ScaleMode,
}

/// Handle returned by [`TransformController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TransformState, TransformChange)>;

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: (f64, f64),
    last: (f64, f64),
}

/// Owns the [`TransformState`] and applies gestures and edits to it.
///
/// A gesture is `press → drag* → release`. Each drag tick moves by the delta
/// from the *previous* tick, not from the press point:
///
/// | Button | Effect |
/// |--------|--------|
/// | Primary | `translate += (dx, dy)` |
/// | Secondary | `rotation += (sgn(x − cx)·dy − sgn(y − cy)·dx) / 60` |
/// | Middle | `scale_x += dx / w`, `scale_y −= dy / h`, floored at 0 (independent mode only) |
/// | Scroll | `scale_common = max(scale_common + dy / K, 0)` (common mode only) |
///
/// Listeners are told which group changed after every effective update.
pub struct TransformController {
    state: TransformState,
    defaults: TransformDefaults,
    scroll_sensitivity: f64,
    drag: Option<Drag>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(TransformState::default())
    }
}

impl TransformController {
    pub fn new(state: TransformState) -> Self {
        Self::with_defaults(state, TransformDefaults::default())
    }

    pub fn with_defaults(state: TransformState, defaults: TransformDefaults) -> Self {
        Self {
            state,
            defaults,
            scroll_sensitivity: DEFAULT_SCROLL_SENSITIVITY,
            drag: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn defaults(&self) -> &TransformDefaults {
        &self.defaults
    }

    /// The current transform with the scale mode resolved.
    pub fn affine(&self) -> Affine {
        self.state.affine()
    }

    pub fn scroll_sensitivity(&self) -> f64 {
        self.scroll_sensitivity
    }

    /// Set the scroll divisor `K`. Must be finite and positive.
    pub fn set_scroll_sensitivity(&mut self, k: f64) -> Result<(), MoireError> {
        if !(k.is_finite() && k > 0.0) {
            return Err(MoireError::InvalidSettings(format!(
                "scroll sensitivity must be positive, got {}",
                k
            )));
        }
        self.scroll_sensitivity = k;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register a callback invoked after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TransformState, TransformChange) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: TransformChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, change);
        }
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Start a drag gesture at `(x, y)`.
    pub fn press(&mut self, x: f64, y: f64) {
        self.drag = Some(Drag {
            start: (x, y),
            last: (x, y),
        });
    }

    /// Continue the drag to `(x, y)` with `button` held.
    ///
    /// A drag without a preceding press starts the gesture at `(x, y)` and
    /// moves nothing. Returns the group that changed, if any.
    pub fn drag(
        &mut self,
        x: f64,
        y: f64,
        button: PointerButton,
        view: &ViewGeometry,
    ) -> Option<TransformChange> {
        if self.drag.is_none() {
            self.press(x, y);
            return None;
        }
        let drag = self.drag.as_mut()?;
        let dx = x - drag.last.0;
        let dy = y - drag.last.1;
        drag.last = (x, y);

        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        match button {
            PointerButton::Primary => {
                self.state.translate_x += dx;
                self.state.translate_y += dy;
                self.notify(TransformChange::Translation);
                Some(TransformChange::Translation)
            }
            PointerButton::Secondary => {
                let dr = rotation_delta(x, y, dx, dy, view.center());
                if dr == 0.0 {
                    return None;
                }
                self.state.rotation += dr / ROTATION_DRAG_DIVISOR;
                self.notify(TransformChange::Rotation);
                Some(TransformChange::Rotation)
            }
            PointerButton::Middle => {
                if self.state.use_common_scale || !view.has_area() {
                    return None;
                }
                self.state.scale_x = (self.state.scale_x + dx / view.image_width).max(0.0);
                self.state.scale_y = (self.state.scale_y - dy / view.image_height).max(0.0);
                self.notify(TransformChange::IndependentScale);
                Some(TransformChange::IndependentScale)
            }
        }
    }

    /// End the current gesture.
    pub fn release(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(
                "drag from ({:.0},{:.0}) ended at ({:.0},{:.0})",
                drag.start.0, drag.start.1, drag.last.0, drag.last.1
            );
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the current gesture was pressed.
    pub fn drag_start(&self) -> Option<(f64, f64)> {
        self.drag.map(|d| d.start)
    }

    /// Apply a vertical scroll delta to the common scale.
    ///
    /// Ignored while independent scaling is active. Returns true if the
    /// scale changed.
    pub fn scroll(&mut self, delta_y: f64) -> bool {
        if !self.state.use_common_scale {
            return false;
        }
        let next = (self.state.scale_common + delta_y / self.scroll_sensitivity).max(0.0);
        self.set_common_scale(next)
    }

    // ------------------------------------------------------------------
    // Direct edits
    // ------------------------------------------------------------------

    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        if self.state.rotation == degrees {
            return false;
        }
        self.state.rotation = degrees;
        self.notify(TransformChange::Rotation);
        true
    }

    pub fn set_translation(&mut self, x: f64, y: f64) -> bool {
        if self.state.translate_x == x && self.state.translate_y == y {
            return false;
        }
        self.state.translate_x = x;
        self.state.translate_y = y;
        self.notify(TransformChange::Translation);
        true
    }

    /// Set the common scale, clamped at 0.
    pub fn set_common_scale(&mut self, scale: f64) -> bool {
        let scale = scale.max(0.0);
        if self.state.scale_common == scale {
            return false;
        }
        self.state.scale_common = scale;
        self.notify(TransformChange::CommonScale);
        true
    }

    /// Set the independent scales, each clamped at 0.
    pub fn set_independent_scale(&mut self, scale_x: f64, scale_y: f64) -> bool {
        let (scale_x, scale_y) = (scale_x.max(0.0), scale_y.max(0.0));
        if self.state.scale_x == scale_x && self.state.scale_y == scale_y {
            return false;
        }
        self.state.scale_x = scale_x;
        self.state.scale_y = scale_y;
        self.notify(TransformChange::IndependentScale);
        true
    }

    pub fn set_scale_x(&mut self, scale_x: f64) -> bool {
        self.set_independent_scale(scale_x, self.state.scale_y)
    }

    pub fn set_scale_y(&mut self, scale_y: f64) -> bool {
        self.set_independent_scale(self.state.scale_x, scale_y)
    }

    pub fn set_use_common_scale(&mut self, use_common: bool) -> bool {
        if self.state.use_common_scale == use_common {
            return false;
        }
        self.state.use_common_scale = use_common;
        self.notify(TransformChange::ScaleMode);
        true
    }

    /// Replace the whole state, notifying every group that differs.
    pub fn set_state(&mut self, state: TransformState) {
        self.set_rotation(state.rotation);
        self.set_translation(state.translate_x, state.translate_y);
        self.set_common_scale(state.scale_common);
        self.set_independent_scale(state.scale_x, state.scale_y);
        self.set_use_common_scale(state.use_common_scale);
    }

    // ------------------------------------------------------------------
    // Resets
    // ------------------------------------------------------------------

    pub fn reset_rotation(&mut self) -> bool {
        self.set_rotation(self.defaults.rotation)
    }

    pub fn reset_translation(&mut self) -> bool {
        self.set_translation(self.defaults.translate_x, self.defaults.translate_y)
    }

    pub fn reset_common_scale(&mut self) -> bool {
        self.set_common_scale(self.defaults.scale_common)
    }

    pub fn reset_independent_scale(&mut self) -> bool {
        self.set_independent_scale(self.defaults.scale_x, self.defaults.scale_y)
    }

    /// Reset both scale groups. The scale mode flag is left alone.
    pub fn reset_scale(&mut self) -> bool {
        let common = self.reset_common_scale();
        let independent = self.reset_independent_scale();
        common || independent
    }

    /// Reset rotation, translation and both scales to identity.
    pub fn reset_all(&mut self) -> bool {
        let rotation = self.reset_rotation();
        let translation = self.reset_translation();
        let scale = self.reset_scale();
        rotation || translation || scale
    }

    pub fn is_rotation_at_default(&self) -> bool {
        near(self.state.rotation, self.defaults.rotation)
    }

    pub fn is_translation_at_default(&self) -> bool {
        near(self.state.translate_x, self.defaults.translate_x)
            && near(self.state.translate_y, self.defaults.translate_y)
    }

    pub fn is_common_scale_at_default(&self) -> bool {
        near(self.state.scale_common, self.defaults.scale_common)
    }

    pub fn is_independent_scale_at_default(&self) -> bool {
        near(self.state.scale_x, self.defaults.scale_x)
            && near(self.state.scale_y, self.defaults.scale_y)
    }

    pub fn is_at_default(&self) -> bool {
        self.is_rotation_at_default()
            && self.is_translation_at_default()
            && self.is_common_scale_at_default()
            && self.is_independent_scale_at_default()
    }
}

#[inline]
fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= DEFAULT_TOLERANCE
}

/// Sign that maps zero to zero (`f64::signum(0.0)` is 1).
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Raw rotation delta for a secondary drag at `(x, y)` moved by `(dx, dy)`.
///
/// Dragging clockwise around the centre is positive in every quadrant:
/// right of centre, moving down turns clockwise; above centre, moving right
/// does too.
pub fn rotation_delta(x: f64, y: f64, dx: f64, dy: f64, center: (f64, f64)) -> f64 {
    sign(x - center.0) * dy - sign(y - center.1) * dx
}
