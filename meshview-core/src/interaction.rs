/// Pointer drag handling: press/drag samples to incremental rotations
use nalgebra::Point2;

use crate::config::ViewportConfig;
use crate::transform::Rotation;

/// Largest per-sample movement, in pixels, that still counts as a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Pointer button state with the last position seen while held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Released,
    Pressed { last: Point2<f64> },
    Dragging { last: Point2<f64> },
}

/// Turns pointer events into rotation steps.
///
/// Horizontal movement drives `phi` (about the y-axis) and vertical movement
/// drives `theta` (about the x-axis), each as pixels divided by the half
/// viewport.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    half: f64,
    threshold: f64,
}

impl DragController {
    pub fn new(viewport: &ViewportConfig) -> Self {
        Self::with_threshold(viewport, DEFAULT_DRAG_THRESHOLD)
    }

    pub fn with_threshold(viewport: &ViewportConfig, threshold: f64) -> Self {
        Self {
            state: DragState::Released,
            half: viewport.half(),
            threshold,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Button down: start tracking from `position`.
    pub fn on_press(&mut self, position: Point2<f64>) {
        self.state = DragState::Pressed { last: position };
    }

    /// Motion while held. Returns the rotation to apply, or `None` if the
    /// button is up or the jump is too large. The tracked position advances
    /// either way, so a discarded jump is never replayed.
    pub fn on_drag(&mut self, position: Point2<f64>) -> Option<Rotation> {
        let last = match self.state {
            DragState::Released => return None,
            DragState::Pressed { last } | DragState::Dragging { last } => last,
        };
        self.state = DragState::Dragging { last: position };

        let delta = position - last;
        if delta.x.abs() >= self.threshold || delta.y.abs() >= self.threshold {
            tracing::trace!(dx = delta.x, dy = delta.y, "discarded drag sample");
            return None;
        }

        tracing::trace!(dx = delta.x, dy = delta.y, "drag sample");
        Some(Rotation::new(delta.x / self.half, delta.y / self.half))
    }

    pub fn on_release(&mut self) {
        self.state = DragState::Released;
    }
}
