//! Pointer input and drag tracking for moving elements.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, Transform};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed (finger down).
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// Gesture cancelled by the platform.
    Cancel,
}

/// A single pointer sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in canvas coordinates.
    pub x: f32,
    /// Y position in canvas coordinates.
    pub y: f32,
    /// Timestamp in milliseconds since the session started.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, x, y, 0)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y, 0)
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, x, y, 0)
    }
}

/// Clamp an element's top-left corner so it stays inside its parent.
///
/// Each axis becomes `max(0, min(v, parent - elem))`, so an element larger
/// than the parent is pinned to the origin.
#[must_use]
pub fn clamp_position(
    x: f32,
    y: f32,
    elem_width: f32,
    elem_height: f32,
    parent_width: f32,
    parent_height: f32,
) -> (f32, f32) {
    (
        x.min(parent_width - elem_width).max(0.0),
        y.min(parent_height - elem_height).max(0.0),
    )
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Pressed and released without moving.
    Tap(ElementId),
    /// The element was moved.
    Moved(ElementId),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    element: ElementId,
    start: Transform,
    /// Pointer offset from the element's top-left corner.
    grab_dx: f32,
    grab_dy: f32,
    last: Transform,
}

/// Tracks one in-flight drag of one element.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    press: Option<Press>,
}

impl DragTracker {
    /// Create an idle tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { press: None }
    }

    /// Start tracking a press on `element`, currently at `transform`.
    ///
    /// A press while another is active replaces it.
    pub fn press(&mut self, element: ElementId, transform: Transform, x: f32, y: f32) {
        self.press = Some(Press {
            element,
            start: transform,
            grab_dx: x - transform.x,
            grab_dy: y - transform.y,
            last: transform,
        });
    }

    /// Element being dragged, if any.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.press.map(|p| p.element)
    }

    /// Whether a press is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.press.is_some()
    }

    /// Transform the element had when pressed.
    #[must_use]
    pub fn start_transform(&self) -> Option<Transform> {
        self.press.map(|p| p.start)
    }

    /// Follow the pointer to `(x, y)` inside a `parent_width` × `parent_height` parent.
    ///
    /// Returns the clamped transform to apply, or `None` when idle or when
    /// the clamped position did not change.
    pub fn drag_to(
        &mut self,
        x: f32,
        y: f32,
        parent_width: f32,
        parent_height: f32,
    ) -> Option<Transform> {
        let press = self.press.as_mut()?;
        let (nx, ny) = clamp_position(
            x - press.grab_dx,
            y - press.grab_dy,
            press.last.width,
            press.last.height,
            parent_width,
            parent_height,
        );
        if (nx - press.last.x).abs() <= f32::EPSILON && (ny - press.last.y).abs() <= f32::EPSILON {
            return None;
        }
        press.last = press.last.with_position(nx, ny);
        Some(press.last)
    }

    /// Finish the drag. Returns `None` when no press was active.
    pub fn release(&mut self) -> Option<DragOutcome> {
        let press = self.press.take()?;
        let moved = (press.last.x - press.start.x).abs() > f32::EPSILON
            || (press.last.y - press.start.y).abs() > f32::EPSILON;
        Some(if moved {
            DragOutcome::Moved(press.element)
        } else {
            DragOutcome::Tap(press.element)
        })
    }

    /// Abandon the drag.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position() {
        assert_eq!(
            clamp_position(9999.0, 9999.0, 100.0, 40.0, 1080.0, 1080.0),
            (980.0, 1040.0)
        );
        assert_eq!(
            clamp_position(-5.0, -5.0, 100.0, 40.0, 1080.0, 1080.0),
            (0.0, 0.0)
        );
        assert_eq!(
            clamp_position(30.0, 30.0, 2000.0, 40.0, 1080.0, 1080.0),
            (0.0, 30.0)
        );
    }

    #[test]
    fn test_press_release_without_moving_is_tap() {
        let id = ElementId::new();
        let mut tracker = DragTracker::new();
        tracker.press(id, Transform::at(50.0, 50.0, 100.0, 40.0), 60.0, 60.0);
        assert!(tracker.drag_to(60.0, 60.0, 1080.0, 1080.0).is_none());
        assert_eq!(tracker.release(), Some(DragOutcome::Tap(id)));
        assert!(!tracker.is_active());
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn test_drag_keeps_grab_offset_and_clamps() {
        let id = ElementId::new();
        let mut tracker = DragTracker::new();
        tracker.press(id, Transform::at(50.0, 50.0, 100.0, 40.0), 60.0, 70.0);
        let moved = tracker.drag_to(110.0, 120.0, 1080.0, 1080.0).expect("moved");
        assert_eq!((moved.x, moved.y), (100.0, 100.0));
        let clamped = tracker.drag_to(5000.0, 5000.0, 1080.0, 1080.0).expect("moved");
        assert_eq!((clamped.x, clamped.y), (980.0, 1040.0));
        assert_eq!(tracker.release(), Some(DragOutcome::Moved(id)));
    }

    #[test]
    fn test_drag_back_to_start_is_tap() {
        let id = ElementId::new();
        let mut tracker = DragTracker::new();
        tracker.press(id, Transform::at(0.0, 0.0, 10.0, 10.0), 5.0, 5.0);
        tracker.drag_to(50.0, 50.0, 100.0, 100.0);
        tracker.drag_to(5.0, 5.0, 100.0, 100.0);
        assert_eq!(tracker.release(), Some(DragOutcome::Tap(id)));
    }
}
