//! Interactive selection rectangle: draw, move and resize with eight handles.
//!
//! The rectangle is stored in original image coordinates. Every hit test
//! converts it to display space through the current [`ViewportTransform`],
//! since pan and zoom may change between queries.

use std::fmt;

use tracing::debug;

use crate::consts::HANDLE_SIZE;
use crate::geometry::{ImageRect, Point, Rect};
use crate::viewport::{display_rect_of, ViewportTransform};

/// Resize handle, in drawing order TL, T, TR, R, BR, B, BL, L.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomRight | Self::Bottom | Self::BottomLeft)
    }

    /// Anchor point of this handle on a display rect.
    fn anchor_on(self, r: &Rect) -> Point {
        let c = r.center();
        match self {
            Self::TopLeft => Point::new(r.left(), r.top()),
            Self::Top => Point::new(c.x, r.top()),
            Self::TopRight => Point::new(r.right(), r.top()),
            Self::Right => Point::new(r.right(), c.y),
            Self::BottomRight => Point::new(r.right(), r.bottom()),
            Self::Bottom => Point::new(c.x, r.bottom()),
            Self::BottomLeft => Point::new(r.left(), r.bottom()),
            Self::Left => Point::new(r.left(), c.y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing(Handle),
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Drawing => write!(f, "Drawing"),
            Self::Moving => write!(f, "Moving"),
            Self::Resizing(h) => write!(f, "Resizing({})", h.index()),
        }
    }
}

/// What a primary-button press did to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Resizing(Handle),
    Moving,
    Drawing,
    /// Selection mode is off; the press belongs to word hit-testing.
    NotHandled,
    /// A drag is already in progress.
    Rejected,
}

/// Cursor shape the UI should show for the current pointer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
    Move,
    Resize(Handle),
    Grabbing,
    PointingHand,
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    start: Point,
    rect: Option<ImageRect>,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    enabled: bool,
    rect: Option<ImageRect>,
    mode: InteractionMode,
    anchor: Option<DragAnchor>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selection(&self) -> Option<ImageRect> {
        self.rect
    }

    pub fn has_selection(&self) -> bool {
        self.rect.is_some()
    }

    /// Current selection is large enough for OCR.
    pub fn is_valid(&self) -> bool {
        self.rect.is_some_and(|r| r.is_valid())
    }

    /// Toggle selection mode. Turning it off clears the selection and aborts
    /// any drag. Returns whether a selection was discarded.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        if enabled {
            return false;
        }
        self.abort_drag();
        self.clear()
    }

    /// Abort any drag and drop the selection, keeping the mode toggle.
    /// Returns whether a selection existed.
    pub fn reset(&mut self) -> bool {
        self.abort_drag();
        self.clear()
    }

    /// Drop the selection. Returns whether one existed.
    pub fn clear(&mut self) -> bool {
        self.rect.take().is_some()
    }

    /// Replace the selection directly (already in original coordinates).
    pub fn set_selection(&mut self, rect: Option<ImageRect>) {
        self.rect = rect.map(ImageRect::normalized);
    }

    fn abort_drag(&mut self) {
        self.mode = InteractionMode::Idle;
        self.anchor = None;
    }

    pub fn display_rect(&self, transform: &ViewportTransform) -> Option<Rect> {
        self.rect.map(|r| display_rect_of(transform, &r))
    }

    /// Hit areas of the eight handles, in [`Handle::ALL`] order.
    pub fn handle_rects(&self, transform: &ViewportTransform) -> Option<[Rect; 8]> {
        let r = self.display_rect(transform)?;
        Some(Handle::ALL.map(|h| Rect::centered(h.anchor_on(&r), HANDLE_SIZE)))
    }

    pub fn handle_at(&self, pos: Point, transform: &ViewportTransform) -> Option<Handle> {
        let rects = self.handle_rects(transform)?;
        Handle::ALL
            .into_iter()
            .zip(rects)
            .find(|(_, r)| r.contains(pos))
            .map(|(h, _)| h)
    }

    pub fn contains(&self, pos: Point, transform: &ViewportTransform) -> bool {
        self.display_rect(transform).is_some_and(|r| r.contains(pos))
    }

    /// Primary-button press at a display position.
    pub fn press(&mut self, pos: Point, transform: &ViewportTransform) -> PressOutcome {
        if !self.enabled {
            return PressOutcome::NotHandled;
        }
        if self.mode != InteractionMode::Idle {
            debug!(mode = %self.mode, "press ignored while dragging");
            return PressOutcome::Rejected;
        }

        let outcome = if let Some(handle) = self.handle_at(pos, transform) {
            self.mode = InteractionMode::Resizing(handle);
            PressOutcome::Resizing(handle)
        } else if self.contains(pos, transform) {
            self.mode = InteractionMode::Moving;
            PressOutcome::Moving
        } else {
            self.mode = InteractionMode::Drawing;
            self.rect = None;
            PressOutcome::Drawing
        };

        self.anchor = Some(DragAnchor {
            start: pos,
            rect: self.rect,
        });
        debug!(mode = %self.mode, x = pos.x, y = pos.y, "selection drag started");
        outcome
    }

    /// Pointer moved to `pos` while the primary button is held.
    /// Returns whether the selection changed.
    pub fn drag(&mut self, pos: Point, transform: &ViewportTransform) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };

        let next = match self.mode {
            InteractionMode::Idle => return false,
            InteractionMode::Drawing => {
                if !transform.has_image() {
                    return false;
                }
                let start = transform.point_to_original(anchor.start);
                let end = transform.point_to_original(pos);
                Some(ImageRect::from_corners(start, end))
            }
            InteractionMode::Moving => anchor
                .rect
                .map(|r| moved_rect(r, anchor.start, pos, transform.scale_factor())),
            InteractionMode::Resizing(handle) => anchor
                .rect
                .map(|r| resized_rect(r, handle, transform.point_to_original(pos))),
        };

        if next.is_some() && next != self.rect {
            self.rect = next;
            true
        } else {
            false
        }
    }

    /// Primary button released. Clamps the rect to the image and returns
    /// `Some(has_selection)` when a drag was finished.
    pub fn release(&mut self, transform: &ViewportTransform) -> Option<bool> {
        if self.mode == InteractionMode::Idle {
            return None;
        }

        if let (Some(rect), Some(image)) = (self.rect, transform.original_size()) {
            self.rect = Some(rect.clamp_to_image(image));
        }

        debug!(mode = %self.mode, rect = ?self.rect, "selection drag finished");
        self.abort_drag();
        Some(self.rect.is_some())
    }

    /// Cursor feedback for a hover position while no button is held.
    pub fn cursor_hint(&self, pos: Point, transform: &ViewportTransform) -> CursorHint {
        match self.mode {
            InteractionMode::Resizing(h) => return CursorHint::Resize(h),
            InteractionMode::Moving => return CursorHint::Move,
            InteractionMode::Drawing => return CursorHint::Crosshair,
            InteractionMode::Idle => {}
        }
        if !self.enabled {
            return CursorHint::Default;
        }
        if let Some(h) = self.handle_at(pos, transform) {
            CursorHint::Resize(h)
        } else if self.contains(pos, transform) {
            CursorHint::Move
        } else {
            CursorHint::Crosshair
        }
    }
}

/// Snapshot translated by a display delta converted to original pixels.
fn moved_rect(snapshot: ImageRect, start: Point, pos: Point, scale: f32) -> ImageRect {
    let dx = (pos.x - start.x) as f32 / scale;
    let dy = (pos.y - start.y) as f32 / scale;
    ImageRect::new(
        (snapshot.x as f32 + dx) as i32,
        (snapshot.y as f32 + dy) as i32,
        snapshot.width,
        snapshot.height,
    )
}

/// Snapshot with the edges adjacent to `handle` moved to `pointer`
/// (original coordinates); the opposite edges stay fixed.
fn resized_rect(snapshot: ImageRect, handle: Handle, pointer: Point) -> ImageRect {
    let ImageRect {
        mut x,
        mut y,
        mut width,
        mut height,
    } = snapshot;

    if handle.moves_left() {
        width = snapshot.right() - pointer.x;
        x = pointer.x;
    } else if handle.moves_right() {
        width = pointer.x - x;
    }

    if handle.moves_top() {
        height = snapshot.bottom() - pointer.y;
        y = pointer.y;
    } else if handle.moves_bottom() {
        height = pointer.y - y;
    }

    ImageRect::new(x, y, width, height).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_rect_bottom_right_tracks_pointer() {
        let r = resized_rect(
            ImageRect::new(10, 10, 50, 50),
            Handle::BottomRight,
            Point::new(100, 80),
        );
        assert_eq!(r, ImageRect::new(10, 10, 90, 70));
    }

    #[test]
    fn test_resized_rect_top_edge_keeps_bottom_fixed() {
        let r = resized_rect(ImageRect::new(10, 10, 50, 50), Handle::Top, Point::new(999, 30));
        assert_eq!(r, ImageRect::new(10, 30, 50, 30));
    }

    #[test]
    fn test_resized_rect_left_past_right_normalizes() {
        let r = resized_rect(ImageRect::new(10, 10, 50, 50), Handle::Left, Point::new(80, 0));
        assert_eq!(r, ImageRect::new(60, 10, 20, 50));
    }

    #[test]
    fn test_moved_rect_divides_by_scale() {
        let r = moved_rect(
            ImageRect::new(10, 10, 30, 30),
            Point::new(0, 0),
            Point::new(20, -10),
            2.0,
        );
        assert_eq!(r, ImageRect::new(20, 5, 30, 30));
    }

    #[test]
    fn test_handle_index_round_trip() {
        for (i, h) in Handle::ALL.iter().enumerate() {
            assert_eq!(h.index(), i);
            assert_eq!(Handle::from_index(i), Some(*h));
        }
        assert_eq!(Handle::from_index(8), None);
    }
}
