//! Mapping between original image pixels and on-screen display pixels.
//!
//! The display position of an original pixel `o` is
//! `o * scale_factor + display_origin + pan`, where `scale_factor` is the
//! fit-to-widget scale (never above 1) times the user zoom, and
//! `display_origin` centres the scaled image inside the widget.

use tracing::debug;

use crate::consts::{MAX_ZOOM, MIN_BASE_SCALE, MIN_ZOOM, ZOOM_STEP};
use crate::geometry::{ImageRect, Point, Rect, Size, Vector};

#[derive(Clone, Debug)]
pub struct ViewportTransform {
    original_size: Option<Size>,
    widget_size: Size,
    zoom: f32,
    pan: Vector,
    base_scale: f32,
    display_origin: Vector,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            original_size: None,
            widget_size: Size::default(),
            zoom: 1.0,
            pan: Vector::ZERO,
            base_scale: 1.0,
            display_origin: Vector::ZERO,
        }
    }
}

impl ViewportTransform {
    pub fn new(widget_size: Size) -> Self {
        let mut t = Self {
            widget_size,
            ..Self::default()
        };
        t.recompute();
        t
    }

    /// Load a new image: zoom and pan are reset. A zero-area size counts as no image.
    pub fn set_original_image(&mut self, size: Size) {
        self.original_size = if size.is_empty() { None } else { Some(size) };
        self.zoom = 1.0;
        self.pan = Vector::ZERO;
        self.recompute();
    }

    pub fn clear_image(&mut self) {
        self.set_original_image(Size::default());
    }

    pub fn set_widget_size(&mut self, size: Size) {
        if size != self.widget_size {
            self.widget_size = size;
            self.recompute();
        }
    }

    /// Multiply zoom by the step. Returns the new level when it changed.
    pub fn zoom_in(&mut self) -> Option<f32> {
        self.set_zoom_clamped(self.zoom * ZOOM_STEP)
    }

    /// Divide zoom by the step. Returns the new level when it changed.
    pub fn zoom_out(&mut self) -> Option<f32> {
        self.set_zoom_clamped(self.zoom / ZOOM_STEP)
    }

    /// Set an absolute zoom level, clamped. Returns the new level when it changed.
    pub fn set_zoom(&mut self, zoom: f32) -> Option<f32> {
        self.set_zoom_clamped(zoom)
    }

    /// Back to 100% with no pan. Returns the zoom level when an image is loaded.
    pub fn zoom_reset(&mut self) -> Option<f32> {
        self.original_size?;
        self.zoom = 1.0;
        self.pan = Vector::ZERO;
        self.recompute();
        Some(self.zoom)
    }

    fn set_zoom_clamped(&mut self, requested: f32) -> Option<f32> {
        self.original_size?;
        let new_zoom = requested.clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == self.zoom {
            return None;
        }
        debug!(from = self.zoom, to = new_zoom, "zoom changed");
        self.zoom = new_zoom;
        self.recompute();
        Some(new_zoom)
    }

    /// Shift the image by a display-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    pub fn set_pan(&mut self, pan: Vector) {
        self.pan = pan;
    }

    fn recompute(&mut self) {
        let Some(img) = self.original_size else {
            self.base_scale = 1.0;
            self.display_origin = Vector::ZERO;
            return;
        };

        let fit_x = self.widget_size.width as f32 / img.width as f32;
        let fit_y = self.widget_size.height as f32 / img.height as f32;
        self.base_scale = fit_x.min(fit_y).clamp(MIN_BASE_SCALE, 1.0);

        let display = self.display_size_f();
        self.display_origin = Vector::new(
            (self.widget_size.width as f32 - display.x) / 2.0,
            (self.widget_size.height as f32 - display.y) / 2.0,
        );
    }

    fn display_size_f(&self) -> Vector {
        match self.original_size {
            Some(img) => Vector::new(
                img.width as f32 * self.scale_factor(),
                img.height as f32 * self.scale_factor(),
            ),
            None => Vector::ZERO,
        }
    }

    pub fn has_image(&self) -> bool {
        self.original_size.is_some()
    }

    pub fn original_size(&self) -> Option<Size> {
        self.original_size
    }

    pub fn widget_size(&self) -> Size {
        self.widget_size
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn scale_factor(&self) -> f32 {
        self.base_scale * self.zoom
    }

    pub fn display_origin(&self) -> Vector {
        self.display_origin
    }

    /// Size of the scaled image on screen, in whole pixels.
    pub fn display_size(&self) -> Size {
        let s = self.display_size_f();
        Size::new(s.x as u32, s.y as u32)
    }

    /// On-screen rectangle covered by the image (origin plus pan).
    pub fn image_display_rect(&self) -> Option<Rect> {
        self.original_size?;
        let size = self.display_size();
        let origin = self.to_display(0, 0);
        Some(Rect::new(origin.x, origin.y, size.width as i32, size.height as i32))
    }

    pub fn to_display_f(&self, ox: f32, oy: f32) -> (f32, f32) {
        let s = self.scale_factor();
        (
            ox * s + self.display_origin.x + self.pan.x,
            oy * s + self.display_origin.y + self.pan.y,
        )
    }

    pub fn to_original_f(&self, dx: f32, dy: f32) -> (f32, f32) {
        if self.original_size.is_none() {
            return (0.0, 0.0);
        }
        let s = self.scale_factor();
        (
            (dx - self.display_origin.x - self.pan.x) / s,
            (dy - self.display_origin.y - self.pan.y) / s,
        )
    }

    /// Original pixel to display pixel, truncated toward zero.
    pub fn to_display(&self, ox: i32, oy: i32) -> Point {
        let (x, y) = self.to_display_f(ox as f32, oy as f32);
        Point::new(x as i32, y as i32)
    }

    /// Display pixel to original pixel, truncated toward zero.
    /// Without an image this is `(0, 0)`.
    pub fn to_original(&self, dx: i32, dy: i32) -> Point {
        let (x, y) = self.to_original_f(dx as f32, dy as f32);
        Point::new(x as i32, y as i32)
    }

    pub fn point_to_original(&self, p: Point) -> Point {
        self.to_original(p.x, p.y)
    }
}

/// Display-space rectangle of a rect in original coordinates.
pub fn display_rect_of(transform: &ViewportTransform, rect: &ImageRect) -> Rect {
    let origin = transform.to_display(rect.x, rect.y);
    let s = transform.scale_factor();
    Rect::new(
        origin.x,
        origin.y,
        (rect.width as f32 * s) as i32,
        (rect.height as f32 * s) as i32,
    )
}

/// Original polygon points mapped to integer display pixels.
pub fn display_polygon_of(transform: &ViewportTransform, polygon: &[[f32; 2]]) -> Vec<Point> {
    polygon
        .iter()
        .map(|&[x, y]| {
            let (dx, dy) = transform.to_display_f(x, y);
            Point::new(dx as i32, dy as i32)
        })
        .collect()
}
