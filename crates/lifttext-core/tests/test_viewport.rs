use approx::assert_relative_eq;

use lifttext_core::consts::{MAX_ZOOM, MIN_BASE_SCALE, MIN_ZOOM};
use lifttext_core::geometry::{ImageRect, Point, Rect, Size, Vector};
use lifttext_core::viewport::{display_polygon_of, display_rect_of, ViewportTransform};

fn transform(widget: (u32, u32), image: (u32, u32)) -> ViewportTransform {
    let mut t = ViewportTransform::new(Size::new(widget.0, widget.1));
    t.set_original_image(Size::new(image.0, image.1));
    t
}

// ---------------------------------------------------------------------------
// Fit and centring
// ---------------------------------------------------------------------------

#[test]
fn test_large_image_is_scaled_down_to_fit() {
    let t = transform((800, 600), (1600, 1200));
    assert_relative_eq!(t.base_scale(), 0.5);
    assert_eq!(t.display_size(), Size::new(800, 600));
    assert_eq!(t.display_origin(), Vector::ZERO);
}

#[test]
fn test_fit_uses_the_tighter_axis() {
    let t = transform((800, 600), (1000, 700));
    assert_relative_eq!(t.base_scale(), 0.8);
    assert_eq!(t.display_size(), Size::new(800, 560));
    assert_relative_eq!(t.display_origin().y, 20.0, epsilon = 1e-3);
}

#[test]
fn test_small_image_is_never_upscaled() {
    let t = transform((800, 600), (400, 300));
    assert_relative_eq!(t.base_scale(), 1.0);
    assert_eq!(t.to_display(0, 0), Point::new(200, 150));
    assert_eq!(t.image_display_rect(), Some(Rect::new(200, 150, 400, 300)));
}

#[test]
fn test_collapsed_widget_keeps_positive_scale() {
    let t = transform((0, 0), (400, 300));
    assert_relative_eq!(t.base_scale(), MIN_BASE_SCALE);
    let p = t.to_original(10, 10);
    assert!(p.x > 0 && p.y > 0);
}

#[test]
fn test_widget_resize_recomputes_fit() {
    let mut t = transform((800, 600), (1600, 1200));
    t.set_widget_size(Size::new(400, 300));
    assert_relative_eq!(t.base_scale(), 0.25);
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

#[test]
fn test_to_display_and_back_at_half_scale() {
    let t = transform((800, 600), (1600, 1200));
    assert_eq!(t.to_display(100, 100), Point::new(50, 50));
    assert_eq!(t.to_original(50, 50), Point::new(100, 100));
}

#[test]
fn test_conversions_include_pan() {
    let mut t = transform((800, 600), (1600, 1200));
    t.pan_by(30.0, -10.0);
    assert_eq!(t.to_display(0, 0), Point::new(30, -10));
    assert_eq!(t.to_original(30, -10), Point::new(0, 0));
}

#[test]
fn test_to_original_without_image_is_origin() {
    let t = ViewportTransform::new(Size::new(800, 600));
    assert!(!t.has_image());
    assert_eq!(t.to_original(123, 456), Point::new(0, 0));
    assert_eq!(t.image_display_rect(), None);
}

#[test]
fn test_zero_sized_image_counts_as_no_image() {
    let t = transform((800, 600), (0, 100));
    assert!(!t.has_image());
}

const ROUND_TRIP_ZOOMS: [f32; 6] = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0];
const ROUND_TRIP_PANS: [(f32, f32); 4] = [(0.0, 0.0), (35.0, 12.0), (-3000.0, -1500.0), (123.4, -77.7)];

/// `count` evenly spaced integers in `[start, start + len)`.
fn samples(start: i32, len: i32, count: i32) -> Vec<i32> {
    let step = (len / count).max(1);
    (0..len.max(1)).step_by(step as usize).map(|i| start + i).collect()
}

/// Round trip through the coarser space: display pixels when the image is
/// shown at or below its size, original pixels when it is magnified.
fn assert_round_trip_within_one_pixel(t: &ViewportTransform) {
    let ctx = format!("zoom {} pan {:?} scale {}", t.zoom(), t.pan(), t.scale_factor());
    if t.scale_factor() <= 1.0 {
        let rect = t.image_display_rect().unwrap();
        for dx in samples(rect.x, rect.width, 17) {
            for dy in samples(rect.y, rect.height, 13) {
                let o = t.to_original(dx, dy);
                let back = t.to_display(o.x, o.y);
                assert!(
                    (back.x - dx).abs() <= 1 && (back.y - dy).abs() <= 1,
                    "{ctx}: ({dx}, {dy}) -> ({}, {}) -> ({}, {})",
                    o.x,
                    o.y,
                    back.x,
                    back.y
                );
            }
        }
    } else {
        let size = t.original_size().unwrap();
        for ox in samples(0, size.width as i32, 17) {
            for oy in samples(0, size.height as i32, 13) {
                let d = t.to_display(ox, oy);
                let back = t.to_original(d.x, d.y);
                assert!(
                    (back.x - ox).abs() <= 1 && (back.y - oy).abs() <= 1,
                    "{ctx}: ({ox}, {oy}) -> ({}, {}) -> ({}, {})",
                    d.x,
                    d.y,
                    back.x,
                    back.y
                );
            }
        }
    }
}

#[test]
fn test_display_original_display_stays_within_one_pixel() {
    let t = transform((800, 600), (1000, 700));
    assert!(t.scale_factor() <= 1.0);
    assert_round_trip_within_one_pixel(&t);
}

#[test]
fn test_round_trip_holds_across_zoom_and_pan() {
    for image in [(1000, 700), (400, 300)] {
        for zoom in ROUND_TRIP_ZOOMS {
            for (px, py) in ROUND_TRIP_PANS {
                let mut t = transform((800, 600), image);
                t.set_zoom(zoom);
                t.set_pan(Vector::new(px, py));
                assert_relative_eq!(t.zoom(), zoom);
                assert_round_trip_within_one_pixel(&t);
            }
        }
    }
}

#[test]
fn test_round_trip_sweep_covers_magnified_images() {
    let mut t = transform((800, 600), (1000, 700));
    t.set_zoom(2.0);
    assert!(t.scale_factor() > 1.0);
    t.set_pan(Vector::new(-3000.0, -1500.0));
    assert_round_trip_within_one_pixel(&t);
}

#[test]
fn test_display_rect_of_scales_size() {
    let t = transform((800, 600), (1600, 1200));
    let r = display_rect_of(&t, &ImageRect::new(200, 100, 400, 60));
    assert_eq!(r, Rect::new(100, 50, 200, 30));
}

#[test]
fn test_display_polygon_of_maps_each_point() {
    let t = transform((800, 600), (1600, 1200));
    let poly = display_polygon_of(&t, &[[10.0, 20.0], [30.0, 20.0], [30.0, 41.0]]);
    assert_eq!(
        poly,
        vec![Point::new(5, 10), Point::new(15, 10), Point::new(15, 20)]
    );
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_in_multiplies_by_step() {
    let mut t = transform((800, 600), (400, 300));
    let z = t.zoom_in().unwrap();
    assert_relative_eq!(z, 1.2);
    assert_relative_eq!(t.scale_factor(), 1.2);
}

#[test]
fn test_zoom_is_clamped() {
    let mut t = transform((800, 600), (400, 300));
    for _ in 0..50 {
        t.zoom_in();
    }
    assert_relative_eq!(t.zoom(), MAX_ZOOM);
    assert_eq!(t.zoom_in(), None);

    for _ in 0..100 {
        t.zoom_out();
    }
    assert_relative_eq!(t.zoom(), MIN_ZOOM);
    assert_eq!(t.zoom_out(), None);
}

#[test]
fn test_zoom_reset_restores_zoom_and_pan() {
    let mut t = transform((800, 600), (400, 300));
    t.zoom_in();
    t.pan_by(15.0, 15.0);
    assert_eq!(t.zoom_reset(), Some(1.0));
    assert_eq!(t.pan(), Vector::ZERO);
}

#[test]
fn test_zoom_without_image_does_nothing() {
    let mut t = ViewportTransform::new(Size::new(800, 600));
    assert_eq!(t.zoom_in(), None);
    assert_eq!(t.zoom_reset(), None);
    assert_relative_eq!(t.zoom(), 1.0);
}

#[test]
fn test_zoom_keeps_image_centred() {
    let mut t = transform((800, 600), (400, 300));
    t.zoom_in();
    let c = t.image_display_rect().unwrap().center();
    assert!((c.x - 400).abs() <= 1 && (c.y - 300).abs() <= 1, "{c:?}");
}

#[test]
fn test_new_image_resets_zoom_and_pan() {
    let mut t = transform((800, 600), (400, 300));
    t.zoom_in();
    t.pan_by(5.0, 5.0);
    t.set_original_image(Size::new(200, 100));
    assert_relative_eq!(t.zoom(), 1.0);
    assert_eq!(t.pan(), Vector::ZERO);
}
