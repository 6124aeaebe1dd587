mod common;

use lifttext_core::geometry::{ImageRect, Point, Size};
use lifttext_core::ocr::scan_region;
use lifttext_core::selection::{
    CursorHint, Handle, InteractionMode, PressOutcome, SelectionController,
};
use lifttext_core::viewport::ViewportTransform;

use common::identity_transform;

fn enabled() -> SelectionController {
    let mut s = SelectionController::new();
    s.set_enabled(true);
    s
}

fn draw(s: &mut SelectionController, t: &ViewportTransform, from: (i32, i32), to: (i32, i32)) {
    assert_eq!(s.press(Point::new(from.0, from.1), t), PressOutcome::Drawing);
    s.drag(Point::new(to.0, to.1), t);
    assert_eq!(s.release(t), Some(true));
}

// ---------------------------------------------------------------------------
// ImageRect
// ---------------------------------------------------------------------------

#[test]
fn test_image_rect_parse() {
    let r: ImageRect = "10, 20, 30, 40".parse().unwrap();
    assert_eq!(r, ImageRect::new(10, 20, 30, 40));
    assert!("1,2,3".parse::<ImageRect>().is_err());
    assert!("1,2,0,4".parse::<ImageRect>().is_err());
    assert!("a,2,3,4".parse::<ImageRect>().is_err());
}

#[test]
fn test_image_rect_display() {
    assert_eq!(ImageRect::new(10, 10, 100, 50).to_string(), "100x50 at (10, 10)");
}

#[test]
fn test_image_rect_normalized() {
    let r = ImageRect::new(50, 50, -20, -30).normalized();
    assert_eq!(r, ImageRect::new(30, 20, 20, 30));
}

#[test]
fn test_clamp_to_image_trims_overhang() {
    let r = ImageRect::new(350, 250, 200, 200).clamp_to_image(Size::new(400, 300));
    assert_eq!(r, ImageRect::new(350, 250, 50, 50));
}

#[test]
fn test_clamp_to_image_keeps_one_pixel_minimum() {
    let r = ImageRect::new(500, 400, 10, 10).clamp_to_image(Size::new(400, 300));
    assert_eq!(r, ImageRect::new(399, 299, 1, 1));
}

#[test]
fn test_validity_threshold() {
    assert!(ImageRect::new(0, 0, 20, 20).is_valid());
    assert!(!ImageRect::new(0, 0, 19, 50).is_valid());
    assert!(!ImageRect::new(0, 0, 20, 19).is_valid());
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

#[test]
fn test_draw_selection() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    assert_eq!(s.selection(), Some(ImageRect::new(10, 10, 100, 50)));
    assert!(s.is_valid());
    assert_eq!(s.mode(), InteractionMode::Idle);
}

#[test]
fn test_draw_in_reverse_direction() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (110, 60), (10, 10));
    assert_eq!(s.selection(), Some(ImageRect::new(10, 10, 100, 50)));
}

#[test]
fn test_draw_past_image_edge_is_clamped_on_release() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (350, 250), (500, 400));
    assert_eq!(s.selection(), Some(ImageRect::new(350, 250, 50, 50)));
}

#[test]
fn test_draw_into_negative_coordinates_is_clamped() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (50, 50), (-30, -20));
    assert_eq!(s.selection(), Some(ImageRect::new(0, 0, 80, 70)));
}

#[test]
fn test_tiny_selection_is_kept_but_not_scanned() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (20, 20));
    assert!(s.has_selection());
    assert!(!s.is_valid());
    assert_eq!(scan_region(s.selection()), None);
}

#[test]
fn test_valid_selection_is_scanned() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    assert_eq!(scan_region(s.selection()), Some(ImageRect::new(10, 10, 100, 50)));
}

#[test]
fn test_new_draw_replaces_selection() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    draw(&mut s, &t, (200, 200), (260, 250));
    assert_eq!(s.selection(), Some(ImageRect::new(200, 200, 60, 50)));
}

#[test]
fn test_draw_without_image_does_not_create_rect() {
    let t = ViewportTransform::new(Size::new(400, 300));
    let mut s = enabled();
    s.press(Point::new(10, 10), &t);
    assert!(!s.drag(Point::new(100, 100), &t));
    assert_eq!(s.release(&t), Some(false));
    assert_eq!(s.selection(), None);
}

// ---------------------------------------------------------------------------
// Mode gating
// ---------------------------------------------------------------------------

#[test]
fn test_press_ignored_when_disabled() {
    let t = identity_transform(400, 300);
    let mut s = SelectionController::new();
    assert_eq!(s.press(Point::new(10, 10), &t), PressOutcome::NotHandled);
    assert_eq!(s.mode(), InteractionMode::Idle);
}

#[test]
fn test_second_press_during_drag_is_rejected() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    s.press(Point::new(10, 10), &t);
    assert_eq!(s.press(Point::new(50, 50), &t), PressOutcome::Rejected);
    assert_eq!(s.mode(), InteractionMode::Drawing);
}

#[test]
fn test_disabling_clears_selection_and_aborts_drag() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    s.press(Point::new(60, 35), &t);
    assert!(s.set_enabled(false));
    assert_eq!(s.selection(), None);
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert_eq!(s.release(&t), None);
}

#[test]
fn test_release_without_drag_is_ignored() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    assert_eq!(s.release(&t), None);
}

// ---------------------------------------------------------------------------
// Move and resize
// ---------------------------------------------------------------------------

#[test]
fn test_move_inside_selection() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    assert_eq!(s.press(Point::new(50, 30), &t), PressOutcome::Moving);
    assert!(s.drag(Point::new(70, 40), &t));
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(30, 20, 100, 50)));
}

#[test]
fn test_move_converts_delta_through_scale() {
    // 800x600 image in a 400x300 view: half scale.
    let mut t = ViewportTransform::new(Size::new(400, 300));
    t.set_original_image(Size::new(800, 600));
    let mut s = enabled();
    s.set_selection(Some(ImageRect::new(100, 100, 100, 100)));

    assert_eq!(s.press(Point::new(70, 65), &t), PressOutcome::Moving);
    s.drag(Point::new(80, 65), &t);
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(120, 100, 100, 100)));
}

#[test]
fn test_move_past_edge_is_clamped() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    s.press(Point::new(50, 30), &t);
    s.drag(Point::new(0, 0), &t);
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(0, 0, 100, 50)));
}

#[test]
fn test_resize_from_bottom_right_handle() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    assert_eq!(
        s.press(Point::new(110, 60), &t),
        PressOutcome::Resizing(Handle::BottomRight)
    );
    s.drag(Point::new(150, 100), &t);
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(10, 10, 140, 90)));
}

#[test]
fn test_resize_from_left_edge_keeps_right_fixed() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    assert_eq!(
        s.press(Point::new(10, 35), &t),
        PressOutcome::Resizing(Handle::Left)
    );
    s.drag(Point::new(40, 0), &t);
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(40, 10, 70, 50)));
}

#[test]
fn test_top_right_handle_dragged_past_left_edge_normalizes_mid_drag() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    s.set_selection(Some(ImageRect::new(100, 50, 100, 100)));
    assert_eq!(
        s.press(Point::new(200, 50), &t),
        PressOutcome::Resizing(Handle::TopRight)
    );
    s.drag(Point::new(60, 20), &t);
    assert_eq!(s.selection(), Some(ImageRect::new(60, 20, 40, 130)));
}

#[test]
fn test_press_during_resize_does_not_start_drawing() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    s.set_selection(Some(ImageRect::new(100, 50, 100, 100)));
    s.press(Point::new(200, 150), &t);
    assert_eq!(s.mode(), InteractionMode::Resizing(Handle::BottomRight));

    assert_eq!(s.press(Point::new(350, 280), &t), PressOutcome::Rejected);
    assert_eq!(s.mode(), InteractionMode::Resizing(Handle::BottomRight));
    assert_eq!(s.selection(), Some(ImageRect::new(100, 50, 100, 100)));
}

#[test]
fn test_draw_on_zoomed_view_matches_inverse_transform() {
    let mut t = ViewportTransform::new(Size::new(400, 300));
    t.set_original_image(Size::new(400, 100));
    assert_eq!(t.set_zoom(2.0), Some(2.0));

    let mut s = enabled();
    draw(&mut s, &t, (100, 100), (300, 150));

    let a = t.to_original(100, 100);
    let b = t.to_original(300, 150);
    let expected = ImageRect::from_corners(a, b).clamp_to_image(Size::new(400, 100));
    assert_eq!(s.selection(), Some(expected));
    assert_eq!(expected, ImageRect::new(150, 25, 100, 25));
}

#[test]
fn test_resize_through_opposite_edge_flips() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    draw(&mut s, &t, (10, 10), (110, 60));
    s.press(Point::new(60, 10), &t);
    assert_eq!(s.mode(), InteractionMode::Resizing(Handle::Top));
    s.drag(Point::new(60, 90), &t);
    s.release(&t);
    assert_eq!(s.selection(), Some(ImageRect::new(10, 60, 100, 30)));
}

// ---------------------------------------------------------------------------
// Handles and cursor
// ---------------------------------------------------------------------------

#[test]
fn test_handle_rects_follow_rect_in_order() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    s.set_selection(Some(ImageRect::new(10, 10, 100, 50)));
    let rects = s.handle_rects(&t).unwrap();
    let centres: Vec<Point> = rects.iter().map(|r| r.center()).collect();
    assert_eq!(
        centres,
        vec![
            Point::new(10, 10),
            Point::new(60, 10),
            Point::new(110, 10),
            Point::new(110, 35),
            Point::new(110, 60),
            Point::new(60, 60),
            Point::new(10, 60),
            Point::new(10, 35),
        ]
    );
}

#[test]
fn test_no_handles_without_selection() {
    let t = identity_transform(400, 300);
    assert!(enabled().handle_rects(&t).is_none());
}

#[test]
fn test_cursor_hints() {
    let t = identity_transform(400, 300);
    let mut s = enabled();
    assert_eq!(s.cursor_hint(Point::new(5, 5), &t), CursorHint::Crosshair);

    s.set_selection(Some(ImageRect::new(10, 10, 100, 50)));
    assert_eq!(
        s.cursor_hint(Point::new(111, 11), &t),
        CursorHint::Resize(Handle::TopRight)
    );
    assert_eq!(s.cursor_hint(Point::new(50, 30), &t), CursorHint::Move);
    assert_eq!(s.cursor_hint(Point::new(300, 200), &t), CursorHint::Crosshair);

    s.set_enabled(false);
    assert_eq!(s.cursor_hint(Point::new(50, 30), &t), CursorHint::Default);
}
