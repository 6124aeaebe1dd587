mod common;

use lifttext_core::geometry::{point_in_polygon, Point};
use lifttext_core::words::{WordBoxIndex, WordClick, WordEntry};

use common::{identity_transform, square};

fn word(index: usize, text: &str, polygon: Option<Vec<[f32; 2]>>) -> WordEntry {
    WordEntry {
        index,
        text: text.to_string(),
        confidence: Some(0.5),
        polygon,
    }
}

fn index_with(words: Vec<WordEntry>) -> WordBoxIndex {
    let mut idx = WordBoxIndex::new();
    idx.set_words(words);
    idx
}

// ---------------------------------------------------------------------------
// Point in polygon
// ---------------------------------------------------------------------------

#[test]
fn test_point_in_square() {
    let sq: Vec<Point> = [(0, 0), (10, 0), (10, 10), (0, 10)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
    assert!(point_in_polygon(Point::new(5, 5), &sq));
    assert!(!point_in_polygon(Point::new(15, 5), &sq));
    assert!(!point_in_polygon(Point::new(5, -1), &sq));
}

#[test]
fn test_point_in_triangle() {
    let tri = [Point::new(0, 0), Point::new(20, 0), Point::new(0, 20)];
    assert!(point_in_polygon(Point::new(4, 4), &tri));
    assert!(!point_in_polygon(Point::new(15, 15), &tri));
}

#[test]
fn test_degenerate_polygon_never_contains() {
    let line = [Point::new(0, 0), Point::new(10, 10)];
    assert!(!point_in_polygon(Point::new(5, 5), &line));
    assert!(!point_in_polygon(Point::new(0, 0), &[]));
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

#[test]
fn test_hit_test_finds_word() {
    let t = identity_transform(400, 300);
    let idx = index_with(vec![
        word(0, "hello", Some(square(10.0, 10.0, 20.0))),
        word(1, "world", Some(square(50.0, 10.0, 20.0))),
    ]);
    assert_eq!(idx.hit_test(Point::new(60, 20), &t).unwrap().text, "world");
    assert!(idx.hit_test(Point::new(40, 20), &t).is_none());
}

#[test]
fn test_overlapping_words_prefer_the_later_one() {
    let t = identity_transform(400, 300);
    let idx = index_with(vec![
        word(0, "under", Some(square(10.0, 10.0, 40.0))),
        word(1, "over", Some(square(20.0, 20.0, 10.0))),
    ]);
    assert_eq!(idx.hit_index(Point::new(25, 25), &t), Some(1));
    assert_eq!(idx.hit_index(Point::new(15, 15), &t), Some(0));
}

#[test]
fn test_words_without_usable_polygon_are_never_hit() {
    let t = identity_transform(400, 300);
    let idx = index_with(vec![
        word(0, "nobox", None),
        word(1, "flat", Some(vec![[0.0, 0.0], [100.0, 100.0]])),
    ]);
    assert_eq!(idx.hit_index(Point::new(50, 50), &t), None);
}

#[test]
fn test_hit_test_follows_zoom() {
    let mut t = identity_transform(400, 300);
    let idx = index_with(vec![word(0, "w", Some(square(100.0, 100.0, 20.0)))]);
    assert!(idx.hit_test(Point::new(110, 110), &t).is_some());
    for _ in 0..4 {
        t.zoom_out();
    }
    assert!(idx.hit_test(Point::new(110, 110), &t).is_none());
}

// ---------------------------------------------------------------------------
// Hover and click
// ---------------------------------------------------------------------------

#[test]
fn test_hover_reports_changes_only() {
    let t = identity_transform(400, 300);
    let mut idx = index_with(vec![word(0, "w", Some(square(10.0, 10.0, 20.0)))]);

    let first = idx.hover(Point::new(15, 15), &t);
    assert_eq!(first.index, Some(0));
    assert!(first.changed);

    let same = idx.hover(Point::new(16, 16), &t);
    assert!(!same.changed);

    let away = idx.hover(Point::new(100, 100), &t);
    assert_eq!(away.index, None);
    assert!(away.changed);
}

#[test]
fn test_click_selects_and_empty_click_deselects() {
    let t = identity_transform(400, 300);
    let mut idx = index_with(vec![word(0, "w", Some(square(10.0, 10.0, 20.0)))]);

    match idx.click(Point::new(15, 15), &t) {
        Some(WordClick::Selected(w)) => assert_eq!(w.text, "w"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(idx.selected(), Some(0));

    assert_eq!(idx.click(Point::new(200, 200), &t), Some(WordClick::Deselected));
    assert_eq!(idx.selected(), None);
    assert_eq!(idx.click(Point::new(200, 200), &t), None);
}

#[test]
fn test_new_words_reset_hover_and_selection() {
    let t = identity_transform(400, 300);
    let mut idx = index_with(vec![word(0, "w", Some(square(10.0, 10.0, 20.0)))]);
    idx.hover(Point::new(15, 15), &t);
    idx.click(Point::new(15, 15), &t);

    idx.set_words(vec![word(0, "x", None)]);
    assert_eq!(idx.hovered(), None);
    assert_eq!(idx.selected(), None);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn test_confidence_label() {
    let mut w = word(0, "w", None);
    w.confidence = Some(0.5);
    assert_eq!(w.confidence_label(), "50.00%");
    w.confidence = None;
    assert_eq!(w.confidence_label(), "N/A");
}

#[test]
fn test_full_text_joins_lines() {
    let idx = index_with(vec![word(0, "first", None), word(1, "second", None)]);
    assert_eq!(idx.full_text(), "first\nsecond");
}
