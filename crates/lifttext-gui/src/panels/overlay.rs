use lifttext_core::consts::MIN_SELECTION_SIZE;
use lifttext_core::geometry::{Point, Rect};
use lifttext_core::viewer::Viewer;

const WORD_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
const HOVER_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 180, 255);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 100, 255);
const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
const INVALID_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 60, 60);

/// Labels are only drawn when the selection is at least this large on screen.
const LABEL_MIN_WIDTH: i32 = 60;
const LABEL_MIN_HEIGHT: i32 = 30;

pub(super) fn to_screen(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

pub(super) fn to_screen_rect(origin: egui::Pos2, r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        to_screen(origin, Point::new(r.x, r.y)),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

/// Outline every recognized word; the hovered and selected ones get a fill.
pub(super) fn draw_words(painter: &egui::Painter, origin: egui::Pos2, viewer: &Viewer) {
    let words = viewer.words();
    let transform = viewer.transform();

    for (i, word) in words.words().iter().enumerate() {
        let Some(polygon) = word.display_polygon(transform) else {
            continue;
        };
        let points: Vec<egui::Pos2> = polygon.into_iter().map(|p| to_screen(origin, p)).collect();

        let (fill, stroke) = if words.selected() == Some(i) {
            (
                SELECTED_COLOR.gamma_multiply(0.3),
                egui::Stroke::new(2.0, SELECTED_COLOR),
            )
        } else if words.hovered() == Some(i) {
            (
                HOVER_COLOR.gamma_multiply(0.3),
                egui::Stroke::new(2.0, HOVER_COLOR),
            )
        } else {
            (egui::Color32::TRANSPARENT, egui::Stroke::new(1.0, WORD_COLOR))
        };

        if fill != egui::Color32::TRANSPARENT {
            painter.add(egui::Shape::convex_polygon(points.clone(), fill, egui::Stroke::NONE));
        }
        painter.add(egui::Shape::closed_line(points, stroke));
    }
}

/// Dim everything outside the selection, then draw its border, handles and size label.
pub(super) fn draw_selection(painter: &egui::Painter, viewport: egui::Rect, viewer: &Viewer) {
    let transform = viewer.transform();
    let selection = viewer.selection();
    let (Some(display), Some(image_rect)) = (selection.display_rect(transform), selection.selection())
    else {
        return;
    };
    let screen = to_screen_rect(viewport.min, display);
    let valid = selection.is_valid();

    draw_dim_regions(painter, viewport, screen);

    if valid {
        painter.rect_stroke(
            screen,
            0.0,
            egui::Stroke::new(2.0, SELECTION_COLOR),
            egui::epaint::StrokeKind::Middle,
        );
    } else {
        let corners = [
            screen.left_top(),
            screen.right_top(),
            screen.right_bottom(),
            screen.left_bottom(),
            screen.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &corners,
            egui::Stroke::new(2.0, INVALID_COLOR),
            6.0,
            4.0,
        ));
    }

    if let Some(handles) = selection.handle_rects(transform) {
        for handle in handles {
            let r = to_screen_rect(viewport.min, handle);
            painter.rect_filled(r, 0.0, SELECTION_COLOR);
            painter.rect_stroke(
                r,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::WHITE),
                egui::epaint::StrokeKind::Inside,
            );
        }
    }

    if display.width > LABEL_MIN_WIDTH && display.height > LABEL_MIN_HEIGHT {
        let color = if valid { SELECTION_COLOR } else { INVALID_COLOR };
        painter.text(
            screen.left_top() + egui::vec2(6.0, 6.0),
            egui::Align2::LEFT_TOP,
            format!("{} x {}", image_rect.width, image_rect.height),
            egui::FontId::proportional(12.0),
            color,
        );
    }

    if !valid {
        painter.text(
            screen.left_bottom() + egui::vec2(0.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!("Min: {MIN_SELECTION_SIZE}px"),
            egui::FontId::proportional(12.0),
            INVALID_COLOR,
        );
    }
}

fn draw_dim_regions(painter: &egui::Painter, viewport: egui::Rect, sel: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(100);
    let sel = sel.intersect(viewport);
    if !sel.is_positive() {
        painter.rect_filled(viewport, 0.0, dim_color);
        return;
    }

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(viewport.left_top(), egui::pos2(viewport.right(), sel.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(viewport.left(), sel.bottom()), viewport.right_bottom()),
        0.0,
        dim_color,
    );
    // Left (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(viewport.left(), sel.top()),
            egui::pos2(sel.left(), sel.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(sel.right(), sel.top()),
            egui::pos2(viewport.right(), sel.bottom()),
        ),
        0.0,
        dim_color,
    );
}
