use lifttext_core::geometry::{Point, Size};
use lifttext_core::selection::{CursorHint, Handle, InteractionMode};
use lifttext_core::viewer::{PointerButton, Viewer};

use super::overlay;
use crate::app::LiftTextApp;

pub fn show(ctx: &egui::Context, app: &mut LiftTextApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        let viewer = &mut app.viewport.viewer;
        viewer.set_widget_size(Size::new(
            rect.width().max(0.0) as u32,
            rect.height().max(0.0) as u32,
        ));

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let Some(texture_id) = texture_id.filter(|_| viewer.has_image()) else {
            show_placeholder(ui, rect);
            return;
        };

        handle_zoom(ui, &response, viewer);
        route_pointer(ui, &response, rect, viewer);

        if let Some(image_rect) = viewer.transform().image_display_rect() {
            draw_image(ui, texture_id, overlay::to_screen_rect(rect.min, image_rect));
        }

        let painter = ui.painter_at(rect);
        overlay::draw_words(&painter, rect.min, viewer);
        overlay::draw_selection(&painter, rect, viewer);

        update_cursor(ctx, &response, rect, viewer);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Scroll wheel zooms by one step per notch.
fn handle_zoom(ui: &egui::Ui, response: &egui::Response, viewer: &mut Viewer) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    if scroll_delta > 0.0 {
        viewer.zoom_in();
    } else {
        viewer.zoom_out();
    }
}

fn to_local(rect: egui::Rect, pos: egui::Pos2) -> Point {
    let local = pos - rect.min;
    Point::new(local.x.floor() as i32, local.y.floor() as i32)
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn is_dragging(viewer: &Viewer) -> bool {
    viewer.is_panning() || viewer.selection().mode() != InteractionMode::Idle
}

/// Feed raw pointer events to the viewer. Presses only count inside the
/// viewport; moves and releases keep flowing while a drag is active.
fn route_pointer(ui: &egui::Ui, response: &egui::Response, rect: egui::Rect, viewer: &mut Viewer) {
    let events = ui.input(|i| i.events.clone());
    for event in events {
        match event {
            egui::Event::PointerMoved(pos) => {
                if rect.contains(pos) || is_dragging(viewer) {
                    viewer.pointer_moved(to_local(rect, pos));
                } else {
                    viewer.pointer_left();
                }
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                if !pressed {
                    viewer.pointer_released(to_local(rect, pos), button);
                } else if rect.contains(pos) && response.contains_pointer() {
                    viewer.pointer_pressed(to_local(rect, pos), button);
                }
            }
            egui::Event::PointerGone => viewer.pointer_left(),
            _ => {}
        }
    }
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn update_cursor(ctx: &egui::Context, response: &egui::Response, rect: egui::Rect, viewer: &Viewer) {
    let Some(hover) = ctx.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    if !response.contains_pointer() && !is_dragging(viewer) {
        return;
    }
    let icon = match viewer.cursor_hint(to_local(rect, hover)) {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
        CursorHint::Move => egui::CursorIcon::Move,
        CursorHint::Grabbing => egui::CursorIcon::Grabbing,
        CursorHint::PointingHand => egui::CursorIcon::PointingHand,
        CursorHint::Resize(Handle::TopLeft | Handle::BottomRight) => egui::CursorIcon::ResizeNwSe,
        CursorHint::Resize(Handle::TopRight | Handle::BottomLeft) => egui::CursorIcon::ResizeNeSw,
        CursorHint::Resize(Handle::Top | Handle::Bottom) => egui::CursorIcon::ResizeVertical,
        CursorHint::Resize(Handle::Left | Handle::Right) => egui::CursorIcon::ResizeHorizontal,
    };
    ctx.set_cursor_icon(icon);
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open an image or PDF to begin",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
