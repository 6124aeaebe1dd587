use lifttext_core::ocr::{psm_label, PSM_MODES};

use crate::app::LiftTextApp;

const OPEN: egui::KeyboardShortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const QUIT: egui::KeyboardShortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
const ZOOM_IN: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Equals);
const ZOOM_IN_PLUS: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Plus);
const ZOOM_OUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Minus);
const ZOOM_RESET: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Num0);

pub fn show(ctx: &egui::Context, app: &mut LiftTextApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&OPEN))).clicked() {
                    ui.close();
                    app.open_file();
                }

                let can_copy = app.ui_state.copy_source().is_some();
                if ui.add_enabled(can_copy, egui::Button::new("Copy Text").shortcut_text("Ctrl+C")).clicked() {
                    ui.close();
                    app.copy_text(ctx);
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&QUIT))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let has_image = app.viewport.viewer.has_image();
                if ui.add_enabled(has_image, egui::Button::new("Zoom In").shortcut_text(ctx.format_shortcut(&ZOOM_IN))).clicked() {
                    app.viewport.viewer.zoom_in();
                }
                if ui.add_enabled(has_image, egui::Button::new("Zoom Out").shortcut_text(ctx.format_shortcut(&ZOOM_OUT))).clicked() {
                    app.viewport.viewer.zoom_out();
                }
                if ui.add_enabled(has_image, egui::Button::new("Reset Zoom").shortcut_text(ctx.format_shortcut(&ZOOM_RESET))).clicked() {
                    ui.close();
                    app.viewport.viewer.zoom_reset();
                }
            });

            ui.menu_button("Settings", |ui| settings_menu(ctx, ui, app));

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN)) {
            app.open_file();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&ZOOM_IN) || i.consume_shortcut(&ZOOM_IN_PLUS)) {
            app.viewport.viewer.zoom_in();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&ZOOM_OUT)) {
            app.viewport.viewer.zoom_out();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&ZOOM_RESET)) {
            app.viewport.viewer.zoom_reset();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        // Ctrl+C arrives as a copy event; leave it to text widgets that have focus.
        let copy_requested = ctx.input(|i| i.events.iter().any(|e| matches!(e, egui::Event::Copy)));
        if copy_requested && ctx.memory(|m| m.focused().is_none()) {
            app.copy_text(ctx);
        }
    });
}

fn settings_menu(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut LiftTextApp) {
    ui.label("OCR language");
    let response = ui.add(
        egui::TextEdit::singleline(&mut app.prefs.ocr.language)
            .hint_text("eng")
            .desired_width(120.0),
    );
    if response.lost_focus() {
        if app.prefs.ocr.language.trim().is_empty() {
            app.prefs.ocr.language = "eng".into();
        }
        app.save_preferences();
    }

    ui.add_space(4.0);
    let before = app.prefs.ocr.psm;
    egui::ComboBox::from_label("Page segmentation")
        .selected_text(psm_label(app.prefs.ocr.psm))
        .show_ui(ui, |ui| {
            for &(psm, label) in PSM_MODES {
                ui.selectable_value(&mut app.prefs.ocr.psm, psm, format!("{psm}: {label}"));
            }
        });
    if app.prefs.ocr.psm != before {
        app.save_preferences();
    }

    ui.separator();

    let mut dark = app.prefs.ui.dark_mode;
    if ui.checkbox(&mut dark, "Dark mode").changed() {
        app.set_dark_mode(ctx, dark);
    }
}
