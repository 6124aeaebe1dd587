use lifttext_core::consts::MIN_SELECTION_SIZE;
use lifttext_core::ocr::psm_label;

use crate::app::LiftTextApp;

pub(super) fn ocr_section(ui: &mut egui::Ui, app: &mut LiftTextApp) {
    let status = app.is_busy().then_some("running");
    super::section_header(ui, "OCR", status);
    ui.add_space(4.0);

    let enabled = app.has_image() && !app.is_busy();

    ui.add_enabled_ui(enabled, |ui| {
        if ui
            .add_sized([ui.available_width(), 24.0], egui::Button::new("Process Image"))
            .clicked()
        {
            app.process(false);
        }

        ui.add_space(4.0);
        let mut select_mode = app.viewport.viewer.selection().is_enabled();
        if ui
            .toggle_value(&mut select_mode, "Select Area")
            .on_hover_text("Left-drag on the image to select a region")
            .changed()
        {
            app.viewport.viewer.set_selection_mode(select_mode);
        }
    });

    if app.viewport.viewer.selection().is_enabled() {
        let selection = app.viewport.viewer.selection_rect();
        let valid = selection.is_some_and(|r| r.is_valid());

        ui.add_space(4.0);
        match selection {
            Some(rect) => {
                ui.small(format!("Selection: {rect}"));
                if !valid {
                    ui.small(
                        egui::RichText::new(format!(
                            "Minimum size is {MIN_SELECTION_SIZE}x{MIN_SELECTION_SIZE} px"
                        ))
                        .color(ui.visuals().warn_fg_color),
                    );
                }
            }
            None => {
                ui.small("Left-drag on the image to select a region");
            }
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(enabled && valid, egui::Button::new("Process Selection"))
                .clicked()
            {
                app.process(true);
            }
            if ui
                .add_enabled(selection.is_some(), egui::Button::new("Clear Selection"))
                .clicked()
            {
                // Clearing also leaves selection mode, back to word clicks.
                app.viewport.viewer.set_selection_mode(false);
            }
        });
    }

    ui.add_space(8.0);
    ui.small(format!(
        "Language: {}, mode: {}",
        app.prefs.ocr.language,
        psm_label(app.prefs.ocr.psm)
    ));
}
