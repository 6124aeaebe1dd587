use crate::app::LiftTextApp;

/// Right-hand panel with the recognized text or the clicked word.
pub fn show(ctx: &egui::Context, app: &mut LiftTextApp) {
    let panel = egui::SidePanel::right("text")
        .default_width(app.prefs.ui.text_panel_width)
        .resizable(true)
        .show(ctx, |ui| {
            let status = app
                .ui_state
                .selected_word
                .as_ref()
                .map(|w| format!("Confidence: {}", w.confidence_label()));
            let title = if app.ui_state.selected_word.is_some() {
                "Selected Word"
            } else {
                "Recognized Text"
            };
            super::section_header(ui, title, status.as_deref());
            ui.add_space(4.0);

            let can_copy = app.ui_state.copy_source().is_some();
            if ui.add_enabled(can_copy, egui::Button::new("Copy")).clicked() {
                app.copy_text(ctx);
            }
            ui.add_space(4.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let text = match app.ui_state.copy_source() {
                    Some(text) => text.to_string(),
                    None if app.is_busy() => "Processing...".to_string(),
                    None => String::new(),
                };
                // Read-only, but selectable for partial copies.
                let mut shown = text.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut shown)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
            });
        });
    app.prefs.ui.text_panel_width = panel.response.rect.width();
}
