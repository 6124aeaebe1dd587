use crate::app::LiftTextApp;

pub fn show(ctx: &egui::Context, app: &mut LiftTextApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if app.is_busy() {
            let percent = app.ui_state.progress_percent;
            let detail = match app.ui_state.running_stage {
                Some(stage) => format!("{stage}... {percent}%"),
                None => "Starting OCR...".to_string(),
            };
            ui.add(
                egui::ProgressBar::new(f32::from(percent) / 100.0)
                    .text(detail)
                    .animate(true),
            );
        } else {
            // Invisible placeholder: same height, no animation
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(size) = app.ui_state.image_size {
                ui.label(format!("{}x{}", size.width, size.height));
                ui.separator();
            }
            let transform = app.viewport.viewer.transform();
            ui.label(format!("Zoom: {:.0}%", transform.zoom() * 100.0));
            if let Some(rect) = app.viewport.viewer.selection_rect() {
                ui.separator();
                ui.label(format!("Selection: {rect}"));
            }
        });

        ui.add_space(2.0);
    });
}
