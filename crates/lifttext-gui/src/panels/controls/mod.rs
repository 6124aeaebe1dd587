mod file;
mod ocr;
mod pdf;

use super::section_header;

pub fn show(ctx: &egui::Context, app: &mut crate::app::LiftTextApp) {
    let panel = egui::SidePanel::left("controls")
        .default_width(app.prefs.ui.side_panel_width)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                file::file_section(ui, app);
                if app.ui_state.pdf_page.is_some() {
                    ui.separator();
                    pdf::pdf_section(ui, app);
                }
                ui.separator();
                ocr::ocr_section(ui, app);
            });
        });
    app.prefs.ui.side_panel_width = panel.response.rect.width();
}
