use crate::app::LiftTextApp;
use crate::messages::PageNav;

pub(super) fn pdf_section(ui: &mut egui::Ui, app: &mut LiftTextApp) {
    let Some((current, total)) = app.ui_state.pdf_page else {
        return;
    };
    super::section_header(ui, "PDF", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.add_enabled(current > 1, egui::Button::new("<")).clicked() {
            app.show_page(PageNav::Prev);
        }
        ui.label(format!("Page {current} of {total}"));
        if ui.add_enabled(current < total, egui::Button::new(">")).clicked() {
            app.show_page(PageNav::Next);
        }
    });
}
