use crate::app::{file_name, LiftTextApp};

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut LiftTextApp) {
    super::section_header(ui, "File", None);
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        app.open_file();
    }

    if let Some(ref path) = app.ui_state.source_path {
        ui.label(file_name(path));
    }
    if let Some(size) = app.ui_state.image_size {
        ui.small(format!("{}x{} px", size.width, size.height));
    }
}
