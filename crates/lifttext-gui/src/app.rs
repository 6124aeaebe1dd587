use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, SendError};
use std::time::Duration;

use image::DynamicImage;
use lifttext_core::geometry::Size;
use lifttext_core::ocr::{scan_region, OcrOrchestrator, OcrOutcome, OcrRequest, RunTicket};
use lifttext_core::pdf::is_pdf_path;
use lifttext_core::settings::Preferences;
use lifttext_core::viewer::{Viewer, ViewerEvent};
use tracing::{debug, warn};

use crate::convert::image_to_color_image;
use crate::messages::{PageNav, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::workers;

pub struct LiftTextApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub orchestrator: OcrOrchestrator,
    pub prefs: Preferences,
    prefs_path: Option<PathBuf>,
    pub show_about: bool,
}

impl LiftTextApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx, ctx.clone());

        let prefs_path = Preferences::default_path();
        let prefs = prefs_path
            .as_deref()
            .map(Preferences::load_or_default)
            .unwrap_or_default();

        ctx.set_visuals(visuals(prefs.ui.dark_mode));
        // Ctrl+=/-/0 zoom the image, not the UI.
        ctx.options_mut(|o| o.zoom_with_keyboard = false);

        Self {
            cmd_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            orchestrator: OcrOrchestrator::new(),
            prefs,
            prefs_path,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded {
                    source,
                    image_path,
                    image,
                    page,
                } => {
                    // A run on the previous image can no longer be applied.
                    self.orchestrator.abandon(&mut self.viewport.viewer);
                    self.ui_state.running_stage = None;

                    let size = Size::new(image.width(), image.height());
                    self.update_viewport_texture(ctx, &image);
                    self.viewport.viewer.load_image(size);

                    self.ui_state.add_log(match page {
                        Some((current, total)) => format!(
                            "{}: page {current} of {total} ({}x{})",
                            file_name(&source),
                            size.width,
                            size.height
                        ),
                        None => format!(
                            "Opened: {} ({}x{})",
                            source.display(),
                            size.width,
                            size.height
                        ),
                    });
                    self.remember_directory(&source);
                    self.ui_state.source_path = Some(source);
                    self.ui_state.image_path = Some(image_path);
                    self.ui_state.pdf_page = page;
                    self.ui_state.result_text.clear();
                    self.ui_state.selected_word = None;
                }
                WorkerResult::OcrProgress { ticket, stage } => {
                    if let Some(percent) = self.orchestrator.progress(ticket, stage) {
                        self.ui_state.running_stage = Some(stage);
                        self.ui_state.progress_percent = percent;
                    }
                }
                WorkerResult::OcrComplete {
                    ticket,
                    result,
                    elapsed,
                } => match self
                    .orchestrator
                    .finish(ticket, result, &mut self.viewport.viewer)
                {
                    Ok(Some(outcome)) => self.apply_outcome(ctx, outcome, elapsed),
                    Ok(None) => {}
                    Err(e) => {
                        self.ui_state.running_stage = None;
                        self.ui_state.result_text.clear();
                        self.ui_state.add_log(format!("ERROR: OCR failed: {e}"));
                    }
                },
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn apply_outcome(&mut self, ctx: &egui::Context, outcome: OcrOutcome, elapsed: Duration) {
        self.ui_state.running_stage = None;
        if let Some(ref cleaned) = outcome.preprocessed {
            self.update_viewport_texture(ctx, cleaned);
        }

        let scope = match outcome.crop {
            Some(rect) => format!("selection {rect}"),
            None => "full image".to_string(),
        };
        if outcome.found_text() {
            self.ui_state.add_log(format!(
                "Found {} words in {scope} ({})",
                outcome.words.len(),
                format_duration(elapsed)
            ));
        } else {
            self.ui_state.add_log(format!("{} ({scope})", outcome.text));
        }
        self.ui_state.selected_word = None;
        self.ui_state.result_text = outcome.text;
    }

    fn drain_viewer_events(&mut self) {
        for event in self.viewport.viewer.drain_events() {
            match event {
                ViewerEvent::ZoomChanged(zoom) => debug!(zoom, "zoom changed"),
                ViewerEvent::SelectionChanged { has_selection } => {
                    debug!(has_selection, "selection changed");
                }
                ViewerEvent::WordClicked(word) => {
                    debug!(index = word.index, text = %word.text, "word selected");
                    self.ui_state.selected_word = Some(word);
                }
                ViewerEvent::WordDeselected => self.ui_state.selected_word = None,
            }
        }
    }

    fn update_viewport_texture(&mut self, ctx: &egui::Context, image: &DynamicImage) {
        let color_image = image_to_color_image(image);
        let texture = ctx.load_texture("viewport", color_image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.ui_state.image_size = Some(Size::new(image.width(), image.height()));
    }

    pub fn send_command(&self, cmd: WorkerCommand) -> Result<(), SendError<WorkerCommand>> {
        self.cmd_tx.send(cmd)
    }

    /// Show a file dialog and load the chosen image or PDF.
    pub fn open_file(&self) {
        let cmd_tx = self.cmd_tx.clone();
        let start_dir = self.prefs.ui.last_directory.clone();
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Images and PDFs", &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "pdf"])
                .add_filter("All files", &["*"]);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.pick_file() {
                let cmd = if is_pdf_path(&path) {
                    WorkerCommand::OpenPdf { path }
                } else {
                    WorkerCommand::LoadImage { path }
                };
                let _ = cmd_tx.send(cmd);
            }
        });
    }

    pub fn has_image(&self) -> bool {
        self.ui_state.image_path.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Start an OCR run on the whole image, or on the selection when
    /// `selection_only` is set and the selection is large enough.
    pub fn process(&mut self, selection_only: bool) {
        let Some(image_path) = self.ui_state.image_path.clone() else {
            return;
        };

        let crop = if selection_only {
            let region = scan_region(self.viewport.viewer.selection_rect());
            if region.is_none() {
                warn!("selection too small, scanning the full image");
                self.ui_state
                    .add_log("Selection too small, processing the full image".into());
            }
            region
        } else {
            None
        };

        let request = OcrRequest {
            image_path,
            crop,
            config: self.prefs.ocr.clone(),
        };
        match dispatch_run(
            &mut self.orchestrator,
            &mut self.viewport.viewer,
            &self.cmd_tx,
            request,
        ) {
            Ok(_) => {
                self.ui_state.running_stage = None;
                self.ui_state.progress_percent = 0;
                self.ui_state.result_text.clear();
                self.ui_state.selected_word = None;
            }
            Err(message) => self.ui_state.add_log(format!("ERROR: {message}")),
        }
    }

    pub fn show_page(&mut self, nav: PageNav) {
        if let Err(e) = self.send_command(WorkerCommand::ShowPdfPage { nav }) {
            self.ui_state.add_log(format!("ERROR: {e}"));
        }
    }

    /// Copy the selected word, or all recognized text, to the clipboard.
    pub fn copy_text(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.ui_state.copy_source() {
            ctx.copy_text(text.to_string());
            self.ui_state.add_log("Copied text to clipboard".into());
        }
    }

    pub fn set_dark_mode(&mut self, ctx: &egui::Context, dark: bool) {
        self.prefs.ui.dark_mode = dark;
        ctx.set_visuals(visuals(dark));
        self.save_preferences();
    }

    pub fn save_preferences(&self) {
        let Some(ref path) = self.prefs_path else {
            return;
        };
        if let Err(e) = self.prefs.save(path) {
            warn!(error = %e, "failed to save settings");
        }
    }

    fn remember_directory(&mut self, source: &Path) {
        let dir = source.parent().map(Path::to_path_buf);
        if dir.is_some() && dir != self.prefs.ui.last_directory {
            self.prefs.ui.last_directory = dir;
            self.save_preferences();
        }
    }
}

impl eframe::App for LiftTextApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::text::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.drain_viewer_events();

        // About dialog
        if self.show_about {
            egui::Window::new("About LiftText")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("LiftText");
                        ui.label("Text recognition for images and PDFs");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_preferences();
        }
    }
}

/// Begin an OCR run and hand it to the worker. When the worker is gone the
/// run is abandoned at once so the viewer is not left locked.
fn dispatch_run(
    orchestrator: &mut OcrOrchestrator,
    viewer: &mut Viewer,
    cmd_tx: &mpsc::Sender<WorkerCommand>,
    request: OcrRequest,
) -> Result<RunTicket, String> {
    let ticket = orchestrator.begin(viewer).map_err(|e| e.to_string())?;
    if let Err(e) = cmd_tx.send(WorkerCommand::RunOcr { ticket, request }) {
        orchestrator.abandon(viewer);
        warn!(run = ticket.id(), "worker thread is gone, OCR run abandoned");
        return Err(format!("OCR worker unavailable: {e}"));
    }
    Ok(ticket)
}

fn visuals(dark: bool) -> egui::Visuals {
    if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}min")
    }
}
