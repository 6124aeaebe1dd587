use std::path::PathBuf;

use lifttext_core::geometry::Size;
use lifttext_core::ocr::OcrStage;
use lifttext_core::words::WordEntry;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// File the user opened.
    pub source_path: Option<PathBuf>,
    /// Raster file OCR runs on (a rendered page for PDFs).
    pub image_path: Option<PathBuf>,
    pub image_size: Option<Size>,
    /// `(current, total)` when showing a PDF page.
    pub pdf_page: Option<(usize, usize)>,

    /// Stage of the running OCR pass (None = idle).
    pub running_stage: Option<OcrStage>,
    pub progress_percent: u8,

    /// Text of the last completed run.
    pub result_text: String,
    pub selected_word: Option<WordEntry>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Text the Copy action puts on the clipboard.
    pub fn copy_source(&self) -> Option<&str> {
        match &self.selected_word {
            Some(word) => Some(word.text.as_str()),
            None if !self.result_text.is_empty() => Some(self.result_text.as_str()),
            None => None,
        }
    }
}
