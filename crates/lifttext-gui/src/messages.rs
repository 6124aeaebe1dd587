use std::path::PathBuf;
use std::time::Duration;

use image::DynamicImage;
use lifttext_core::error::Result as CoreResult;
use lifttext_core::ocr::{OcrOutcome, OcrRequest, OcrStage, RunTicket};

/// Direction for PDF page navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file for display and OCR.
    LoadImage { path: PathBuf },

    /// Open a PDF and show its first page.
    OpenPdf { path: PathBuf },

    /// Move to the previous or next page of the open PDF.
    ShowPdfPage { nav: PageNav },

    /// Run OCR for the given request. The ticket comes back with every
    /// progress report and with the result.
    RunOcr { ticket: RunTicket, request: OcrRequest },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        /// File the user opened (the PDF for rendered pages).
        source: PathBuf,
        /// Raster file OCR reads from.
        image_path: PathBuf,
        image: DynamicImage,
        /// `(current, total)` page numbers, 1-based, for PDFs.
        page: Option<(usize, usize)>,
    },

    OcrProgress {
        ticket: RunTicket,
        stage: OcrStage,
    },

    OcrComplete {
        ticket: RunTicket,
        result: CoreResult<OcrOutcome>,
        elapsed: Duration,
    },

    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
