use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{LiftTextError, Result};
use crate::geometry::{ImageRect, Size};
use crate::viewer::Viewer;
use crate::words::WordEntry;

use super::{OcrConfig, OcrEngine, TextFragment};

pub const NO_TEXT_MESSAGE: &str = "No text detected in image";

/// OCR run stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OcrStage {
    Loading,
    Preparing,
    Recognizing,
    Extracting,
    Done,
}

impl OcrStage {
    pub fn percent(self) -> u8 {
        match self {
            Self::Loading => 10,
            Self::Preparing => 30,
            Self::Recognizing => 50,
            Self::Extracting => 80,
            Self::Done => 100,
        }
    }
}

impl fmt::Display for OcrStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading image"),
            Self::Preparing => write!(f, "Preparing image"),
            Self::Recognizing => write!(f, "Running OCR"),
            Self::Extracting => write!(f, "Extracting text"),
            Self::Done => write!(f, "OCR complete"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OcrRequest {
    pub image_path: PathBuf,
    /// Region in original image coordinates; `None` scans the whole image.
    pub crop: Option<ImageRect>,
    pub config: OcrConfig,
}

#[derive(Clone, Debug)]
pub struct OcrOutcome {
    /// Words with polygons in original image coordinates.
    pub words: Vec<WordEntry>,
    /// Concatenated text, or [`NO_TEXT_MESSAGE`] when nothing was found.
    pub text: String,
    /// Engine-cleaned image; only kept for full-image scans.
    pub preprocessed: Option<DynamicImage>,
    pub crop: Option<ImageRect>,
}

impl OcrOutcome {
    pub fn found_text(&self) -> bool {
        !self.words.is_empty()
    }
}

/// Region to scan for the current selection: a valid selection restricts
/// the scan, anything else means the whole image.
pub fn scan_region(selection: Option<ImageRect>) -> Option<ImageRect> {
    selection.filter(ImageRect::is_valid)
}

/// Check a crop against the image bounds.
pub fn validated_crop(rect: ImageRect, image: Size) -> Result<ImageRect> {
    let rect = rect.normalized();
    if rect.width <= 0 || rect.height <= 0 {
        return Err(LiftTextError::InvalidCrop(
            "Crop width and height must be > 0".into(),
        ));
    }
    if rect.x < 0
        || rect.y < 0
        || rect.right() > image.width as i32
        || rect.bottom() > image.height as i32
    {
        return Err(LiftTextError::InvalidCrop(format!(
            "Crop region ({rect}) exceeds image dimensions ({}x{})",
            image.width, image.height
        )));
    }
    Ok(rect)
}

pub fn crop_image(image: &DynamicImage, rect: ImageRect) -> Result<DynamicImage> {
    let size = Size::new(image.width(), image.height());
    let r = validated_crop(rect, size)?;
    Ok(image.crop_imm(r.x as u32, r.y as u32, r.width as u32, r.height as u32))
}

/// Shift a polygon from crop-local to original image coordinates.
pub fn offset_polygon(polygon: &[[f32; 2]], origin: (i32, i32)) -> Vec<[f32; 2]> {
    let (ox, oy) = (origin.0 as f32, origin.1 as f32);
    polygon.iter().map(|&[x, y]| [x + ox, y + oy]).collect()
}

fn build_words(fragments: Vec<TextFragment>, crop: Option<ImageRect>) -> Vec<WordEntry> {
    let origin = crop.map_or((0, 0), |r| (r.x, r.y));
    fragments
        .into_iter()
        .filter(|f| !f.text.trim().is_empty())
        .enumerate()
        .map(|(index, f)| WordEntry {
            index,
            text: f.text,
            confidence: f.confidence,
            polygon: f.polygon.map(|p| offset_polygon(&p, origin)),
        })
        .collect()
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(LiftTextError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(img)
}

/// Run one OCR pass over the image at `request.image_path`.
///
/// `progress` is called at each stage with monotonically increasing percentages.
pub fn run_ocr(
    engine: &dyn OcrEngine,
    request: &OcrRequest,
    mut progress: impl FnMut(OcrStage),
) -> Result<OcrOutcome> {
    progress(OcrStage::Loading);
    let image = load_image(&request.image_path)?;
    run_ocr_on_image(engine, &image, request.crop, &request.config, progress)
}

/// Same as [`run_ocr`] for an image already in memory.
pub fn run_ocr_on_image(
    engine: &dyn OcrEngine,
    image: &DynamicImage,
    crop: Option<ImageRect>,
    config: &OcrConfig,
    mut progress: impl FnMut(OcrStage),
) -> Result<OcrOutcome> {
    progress(OcrStage::Preparing);
    let crop = match crop {
        Some(rect) => Some(validated_crop(rect, Size::new(image.width(), image.height()))?),
        None => None,
    };
    let cropped;
    let input = match crop {
        Some(r) => {
            debug!(region = %r, "cropping before OCR");
            cropped = crop_image(image, r)?;
            &cropped
        }
        None => image,
    };

    progress(OcrStage::Recognizing);
    info!(
        engine = engine.name(),
        language = %config.language,
        psm = config.psm,
        width = input.width(),
        height = input.height(),
        "Running OCR"
    );
    let recognition = engine.recognize(input, config)?;

    progress(OcrStage::Extracting);
    let words = build_words(recognition.fragments, crop);
    let text = if words.is_empty() {
        NO_TEXT_MESSAGE.to_string()
    } else {
        words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };
    // A cleaned crop would not line up with the displayed full image.
    let preprocessed = if crop.is_none() {
        recognition.preprocessed
    } else {
        None
    };

    info!(words = words.len(), "OCR finished");
    progress(OcrStage::Done);
    Ok(OcrOutcome {
        words,
        text,
        preprocessed,
        crop,
    })
}

/// Identifies one OCR run; results carrying an outdated ticket are discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunTicket {
    id: u64,
}

impl RunTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Guards against overlapping OCR runs and applies results to a [`Viewer`].
#[derive(Debug, Default)]
pub struct OcrOrchestrator {
    next_id: u64,
    active: Option<RunTicket>,
    last_percent: u8,
}

impl OcrOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_current(&self, ticket: RunTicket) -> bool {
        self.active == Some(ticket)
    }

    /// Start a run: previous words are cleared and primary-button
    /// interaction is locked until the run finishes.
    pub fn begin(&mut self, viewer: &mut Viewer) -> Result<RunTicket> {
        if self.is_busy() {
            return Err(LiftTextError::Busy);
        }
        self.next_id += 1;
        let ticket = RunTicket { id: self.next_id };
        self.active = Some(ticket);
        self.last_percent = 0;
        viewer.clear_words();
        viewer.set_locked(true);
        debug!(run = ticket.id, "OCR run started");
        Ok(ticket)
    }

    /// Filter a progress report: returns the percentage to display when it
    /// belongs to the active run and does not go backwards.
    pub fn progress(&mut self, ticket: RunTicket, stage: OcrStage) -> Option<u8> {
        let percent = stage.percent();
        if !self.is_current(ticket) || percent < self.last_percent {
            return None;
        }
        self.last_percent = percent;
        Some(percent)
    }

    /// Drop the active run, e.g. when a new image replaces the one being scanned.
    pub fn abandon(&mut self, viewer: &mut Viewer) {
        if let Some(ticket) = self.active.take() {
            debug!(run = ticket.id, "OCR run abandoned");
            viewer.set_locked(false);
        }
    }

    /// Apply a finished run. Returns `Ok(None)` for a stale ticket, in which
    /// case nothing is touched. Errors leave the viewer's words empty.
    pub fn finish(
        &mut self,
        ticket: RunTicket,
        result: Result<OcrOutcome>,
        viewer: &mut Viewer,
    ) -> Result<Option<OcrOutcome>> {
        if !self.is_current(ticket) {
            warn!(run = ticket.id, "discarding result of a stale OCR run");
            return Ok(None);
        }
        self.active = None;
        viewer.set_locked(false);

        let outcome = result?;
        if outcome.crop.is_none() {
            if let Some(img) = &outcome.preprocessed {
                viewer.replace_image(Size::new(img.width(), img.height()));
            }
        }
        viewer.set_words(outcome.words.clone());
        Ok(Some(outcome))
    }
}
