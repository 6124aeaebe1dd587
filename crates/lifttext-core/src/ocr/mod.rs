pub mod orchestrator;
#[cfg(feature = "tesseract")]
pub mod tesseract;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use orchestrator::{
    crop_image, offset_polygon, run_ocr, run_ocr_on_image, scan_region, validated_crop,
    OcrOrchestrator, OcrOutcome, OcrRequest, OcrStage, RunTicket, NO_TEXT_MESSAGE,
};

/// Engine settings forwarded with every recognition request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine language code, e.g. `eng` or `eng+deu`.
    pub language: String,
    /// Page segmentation mode, see [`PSM_MODES`].
    pub psm: i32,
    pub dpi: i32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            psm: 3,
            dpi: 300,
        }
    }
}

/// Page segmentation modes offered in the UI.
pub const PSM_MODES: &[(i32, &str)] = &[
    (3, "Automatic"),
    (4, "Single Column"),
    (6, "Single Block"),
    (7, "Single Line"),
    (11, "Sparse Text"),
];

pub fn psm_label(psm: i32) -> &'static str {
    PSM_MODES
        .iter()
        .find(|(v, _)| *v == psm)
        .map(|(_, label)| *label)
        .unwrap_or("Custom")
}

/// One fragment as returned by an engine, in the coordinates of the image it was given.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub confidence: Option<f32>,
    pub polygon: Option<Vec<[f32; 2]>>,
}

/// Everything an engine produced for one image.
#[derive(Clone, Debug, Default)]
pub struct Recognition {
    pub fragments: Vec<TextFragment>,
    /// Cleaned or reoriented variant of the input the engine actually read.
    pub preprocessed: Option<DynamicImage>,
}

/// Black-box text recognizer.
pub trait OcrEngine {
    fn name(&self) -> &str;

    fn recognize(&self, image: &DynamicImage, config: &OcrConfig) -> Result<Recognition>;
}

/// Engine used by the front ends.
#[cfg(feature = "tesseract")]
pub fn default_engine() -> Result<Box<dyn OcrEngine>> {
    Ok(Box::new(tesseract::TesseractEngine::new()))
}

#[cfg(not(feature = "tesseract"))]
pub fn default_engine() -> Result<Box<dyn OcrEngine>> {
    Err(crate::error::LiftTextError::Ocr(
        "built without an OCR engine; enable the `tesseract` feature".into(),
    ))
}
