//! [`OcrEngine`] backed by the `tesseract` command-line binary.
//!
//! The binary must be on `PATH` together with traineddata for the configured
//! language(s).

use std::collections::HashMap;

use image::{DynamicImage, ImageFormat};
use rusty_tesseract::{Args, Image};
use tracing::debug;

use crate::error::{LiftTextError, Result};

use super::{OcrConfig, OcrEngine, Recognition, TextFragment};

/// Tesseract word level in `image_to_data` output.
const WORD_LEVEL: i32 = 5;

#[derive(Clone, Debug, Default)]
pub struct TesseractEngine {
    /// Extra `-c name=value` variables passed on every call.
    pub variables: HashMap<String, String>,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn args(&self, config: &OcrConfig) -> Args {
        Args {
            lang: config.language.clone(),
            config_variables: self.variables.clone(),
            dpi: Some(config.dpi),
            psm: Some(config.psm),
            oem: Some(3),
        }
    }
}

fn ocr_err(e: impl std::fmt::Display) -> LiftTextError {
    LiftTextError::Ocr(e.to_string())
}

/// Axis-aligned box as a clockwise polygon from the top-left corner.
fn box_polygon(left: i32, top: i32, width: i32, height: i32) -> Vec<[f32; 2]> {
    let (l, t) = (left as f32, top as f32);
    let (r, b) = ((left + width) as f32, (top + height) as f32);
    vec![[l, t], [r, t], [r, b], [l, b]]
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage, config: &OcrConfig) -> Result<Recognition> {
        // The CLI reads from disk; the temp file is removed when `tmp` drops.
        let tmp = tempfile::Builder::new()
            .prefix("lifttext-ocr-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(tmp.path(), ImageFormat::Png)?;

        let path = tmp
            .path()
            .to_str()
            .ok_or_else(|| LiftTextError::Ocr("temporary path is not valid UTF-8".into()))?;
        let input = Image::from_path(path).map_err(ocr_err)?;
        let output = rusty_tesseract::image_to_data(&input, &self.args(config)).map_err(ocr_err)?;

        let fragments: Vec<TextFragment> = output
            .data
            .into_iter()
            .filter(|d| d.level == WORD_LEVEL && d.conf >= 0.0 && !d.text.trim().is_empty())
            .map(|d| TextFragment {
                text: d.text.trim().to_string(),
                confidence: Some((d.conf / 100.0).clamp(0.0, 1.0)),
                polygon: Some(box_polygon(d.left, d.top, d.width, d.height)),
            })
            .collect();

        debug!(fragments = fragments.len(), "tesseract finished");
        Ok(Recognition {
            fragments,
            preprocessed: None,
        })
    }
}
