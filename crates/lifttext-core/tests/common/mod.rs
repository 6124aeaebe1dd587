#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use lifttext_core::error::{LiftTextError, Result};
use lifttext_core::geometry::Size;
use lifttext_core::ocr::{OcrConfig, OcrEngine, Recognition, TextFragment};
use lifttext_core::pdf::PageRasterizer;
use lifttext_core::viewport::ViewportTransform;

/// Transform where display and original pixels coincide (scale 1, no offset).
pub fn identity_transform(width: u32, height: u32) -> ViewportTransform {
    let mut t = ViewportTransform::new(Size::new(width, height));
    t.set_original_image(Size::new(width, height));
    t
}

/// Axis-aligned square polygon.
pub fn square(x: f32, y: f32, side: f32) -> Vec<[f32; 2]> {
    vec![[x, y], [x + side, y], [x + side, y + side], [x, y + side]]
}

pub fn fragment(text: &str, polygon: Option<Vec<[f32; 2]>>) -> TextFragment {
    TextFragment {
        text: text.to_string(),
        confidence: Some(0.9),
        polygon,
    }
}

/// Write a white RGB PNG of the given size into `dir`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

/// Engine returning canned fragments and recording the size of every input.
#[derive(Default)]
pub struct FakeEngine {
    pub fragments: Vec<TextFragment>,
    pub preprocessed: Option<DynamicImage>,
    pub fail: bool,
    pub seen: RefCell<Vec<(u32, u32)>>,
}

impl FakeEngine {
    pub fn with_fragments(fragments: Vec<TextFragment>) -> Self {
        Self {
            fragments,
            ..Self::default()
        }
    }
}

impl OcrEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn recognize(&self, image: &DynamicImage, _config: &OcrConfig) -> Result<Recognition> {
        self.seen.borrow_mut().push((image.width(), image.height()));
        if self.fail {
            return Err(LiftTextError::Ocr("engine exploded".into()));
        }
        Ok(Recognition {
            fragments: self.fragments.clone(),
            preprocessed: self.preprocessed.clone(),
        })
    }
}

/// Rasterizer producing solid pages of a fixed nominal size.
pub struct FakeRasterizer {
    pub pages: usize,
    pub width: u32,
    pub height: u32,
    /// Shared so tests can observe renders after boxing the rasterizer.
    pub renders: Rc<Cell<usize>>,
}

impl FakeRasterizer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            width: 40,
            height: 30,
            renders: Rc::new(Cell::new(0)),
        }
    }
}

impl PageRasterizer for FakeRasterizer {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage> {
        self.renders.set(self.renders.get() + 1);
        let w = (self.width as f32 * scale) as u32;
        let h = (self.height as f32 * scale) as u32;
        let shade = (index * 20 % 256) as u8;
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            w,
            h,
            Rgba([shade, shade, shade, 255]),
        )))
    }
}
