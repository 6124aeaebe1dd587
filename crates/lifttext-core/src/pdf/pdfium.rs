//! [`PageRasterizer`] backed by PDFium.
//!
//! The PDFium shared library is looked up in the working directory first,
//! then on the system library path.

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use tracing::debug;

use crate::error::{LiftTextError, Result};

use super::PageRasterizer;

pub struct PdfiumRasterizer {
    pdfium: Pdfium,
    path: PathBuf,
    page_count: usize,
}

fn bind() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| LiftTextError::Pdf(format!("failed to load PDFium: {e}")))?;
    Ok(Pdfium::new(bindings))
}

fn map_load_error(e: PdfiumError) -> LiftTextError {
    match e {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            LiftTextError::PasswordProtected
        }
        other => LiftTextError::Pdf(other.to_string()),
    }
}

impl PdfiumRasterizer {
    pub fn open(path: &Path) -> Result<Self> {
        let pdfium = bind()?;
        let page_count = {
            let document = pdfium
                .load_pdf_from_file(path, None)
                .map_err(map_load_error)?;
            document.pages().len() as usize
        };
        if page_count == 0 {
            return Err(LiftTextError::EmptyDocument);
        }
        Ok(Self {
            pdfium,
            path: path.to_path_buf(),
            page_count,
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage> {
        let out_of_range = || LiftTextError::PageOutOfRange {
            index,
            total: self.page_count,
        };
        if index >= self.page_count {
            return Err(out_of_range());
        }

        // Documents borrow the bindings, so each render reopens the file.
        let document = self
            .pdfium
            .load_pdf_from_file(&self.path, None)
            .map_err(map_load_error)?;
        let page = document
            .pages()
            .get(index.try_into().map_err(|_| out_of_range())?)
            .map_err(|e| LiftTextError::Pdf(e.to_string()))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| LiftTextError::Pdf(e.to_string()))?;

        let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
        debug!(page = index, width, height, scale, "PDF page rasterized");
        let pixels = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or(
            LiftTextError::InvalidDimensions { width, height },
        )?;
        Ok(DynamicImage::ImageRgba8(pixels))
    }
}
