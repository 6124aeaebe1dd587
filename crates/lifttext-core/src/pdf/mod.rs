pub mod cache;
#[cfg(feature = "pdf")]
pub mod pdfium;

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::consts::PDF_RENDER_SCALE;
use crate::error::{LiftTextError, Result};

pub use cache::PageCache;

/// Renders pages of one opened document.
pub trait PageRasterizer {
    fn page_count(&self) -> usize;

    /// Render page `index` (zero-based) at `scale` times its nominal size.
    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage>;
}

/// Whether `path` looks like a PDF by extension.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Open PDF with a current page and a bounded cache of rendered pages.
pub struct PdfSession {
    path: PathBuf,
    rasterizer: Box<dyn PageRasterizer>,
    page_count: usize,
    current: usize,
    scale: f32,
    cache: PageCache,
}

impl std::fmt::Debug for PdfSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSession")
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .field("current", &self.current)
            .field("cached", &self.cache.pages())
            .finish()
    }
}

impl PdfSession {
    /// Wrap an opened document. Documents without pages are rejected.
    pub fn new(path: impl Into<PathBuf>, rasterizer: Box<dyn PageRasterizer>) -> Result<Self> {
        let page_count = rasterizer.page_count();
        if page_count == 0 {
            return Err(LiftTextError::EmptyDocument);
        }
        let path = path.into();
        info!(path = %path.display(), pages = page_count, "PDF opened");
        Ok(Self {
            path,
            rasterizer,
            page_count,
            current: 0,
            scale: PDF_RENDER_SCALE,
            cache: PageCache::default(),
        })
    }

    /// Open `path` with the PDFium rasterizer.
    #[cfg(feature = "pdf")]
    pub fn open(path: &Path) -> Result<Self> {
        let rasterizer = pdfium::PdfiumRasterizer::open(path)?;
        Self::new(path, Box::new(rasterizer))
    }

    #[cfg(not(feature = "pdf"))]
    pub fn open(_path: &Path) -> Result<Self> {
        Err(LiftTextError::Pdf(
            "built without PDF support; enable the `pdf` feature".into(),
        ))
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Make `index` the current page and return the path of its rendered PNG.
    pub fn load_page(&mut self, index: usize) -> Result<PathBuf> {
        if index >= self.page_count {
            return Err(LiftTextError::PageOutOfRange {
                index,
                total: self.page_count,
            });
        }

        if let Some(path) = self.cache.get(index) {
            debug!(page = index, "page cache hit");
            let path = path.to_path_buf();
            self.current = index;
            return Ok(path);
        }

        let image = self.rasterizer.render_page(index, self.scale)?;
        let file = tempfile::Builder::new()
            .prefix("lifttext-page-")
            .suffix(".png")
            .tempfile()?
            .into_temp_path();
        image.save_with_format(&file, ImageFormat::Png)?;
        let path = file.to_path_buf();
        debug!(
            page = index,
            width = image.width(),
            height = image.height(),
            "page rendered"
        );

        if let Some(evicted) = self.cache.insert(index, file) {
            debug!(page = evicted, "page evicted from cache");
        }
        self.current = index;
        Ok(path)
    }

    pub fn can_navigate_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_navigate_next(&self) -> bool {
        self.current + 1 < self.page_count
    }

    /// Load the previous page, or `None` on the first page.
    pub fn prev_page(&mut self) -> Result<Option<PathBuf>> {
        if !self.can_navigate_prev() {
            return Ok(None);
        }
        self.load_page(self.current - 1).map(Some)
    }

    /// Load the next page, or `None` on the last page.
    pub fn next_page(&mut self) -> Result<Option<PathBuf>> {
        if !self.can_navigate_next() {
            return Ok(None);
        }
        self.load_page(self.current + 1).map(Some)
    }

    /// `(current page, 1-based; total pages)`.
    pub fn page_info(&self) -> (usize, usize) {
        (self.current + 1, self.page_count)
    }
}
