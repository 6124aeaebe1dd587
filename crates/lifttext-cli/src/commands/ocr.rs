use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use lifttext_core::consts::MIN_SELECTION_SIZE;
use lifttext_core::geometry::{ImageRect, Size};
use lifttext_core::ocr::{default_engine, run_ocr, scan_region, OcrConfig, OcrRequest};
use lifttext_core::pdf::{is_pdf_path, PdfSession};
use lifttext_core::settings::Preferences;
use tracing::{info, warn};

use crate::summary;

#[derive(Args)]
pub struct OcrArgs {
    /// Input image or PDF
    pub input: PathBuf,

    /// PDF page to process (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Only scan this region, given as x,y,width,height in image pixels
    #[arg(long)]
    pub crop: Option<ImageRect>,

    /// Tesseract language(s), e.g. "eng" or "eng+deu"
    #[arg(long)]
    pub lang: Option<String>,

    /// Tesseract page segmentation mode
    #[arg(long)]
    pub psm: Option<i32>,

    /// Resolution hint passed to the engine
    #[arg(long)]
    pub dpi: Option<i32>,

    /// Also list every word with its confidence and box
    #[arg(long)]
    pub words: bool,
}

/// Saved preferences, overridden by any flags given on the command line.
fn effective_config(args: &OcrArgs) -> OcrConfig {
    let mut config = Preferences::default_path()
        .map(|p| Preferences::load_or_default(&p).ocr)
        .unwrap_or_default();
    if let Some(ref lang) = args.lang {
        config.language = lang.clone();
    }
    if let Some(psm) = args.psm {
        config.psm = psm;
    }
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    config
}

pub fn run(args: &OcrArgs) -> Result<()> {
    if args.page == 0 {
        bail!("Pages are numbered from 1");
    }

    // The session owns the rendered page; keep it alive until OCR is done.
    let mut pdf = None;
    let image_path = if is_pdf_path(&args.input) {
        let session = pdf.insert(
            PdfSession::open(&args.input)
                .with_context(|| format!("Failed to open PDF {}", args.input.display()))?,
        );
        info!(page = args.page, pages = session.page_count(), "rendering PDF page");
        session.load_page(args.page - 1)?
    } else {
        args.input.clone()
    };

    let crop = match args.crop {
        Some(rect) => {
            let (width, height) = image::image_dimensions(&image_path)
                .with_context(|| format!("Failed to read image {}", image_path.display()))?;
            let rect = rect.clamp_to_image(Size::new(width, height));
            let region = scan_region(Some(rect));
            if region.is_none() {
                warn!(%rect, "crop too small, scanning the full image");
                eprintln!(
                    "{}",
                    Style::new().yellow().apply_to(format!(
                        "Crop {rect} is smaller than {MIN_SELECTION_SIZE}x{MIN_SELECTION_SIZE}, processing the full image"
                    ))
                );
            }
            region
        }
        None => None,
    };

    let request = OcrRequest {
        image_path,
        crop,
        config: effective_config(args),
    };
    let engine = default_engine()?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:<16} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );

    let outcome = run_ocr(engine.as_ref(), &request, |stage| {
        pb.set_message(stage.to_string());
        pb.set_position(u64::from(stage.percent()));
    })?;
    pb.finish_and_clear();

    let page = pdf.as_ref().map(|s| s.page_info());
    summary::print_outcome(&args.input, page, &request.config, &outcome);
    if args.words {
        summary::print_words(&outcome.words);
    }

    Ok(())
}
