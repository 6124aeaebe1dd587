use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use lifttext_core::consts::PDF_RENDER_SCALE;
use lifttext_core::pdf::PdfSession;

#[derive(Args)]
pub struct RenderArgs {
    /// Input PDF
    pub file: PathBuf,

    /// Page to render (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Output image path (format from extension)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Render scale relative to the page's nominal size
    #[arg(long, default_value_t = PDF_RENDER_SCALE)]
    pub scale: f32,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    if args.page == 0 {
        bail!("Pages are numbered from 1");
    }
    if args.scale <= 0.0 {
        bail!("Scale must be positive");
    }

    let mut session = PdfSession::open(&args.file)
        .with_context(|| format!("Failed to open PDF {}", args.file.display()))?
        .with_scale(args.scale);
    let rendered = session.load_page(args.page - 1)?;

    let image = image::open(&rendered)?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Page {} of {} ({}x{}) saved to {}",
        args.page,
        session.page_count(),
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}
