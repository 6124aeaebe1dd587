use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lifttext_core::pdf::{is_pdf_path, PdfSession};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image or PDF
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    println!("File:        {}", args.file.display());

    if is_pdf_path(&args.file) {
        let session = PdfSession::open(&args.file)
            .with_context(|| format!("Failed to open PDF {}", args.file.display()))?;
        println!("Type:        PDF");
        println!("Pages:       {}", session.page_count());
        return Ok(());
    }

    let format = image::ImageFormat::from_path(&args.file)
        .map(|f| format!("{f:?}"))
        .unwrap_or_else(|_| "unknown".to_string());
    let (width, height) = image::image_dimensions(&args.file)
        .with_context(|| format!("Failed to read image {}", args.file.display()))?;

    println!("Type:        {format}");
    println!("Dimensions:  {width}x{height}");

    let size_kb = std::fs::metadata(&args.file)?.len() as f64 / 1024.0;
    println!("File size:   {size_kb:.1} KB");

    Ok(())
}
