mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifttext", about = "Extract text from images and PDF pages")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize text in an image or a PDF page
    Ocr(commands::ocr::OcrArgs),
    /// Show image dimensions or PDF page count
    Info(commands::info::InfoArgs),
    /// Rasterize a PDF page to an image file
    Render(commands::render::RenderArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Ocr(args) => commands::ocr::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args),
    }
}
