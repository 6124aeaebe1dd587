use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiftTextError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("OCR engine error: {0}")]
    Ocr(String),

    #[error("An OCR run is already in progress")]
    Busy,

    #[error("Password-protected PDFs are not supported")]
    PasswordProtected,

    #[error("PDF has no pages")]
    EmptyDocument,

    #[error("Page {index} out of range (total: {total})")]
    PageOutOfRange { index: usize, total: usize },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LiftTextError>;
