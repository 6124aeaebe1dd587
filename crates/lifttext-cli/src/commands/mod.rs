pub mod info;
pub mod ocr;
pub mod render;
