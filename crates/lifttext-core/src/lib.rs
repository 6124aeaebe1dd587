pub mod consts;
pub mod error;
pub mod geometry;
pub mod ocr;
pub mod pdf;
pub mod selection;
pub mod settings;
pub mod viewer;
pub mod viewport;
pub mod words;
