/// Minimum width and height (original image pixels) of a selection eligible for OCR.
pub const MIN_SELECTION_SIZE: i32 = 20;

/// Zoom multiplier bounds and the step applied by zoom in/out.
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
pub const ZOOM_STEP: f32 = 1.2;

/// Lower bound on the fit-to-widget scale so a collapsed widget never yields a zero scale.
pub const MIN_BASE_SCALE: f32 = 1e-3;

/// Side length (display pixels) of the square hit area around each resize handle.
pub const HANDLE_SIZE: i32 = 10;

/// Number of rendered PDF pages kept on disk at once.
pub const PAGE_CACHE_CAPACITY: usize = 10;

/// Scale applied when rasterizing PDF pages.
pub const PDF_RENDER_SCALE: f32 = 2.0;
