mod dispatch;
mod io;
mod ocr;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{make_progress_callback, send, send_error, send_log, WorkerState};
