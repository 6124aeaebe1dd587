use std::sync::mpsc;

use lifttext_core::ocr::{OcrEngine, OcrStage, RunTicket};
use lifttext_core::pdf::PdfSession;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{io, ocr};

/// State owned by the worker thread between commands.
#[derive(Default)]
pub(crate) struct WorkerState {
    /// Open PDF, if the current image is one of its pages.
    pub pdf: Option<PdfSession>,
    /// Created on the first OCR run.
    pub engine: Option<Box<dyn OcrEngine>>,
}

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("lifttext-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

/// Create a progress callback that sends `WorkerResult::OcrProgress` messages
/// tagged with the run's ticket.
pub(crate) fn make_progress_callback(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    ticket: RunTicket,
) -> impl FnMut(OcrStage) {
    let tx = tx.clone();
    let ctx = ctx.clone();
    move |stage: OcrStage| {
        let _ = tx.send(WorkerResult::OcrProgress { ticket, stage });
        ctx.request_repaint();
    }
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut state = WorkerState::default();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                io::handle_load_image(&path, &mut state, &tx, &ctx);
            }
            WorkerCommand::OpenPdf { path } => {
                io::handle_open_pdf(&path, &mut state, &tx, &ctx);
            }
            WorkerCommand::ShowPdfPage { nav } => {
                io::handle_show_pdf_page(nav, &mut state, &tx, &ctx);
            }
            WorkerCommand::RunOcr { ticket, request } => {
                ocr::handle_run_ocr(ticket, &request, &mut state, &tx, &ctx);
            }
        }
    }
}
