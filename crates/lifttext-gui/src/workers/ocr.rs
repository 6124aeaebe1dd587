use std::sync::mpsc;
use std::time::Instant;

use lifttext_core::error::{LiftTextError, Result as CoreResult};
use lifttext_core::ocr::{default_engine, run_ocr, OcrEngine, OcrOutcome, OcrRequest, RunTicket};

use crate::messages::WorkerResult;

use super::{make_progress_callback, send, WorkerState};

fn engine(state: &mut WorkerState) -> CoreResult<&dyn OcrEngine> {
    if state.engine.is_none() {
        state.engine = Some(default_engine()?);
    }
    state
        .engine
        .as_deref()
        .ok_or_else(|| LiftTextError::Ocr("OCR engine unavailable".into()))
}

fn run(
    ticket: RunTicket,
    request: &OcrRequest,
    state: &mut WorkerState,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> CoreResult<OcrOutcome> {
    let engine = engine(state)?;
    let progress = make_progress_callback(tx, ctx, ticket);
    run_ocr(engine, request, progress)
}

pub(super) fn handle_run_ocr(
    ticket: RunTicket,
    request: &OcrRequest,
    state: &mut WorkerState,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = run(ticket, request, state, tx, ctx);
    send(
        tx,
        ctx,
        WorkerResult::OcrComplete {
            ticket,
            result,
            elapsed: start.elapsed(),
        },
    );
}
