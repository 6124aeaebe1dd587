use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use image::DynamicImage;
use lifttext_core::pdf::{is_pdf_path, PdfSession};
use tracing::info;

use crate::messages::{PageNav, WorkerResult};

use super::{send, send_error, send_log, WorkerState};

fn decode_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;
    if image.width() == 0 || image.height() == 0 {
        bail!("Image {} has no pixels", path.display());
    }
    Ok(image)
}

/// Decode a rendered page of `session` into an `ImageLoaded` result.
fn page_loaded(session: &PdfSession, page_path: PathBuf) -> Result<WorkerResult> {
    let image = decode_image(&page_path)?;
    Ok(WorkerResult::ImageLoaded {
        source: session.path().to_path_buf(),
        image_path: page_path,
        image,
        page: Some(session.page_info()),
    })
}

pub(super) fn handle_load_image(
    path: &Path,
    state: &mut WorkerState,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    if is_pdf_path(path) {
        handle_open_pdf(path, state, tx, ctx);
        return;
    }

    match decode_image(path) {
        Ok(image) => {
            info!(
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "image loaded"
            );
            state.pdf = None;
            send(
                tx,
                ctx,
                WorkerResult::ImageLoaded {
                    source: path.to_path_buf(),
                    image_path: path.to_path_buf(),
                    image,
                    page: None,
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

pub(super) fn handle_open_pdf(
    path: &Path,
    state: &mut WorkerState,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let opened = PdfSession::open(path)
        .and_then(|mut session| {
            let first = session.load_page(0)?;
            Ok((session, first))
        })
        .with_context(|| format!("Failed to open PDF {}", path.display()))
        .and_then(|(session, first)| {
            let loaded = page_loaded(&session, first)?;
            Ok((session, loaded))
        });

    match opened {
        Ok((session, loaded)) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Opened {} ({} pages)",
                    path.display(),
                    session.page_count()
                ),
            );
            // Replacing the session drops its cache and deletes the old pages.
            state.pdf = Some(session);
            send(tx, ctx, loaded);
        }
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

pub(super) fn handle_show_pdf_page(
    nav: PageNav,
    state: &mut WorkerState,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(session) = state.pdf.as_mut() else {
        send_log(tx, ctx, "No PDF is open");
        return;
    };

    let moved = match nav {
        PageNav::Prev => session.prev_page(),
        PageNav::Next => session.next_page(),
    };

    let result = match moved {
        Ok(Some(page_path)) => page_loaded(session, page_path),
        // Already at the first or last page.
        Ok(None) => return,
        Err(e) => Err(e).context("Failed to render page"),
    };

    match result {
        Ok(loaded) => send(tx, ctx, loaded),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}
