//! Composition root of the interactive core.
//!
//! A [`Viewer`] owns the transform, the selection controller and the word
//! index, routes pointer events between them and queues [`ViewerEvent`]s for
//! the UI layer to drain.

use std::collections::VecDeque;

use tracing::debug;

use crate::geometry::{ImageRect, Point, Size, Vector};
use crate::selection::{CursorHint, InteractionMode, PressOutcome, SelectionController};
use crate::viewport::ViewportTransform;
use crate::words::{WordBoxIndex, WordClick, WordEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Buttons that pan the view regardless of selection mode.
    pub fn is_pan_button(self) -> bool {
        matches!(self, Self::Secondary | Self::Middle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    ZoomChanged(f32),
    SelectionChanged { has_selection: bool },
    WordClicked(WordEntry),
    WordDeselected,
}

#[derive(Clone, Copy, Debug)]
struct PanDrag {
    start: Point,
    start_offset: Vector,
}

#[derive(Clone, Debug, Default)]
pub struct Viewer {
    transform: ViewportTransform,
    selection: SelectionController,
    words: WordBoxIndex,
    pan: Option<PanDrag>,
    /// Primary-button interactions are ignored while set (e.g. OCR running).
    locked: bool,
    events: VecDeque<ViewerEvent>,
}

impl Viewer {
    pub fn new(widget_size: Size) -> Self {
        Self {
            transform: ViewportTransform::new(widget_size),
            ..Self::default()
        }
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn words(&self) -> &WordBoxIndex {
        &self.words
    }

    pub fn selection_rect(&self) -> Option<ImageRect> {
        self.selection.selection()
    }

    pub fn has_image(&self) -> bool {
        self.transform.has_image()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Show a new image: zoom, pan, words and selection are all reset.
    pub fn load_image(&mut self, size: Size) {
        self.transform.set_original_image(size);
        self.words.clear();
        self.pan = None;
        if self.selection.reset() {
            self.push(ViewerEvent::SelectionChanged {
                has_selection: false,
            });
        }
        self.push(ViewerEvent::ZoomChanged(self.transform.zoom()));
    }

    /// Swap in a variant of the current image (e.g. the engine's preprocessed
    /// output). Coordinates follow the new size; the selection is kept.
    pub fn replace_image(&mut self, size: Size) {
        let selection = self.selection.selection();
        self.transform.set_original_image(size);
        self.words.clear();
        self.selection
            .set_selection(selection.map(|r| r.clamp_to_image(size)));
        self.push(ViewerEvent::ZoomChanged(self.transform.zoom()));
    }

    pub fn set_widget_size(&mut self, size: Size) {
        self.transform.set_widget_size(size);
    }

    pub fn zoom_in(&mut self) {
        if let Some(z) = self.transform.zoom_in() {
            self.push(ViewerEvent::ZoomChanged(z));
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(z) = self.transform.zoom_out() {
            self.push(ViewerEvent::ZoomChanged(z));
        }
    }

    pub fn zoom_reset(&mut self) {
        if let Some(z) = self.transform.zoom_reset() {
            self.push(ViewerEvent::ZoomChanged(z));
        }
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.transform.pan_by(dx, dy);
    }

    pub fn set_selection_mode(&mut self, enabled: bool) {
        debug!(enabled, "selection mode toggled");
        if self.selection.set_enabled(enabled) {
            self.push(ViewerEvent::SelectionChanged {
                has_selection: false,
            });
        }
    }

    pub fn set_words(&mut self, words: Vec<WordEntry>) {
        self.words.set_words(words);
    }

    pub fn clear_words(&mut self) {
        self.words.clear();
    }

    pub fn pointer_pressed(&mut self, pos: Point, button: PointerButton) {
        if button.is_pan_button() {
            self.pan = Some(PanDrag {
                start: pos,
                start_offset: self.transform.pan(),
            });
            return;
        }
        if self.locked || self.pan.is_some() {
            return;
        }

        match self.selection.press(pos, &self.transform) {
            PressOutcome::NotHandled => {
                if let Some(click) = self.words.click(pos, &self.transform) {
                    self.push(match click {
                        WordClick::Selected(word) => ViewerEvent::WordClicked(word),
                        WordClick::Deselected => ViewerEvent::WordDeselected,
                    });
                }
            }
            PressOutcome::Rejected
            | PressOutcome::Drawing
            | PressOutcome::Moving
            | PressOutcome::Resizing(_) => {}
        }
    }

    pub fn pointer_moved(&mut self, pos: Point) {
        if let Some(pan) = self.pan {
            self.transform.set_pan(Vector::new(
                pan.start_offset.x + (pos.x - pan.start.x) as f32,
                pan.start_offset.y + (pos.y - pan.start.y) as f32,
            ));
            return;
        }

        if self.selection.mode() != InteractionMode::Idle {
            self.selection.drag(pos, &self.transform);
            return;
        }

        if !self.selection.is_enabled() {
            self.words.hover(pos, &self.transform);
        }
    }

    pub fn pointer_released(&mut self, _pos: Point, button: PointerButton) {
        if button.is_pan_button() {
            self.pan = None;
            return;
        }
        if let Some(has_selection) = self.selection.release(&self.transform) {
            self.push(ViewerEvent::SelectionChanged { has_selection });
        }
    }

    /// Pointer left the view: drop hover feedback.
    pub fn pointer_left(&mut self) {
        self.words.clear_hover();
    }

    pub fn cursor_hint(&self, pos: Point) -> CursorHint {
        if self.pan.is_some() {
            return CursorHint::Grabbing;
        }
        if self.selection.is_enabled() || self.selection.mode() != InteractionMode::Idle {
            return self.selection.cursor_hint(pos, &self.transform);
        }
        if self.words.hovered().is_some() {
            CursorHint::PointingHand
        } else {
            CursorHint::Default
        }
    }

    fn push(&mut self, event: ViewerEvent) {
        self.events.push_back(event);
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        self.events.drain(..).collect()
    }
}
