use serde::{Deserialize, Serialize};

use crate::geometry::{point_in_polygon, Point};
use crate::viewport::{display_polygon_of, ViewportTransform};

/// One recognized text fragment from an OCR run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Ordinal within its OCR run.
    pub index: usize,
    pub text: String,
    /// In `[0, 1]`, when the engine reports one.
    pub confidence: Option<f32>,
    /// Outline in original image coordinates.
    pub polygon: Option<Vec<[f32; 2]>>,
}

impl WordEntry {
    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(c) => format!("{:.2}%", c * 100.0),
            None => "N/A".to_string(),
        }
    }

    /// Polygon in display pixels, when present and non-degenerate.
    pub fn display_polygon(&self, transform: &ViewportTransform) -> Option<Vec<Point>> {
        let polygon = self.polygon.as_ref().filter(|p| p.len() >= 3)?;
        Some(display_polygon_of(transform, polygon))
    }
}

/// Result of a hover query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverUpdate {
    pub index: Option<usize>,
    pub changed: bool,
}

/// Result of a click when selection mode is off.
#[derive(Clone, Debug, PartialEq)]
pub enum WordClick {
    Selected(WordEntry),
    /// Empty space clicked while a word was selected.
    Deselected,
}

/// Recognized words of the latest OCR run, with hover/selection state.
#[derive(Clone, Debug, Default)]
pub struct WordBoxIndex {
    words: Vec<WordEntry>,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl WordBoxIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_words(&mut self, words: Vec<WordEntry>) {
        self.words = words;
        self.selected = None;
        self.hovered = None;
    }

    pub fn clear(&mut self) {
        self.set_words(Vec::new());
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected_word(&self) -> Option<&WordEntry> {
        self.selected.and_then(|i| self.words.get(i))
    }

    /// Position (in `words()`) of the topmost word under `pos`.
    /// Later words are checked first so they win on overlap.
    pub fn hit_index(&self, pos: Point, transform: &ViewportTransform) -> Option<usize> {
        self.words.iter().enumerate().rev().find_map(|(i, word)| {
            let polygon = word.display_polygon(transform)?;
            point_in_polygon(pos, &polygon).then_some(i)
        })
    }

    pub fn hit_test(&self, pos: Point, transform: &ViewportTransform) -> Option<&WordEntry> {
        self.hit_index(pos, transform).map(|i| &self.words[i])
    }

    pub fn hover(&mut self, pos: Point, transform: &ViewportTransform) -> HoverUpdate {
        let index = self.hit_index(pos, transform);
        let changed = index != self.hovered;
        self.hovered = index;
        HoverUpdate { index, changed }
    }

    /// Clear hover state when the pointer leaves the view.
    pub fn clear_hover(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub fn click(&mut self, pos: Point, transform: &ViewportTransform) -> Option<WordClick> {
        match self.hit_index(pos, transform) {
            Some(i) => {
                self.selected = Some(i);
                Some(WordClick::Selected(self.words[i].clone()))
            }
            None if self.selected.is_some() => {
                self.selected = None;
                Some(WordClick::Deselected)
            }
            None => None,
        }
    }

    /// All recognized text, one fragment per line.
    pub fn full_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
