use serde::{Deserialize, Serialize};

use crate::core::geometry::{BBox, Point};

/// One recognized word on one page, as emitted by the recognition model.
///
/// The box is normalized to `[0, 1]` page fractions with a top-left origin.
/// Detections are created fresh per OCR invocation and never shared across
/// pages or requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordDetection {
    pub text: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    pub bbox: BBox,
}

fn default_confidence() -> f32 {
    0.5
}

impl WordDetection {
    pub fn new(text: impl Into<String>, confidence: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.bbox.center_y()
    }
}

/// Word-level record in final reading order, kept for downstream
/// bounding-box consumers (API serialization, highlighting).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordBlock {
    pub text: String,
    pub confidence: f32,
    pub bbox: BBox,
}

impl From<&WordDetection> for WordBlock {
    fn from(word: &WordDetection) -> Self {
        Self {
            text: word.text.clone(),
            confidence: word.confidence,
            bbox: word.bbox,
        }
    }
}

/// One page's reconstruction output.
///
/// A page with zero detected words is valid: empty text, no blocks, zero
/// confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageReconstruction {
    /// 1-indexed, matches input page ordering.
    pub page_number: usize,
    /// Lines joined by newline, with a blank line at each paragraph break.
    pub text: String,
    pub blocks: Vec<WordBlock>,
    pub avg_confidence: f32,
}

impl PageReconstruction {
    pub fn empty(page_number: usize) -> Self {
        Self {
            page_number,
            text: String::new(),
            blocks: Vec::new(),
            avg_confidence: 0.0,
        }
    }

    pub fn word_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Ordered pages plus the flat concatenated text.
///
/// `full_text` is each page's text followed by two newlines; this is the only
/// place page boundaries appear in the flat output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentReconstruction {
    pub pages: Vec<PageReconstruction>,
    pub full_text: String,
}

/// Text rendering mode for placement instructions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Glyphs are selectable and searchable but never painted.
    #[default]
    Invisible,
}

/// One glyph-run placement for the destination page writer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementInstruction {
    pub text: String,
    /// Baseline anchor in destination coordinates.
    pub point: Point,
    /// Destination units, always >= the configured floor.
    pub font_size: f32,
    pub render_mode: RenderMode,
}
