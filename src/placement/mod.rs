use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::geometry::Point;
use crate::core::model::{PlacementInstruction, RenderMode, WordDetection};

/// Contract violations in the placement pass. Fatal for the page being
/// mapped; the caller decides whether to skip the page or abort.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("destination page has invalid dimensions {width}x{height}")]
    InvalidPageSize { width: f32, height: f32 },
    #[error("word {index} has a non-finite bounding box")]
    NonFiniteBBox { index: usize },
}

/// Vertical-axis convention of the destination canvas.
///
/// Detections always use a top-left origin (y grows downward). A wrong
/// choice here flips every word vertically, so the convention is explicit
/// configuration rather than an assumption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalOrigin {
    /// Destination y grows downward, same as the detection space.
    TopLeft,
    /// Destination y grows upward (PDF-style page coordinates).
    BottomLeft,
}

/// Destination page extent in destination units (typically PDF points; the
/// unit is a caller contract).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Heuristics for glyph sizing and baseline placement.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Fraction of the detected box height used as font size; keeps glyphs
    /// from overshooting the box.
    pub font_scale: f32,
    /// Floor that avoids degenerate zero or near-zero font sizes.
    pub min_font_size: f32,
    /// Baseline sits this fraction of the box height above the box's bottom
    /// edge, compensating for typical descender proportions. Not derived
    /// from font metrics.
    pub baseline_drop: f32,
    pub vertical_origin: VerticalOrigin,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            font_scale: 0.8,
            min_font_size: 1.0,
            baseline_drop: 0.15,
            vertical_origin: VerticalOrigin::TopLeft,
        }
    }
}

/// Maps word detections to invisible glyph placements on a destination page.
///
/// Stateless; placement needs only per-word geometry, not reading order, so
/// output instructions stay in input order.
#[derive(Debug, Clone, Default)]
pub struct TextLayerMapper {
    config: PlacementConfig,
}

impl TextLayerMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// One instruction per word, same order as the input.
    pub fn map_page(
        &self,
        words: &[WordDetection],
        page: PageSize,
    ) -> Result<Vec<PlacementInstruction>, GeometryError> {
        if !page.width.is_finite() || !page.height.is_finite() || page.width <= 0.0 || page.height <= 0.0
        {
            return Err(GeometryError::InvalidPageSize {
                width: page.width,
                height: page.height,
            });
        }

        words
            .iter()
            .enumerate()
            .map(|(index, word)| self.map_word(index, word, page))
            .collect()
    }

    fn map_word(
        &self,
        index: usize,
        word: &WordDetection,
        page: PageSize,
    ) -> Result<PlacementInstruction, GeometryError> {
        let bbox = word.bbox;
        if !bbox.is_finite() {
            return Err(GeometryError::NonFiniteBBox { index });
        }

        let dest_x0 = bbox.x0 * page.width;
        // Degenerate boxes collapse to zero height here; the font floor
        // still yields a usable glyph size.
        let box_height = bbox.height() * page.height;
        let font_size = (box_height * self.config.font_scale).max(self.config.min_font_size);

        // The baseline goes slightly above the box's bottom edge. In the
        // top-left convention the bottom edge is y1 scaled; in bottom-left
        // coordinates the detection y axis is flipped first.
        let baseline_y = match self.config.vertical_origin {
            VerticalOrigin::TopLeft => {
                bbox.y1 * page.height - box_height * self.config.baseline_drop
            }
            VerticalOrigin::BottomLeft => {
                (1.0 - bbox.y1) * page.height + box_height * self.config.baseline_drop
            }
        };

        Ok(PlacementInstruction {
            text: word.text.clone(),
            point: Point::new(dest_x0, baseline_y),
            font_size,
            render_mode: RenderMode::Invisible,
        })
    }
}

/// Seam for the external file-format primitive that inserts an invisible
/// text run into a destination page's content.
pub trait PageWriter {
    fn place_word(&mut self, page_number: usize, instruction: &PlacementInstruction) -> Result<()>;
}
