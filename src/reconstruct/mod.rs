pub mod cluster;

use crate::core::confidence::mean_confidence;
use crate::core::model::{PageReconstruction, WordBlock, WordDetection};
use crate::core::stats::median;
use crate::reconstruct::cluster::{cluster_lines, LineCluster};

/// Tunable heuristics for line clustering and paragraph segmentation.
///
/// All values are in normalized page coordinates or unitless factors. The
/// defaults are empirically chosen, not derived; override them instead of
/// editing the algorithm.
#[derive(Debug, Clone)]
pub struct ReconstructConfig {
    /// Two words merge into a line when their vertical centers are within
    /// `line_merge_factor * line_height` of each other.
    pub line_merge_factor: f32,
    /// Lower bound on the merge tolerance; prevents pathological merging on
    /// pages with a tiny estimated line height.
    pub line_merge_floor: f32,
    /// A paragraph break is declared when consecutive line centers are more
    /// than `paragraph_gap_factor * line_height` apart.
    pub paragraph_gap_factor: f32,
    /// Lower bound on the paragraph gap threshold.
    pub paragraph_gap_floor: f32,
    /// Used when no word has positive height; tuned for typical page aspect
    /// ratios.
    pub fallback_line_height: f32,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            line_merge_factor: 0.5,
            line_merge_floor: 0.01,
            paragraph_gap_factor: 1.5,
            paragraph_gap_floor: 0.02,
            fallback_line_height: 0.03,
        }
    }
}

/// Recovers reading order and paragraph structure from an unordered bag of
/// word detections for one page.
///
/// Pure and deterministic: the same input, bit for bit, yields the same
/// output. Never fails on well-typed input; an empty word list is a valid
/// zero-word page.
#[derive(Debug, Clone, Default)]
pub struct LineReconstructor {
    config: ReconstructConfig,
}

impl LineReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReconstructConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Builds the page view: ordered lines, paragraph breaks, flattened
    /// word blocks and aggregate confidence. `page_number` is 1-indexed.
    pub fn reconstruct_page(
        &self,
        page_number: usize,
        words: &[WordDetection],
    ) -> PageReconstruction {
        if words.is_empty() {
            return PageReconstruction::empty(page_number);
        }

        let line_height = self.estimate_line_height(words);
        let tolerance = (self.config.line_merge_factor * line_height).max(self.config.line_merge_floor);
        let lines = cluster_lines(words, tolerance);

        let text = self.assemble_text(&lines, line_height);
        let blocks: Vec<WordBlock> = lines
            .iter()
            .flat_map(|line| line.words().iter().map(WordBlock::from))
            .collect();
        let avg_confidence = mean_confidence(words.iter().map(|w| w.confidence));

        PageReconstruction {
            page_number,
            text,
            blocks,
            avg_confidence,
        }
    }

    /// Median height over words with positive height. Degenerate boxes are
    /// excluded from the estimate; a page of only degenerate boxes falls back
    /// to the configured constant.
    fn estimate_line_height(&self, words: &[WordDetection]) -> f32 {
        let heights: Vec<f32> = words
            .iter()
            .map(|w| w.bbox.height())
            .filter(|h| *h > 0.0)
            .collect();
        median(&heights).unwrap_or(self.config.fallback_line_height)
    }

    /// Joins line texts with newlines, inserting one blank line wherever the
    /// vertical gap between consecutive line centers exceeds the paragraph
    /// threshold. Breaks only add whitespace, never drop content.
    fn assemble_text(&self, lines: &[LineCluster], line_height: f32) -> String {
        let gap_threshold =
            (self.config.paragraph_gap_factor * line_height).max(self.config.paragraph_gap_floor);

        let mut parts: Vec<String> = Vec::with_capacity(lines.len());
        let mut prev_center: Option<f32> = None;
        for line in lines {
            if let Some(prev) = prev_center {
                if line.center_y() - prev > gap_threshold {
                    parts.push(String::new());
                }
            }
            parts.push(line.text());
            prev_center = Some(line.center_y());
        }
        parts.join("\n")
    }
}
