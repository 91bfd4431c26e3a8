use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::model::{DocumentReconstruction, PageReconstruction, WordDetection};
use crate::document::assemble_document;
use crate::placement::{PageSize, PageWriter, PlacementConfig, TextLayerMapper};
use crate::reconstruct::{LineReconstructor, ReconstructConfig};

/// Reconstructs every page and assembles the document view. Page numbers are
/// assigned 1-indexed from input order. Pages are independent, so the pass
/// runs page-parallel; results are collected back in page-number order.
pub fn reconstruct_document(
    pages: &[Vec<WordDetection>],
    config: &ReconstructConfig,
) -> DocumentReconstruction {
    let reconstructor = LineReconstructor::with_config(config.clone());
    let reconstructed: Vec<PageReconstruction> = pages
        .par_iter()
        .enumerate()
        .map(|(idx, words)| {
            let page = reconstructor.reconstruct_page(idx + 1, words);
            debug!(
                page = page.page_number,
                words = page.blocks.len(),
                avg_confidence = page.avg_confidence,
                "page reconstructed"
            );
            page
        })
        .collect();

    info!(pages = reconstructed.len(), "document reconstruction complete");
    assemble_document(reconstructed)
}

/// Outcome of a document placement pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementReport {
    pub placed_words: usize,
    /// 1-indexed pages whose placement failed with a geometry error. Such a
    /// failure is isolated to its page; the remaining pages are still placed.
    pub skipped_pages: Vec<usize>,
}

/// Maps every page's words to invisible glyph placements and feeds them to
/// the page writer. `sizes` carries one destination extent per page.
pub fn place_document<W: PageWriter>(
    pages: &[Vec<WordDetection>],
    sizes: &[PageSize],
    config: &PlacementConfig,
    writer: &mut W,
) -> Result<PlacementReport> {
    anyhow::ensure!(
        pages.len() == sizes.len(),
        "page count {} does not match page size count {}",
        pages.len(),
        sizes.len()
    );

    let mapper = TextLayerMapper::with_config(config.clone());
    let mut report = PlacementReport::default();

    for (idx, (words, size)) in pages.iter().zip(sizes).enumerate() {
        let page_number = idx + 1;
        match mapper.map_page(words, *size) {
            Ok(instructions) => {
                for instruction in &instructions {
                    writer.place_word(page_number, instruction)?;
                }
                report.placed_words += instructions.len();
            }
            Err(err) => {
                warn!(page = page_number, error = %err, "skipping page placement");
                report.skipped_pages.push(page_number);
            }
        }
    }

    info!(
        placed_words = report.placed_words,
        skipped_pages = report.skipped_pages.len(),
        "text layer placement complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::PlacementInstruction;
    use pretty_assertions::assert_eq;

    fn word(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> WordDetection {
        WordDetection::new(text, 0.9, BBox::new(x0, y0, x1, y1))
    }

    #[derive(Default)]
    struct RecordingWriter {
        placed: Vec<(usize, PlacementInstruction)>,
    }

    impl PageWriter for RecordingWriter {
        fn place_word(
            &mut self,
            page_number: usize,
            instruction: &PlacementInstruction,
        ) -> Result<()> {
            self.placed.push((page_number, instruction.clone()));
            Ok(())
        }
    }

    #[test]
    fn reconstructs_pages_in_input_order() {
        let pages = vec![
            vec![word("one", 0.1, 0.1, 0.2, 0.13)],
            Vec::new(),
            vec![word("three", 0.1, 0.1, 0.2, 0.13)],
        ];
        let doc = reconstruct_document(&pages, &ReconstructConfig::default());
        let numbers: Vec<usize> = doc.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(doc.pages[1].text, "");
        assert_eq!(doc.full_text, "one\n\n\n\nthree\n\n");
    }

    #[test]
    fn geometry_error_is_isolated_to_its_page() {
        let pages = vec![
            vec![word("good", 0.1, 0.1, 0.2, 0.15)],
            vec![word("bad", 0.1, f32::NAN, 0.2, 0.15)],
            vec![word("also-good", 0.1, 0.1, 0.2, 0.15)],
        ];
        let sizes = vec![PageSize::new(612.0, 792.0); 3];
        let mut writer = RecordingWriter::default();
        let report =
            place_document(&pages, &sizes, &PlacementConfig::default(), &mut writer).unwrap();

        assert_eq!(report.skipped_pages, vec![2]);
        assert_eq!(report.placed_words, 2);
        let placed_pages: Vec<usize> = writer.placed.iter().map(|(n, _)| *n).collect();
        assert_eq!(placed_pages, vec![1, 3]);
    }

    #[test]
    fn mismatched_size_list_is_rejected() {
        let pages = vec![vec![word("a", 0.1, 0.1, 0.2, 0.15)]];
        let sizes = Vec::new();
        let mut writer = RecordingWriter::default();
        let result = place_document(&pages, &sizes, &PlacementConfig::default(), &mut writer);
        assert!(result.is_err());
    }
}
