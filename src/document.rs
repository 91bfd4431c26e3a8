use crate::core::model::{DocumentReconstruction, PageReconstruction};

/// Joins per-page reconstructions into the document view.
///
/// `full_text` is each page's text followed by two newlines, in page order;
/// page boundaries appear nowhere else in the flat output. Empty pages still
/// contribute their separator so page positions stay recoverable.
pub fn assemble_document(pages: Vec<PageReconstruction>) -> DocumentReconstruction {
    let mut full_text = String::new();
    for page in &pages {
        full_text.push_str(&page.text);
        full_text.push_str("\n\n");
    }
    DocumentReconstruction { pages, full_text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(page_number: usize, text: &str) -> PageReconstruction {
        PageReconstruction {
            page_number,
            text: text.to_string(),
            blocks: Vec::new(),
            avg_confidence: 0.0,
        }
    }

    #[test]
    fn empty_document_has_empty_text() {
        let doc = assemble_document(Vec::new());
        assert_eq!(doc.full_text, "");
        assert!(doc.pages.is_empty());
    }

    #[test]
    fn pages_are_separated_by_two_newlines() {
        let doc = assemble_document(vec![page(1, "first page"), page(2, "second page")]);
        assert_eq!(doc.full_text, "first page\n\nsecond page\n\n");
    }

    #[test]
    fn empty_page_still_contributes_separator() {
        let doc = assemble_document(vec![page(1, "text"), page(2, ""), page(3, "more")]);
        assert_eq!(doc.full_text, "text\n\n\n\nmore\n\n");
        assert_eq!(doc.pages.len(), 3);
    }
}
