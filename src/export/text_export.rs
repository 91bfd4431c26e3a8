use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::DocumentReconstruction;
use crate::export::Exporter;

/// Writes `document.txt` (the flat full text) and one `page_NNN.txt` per
/// page.
#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for TextExporter {
    fn export(&self, document: &DocumentReconstruction) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let full_path = self.out_dir.join("document.txt");
        fs::write(full_path, &document.full_text)?;

        for page in &document.pages {
            let page_path = self.out_dir.join(format!("page_{:03}.txt", page.page_number));
            fs::write(page_path, &page.text)?;
        }

        Ok(())
    }
}
