use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::DocumentReconstruction;
use crate::export::Exporter;

/// Writes the document view as `document.json`: pages with text, word blocks
/// and average confidence, plus the flat `full_text`.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, document: &DocumentReconstruction) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("document.json");
        let data = serde_json::to_string_pretty(document)?;
        fs::write(path, data)?;
        Ok(())
    }
}
