use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use textlayer::export::{Exporter, JsonExporter, TextExporter};
use textlayer::pipeline::{place_document, reconstruct_document};
use textlayer::{
    PageSize, PageWriter, PlacementConfig, PlacementInstruction, ReconstructConfig,
    VerticalOrigin, WordDetection,
};

#[derive(Parser, Debug)]
#[command(name = "textlayer")]
#[command(version, about = "Reading-order reconstruction and invisible text-layer placement for OCR word detections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconstruct page text and reading order from a detections file
    Reconstruct {
        /// Input detections JSON (pages of word detections)
        input: PathBuf,

        /// Output directory (default: ./<input_name>_output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute invisible text-layer placements for a detections file
    Place {
        /// Input detections JSON (pages of word detections)
        input: PathBuf,

        /// Destination page width in destination units
        #[arg(long, default_value_t = 612.0)]
        width: f32,

        /// Destination page height in destination units
        #[arg(long, default_value_t = 792.0)]
        height: f32,

        /// Vertical-axis convention of the destination canvas
        #[arg(long, value_enum, default_value_t = Origin::TopLeft)]
        origin: Origin,

        /// Output placements JSON file (default: ./placements.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a detections file
    Info {
        /// Input detections JSON
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Origin {
    TopLeft,
    BottomLeft,
}

impl From<Origin> for VerticalOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::TopLeft => VerticalOrigin::TopLeft,
            Origin::BottomLeft => VerticalOrigin::BottomLeft,
        }
    }
}

/// Recorded recognition-model output: one word list per page, page order
/// matching the source document.
#[derive(Debug, Deserialize)]
struct DetectionFile {
    pages: Vec<Vec<WordDetection>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reconstruct { input, output } => run_reconstruct(input, output),
        Commands::Place {
            input,
            width,
            height,
            origin,
            output,
        } => run_place(input, width, height, origin, output),
        Commands::Info { input } => show_info(input),
    }
}

fn load_detections(input: &PathBuf) -> Result<DetectionFile> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    let data = fs::read_to_string(input)
        .with_context(|| format!("Failed to read detections file: {}", input.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse detections JSON: {}", input.display()))
}

fn run_reconstruct(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let detections = load_detections(&input)?;

    let output_dir = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    println!("[*] Reconstructing: {}", input.display());
    println!("[*] Output: {}", output_dir.display());

    let document = reconstruct_document(&detections.pages, &ReconstructConfig::default());

    let json_exporter = JsonExporter::new(output_dir.clone());
    json_exporter
        .export(&document)
        .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;

    let text_exporter = TextExporter::new(output_dir.clone());
    text_exporter
        .export(&document)
        .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;

    println!("[✓] Done! Results saved to: {}", output_dir.display());
    Ok(())
}

/// Collects placements per page for JSON output instead of writing into a
/// page content stream.
#[derive(Debug, Default, Serialize)]
struct PlacementCollector {
    pages: BTreeMap<usize, Vec<PlacementInstruction>>,
}

impl PageWriter for PlacementCollector {
    fn place_word(&mut self, page_number: usize, instruction: &PlacementInstruction) -> Result<()> {
        self.pages
            .entry(page_number)
            .or_default()
            .push(instruction.clone());
        Ok(())
    }
}

fn run_place(
    input: PathBuf,
    width: f32,
    height: f32,
    origin: Origin,
    output: Option<PathBuf>,
) -> Result<()> {
    let detections = load_detections(&input)?;
    let output_path = output.unwrap_or_else(|| PathBuf::from("placements.json"));

    println!("[*] Placing: {}", input.display());
    println!("[*] Page size: {}x{}", width, height);

    let config = PlacementConfig {
        vertical_origin: origin.into(),
        ..PlacementConfig::default()
    };
    let sizes = vec![PageSize::new(width, height); detections.pages.len()];

    let mut collector = PlacementCollector::default();
    let report = place_document(&detections.pages, &sizes, &config, &mut collector)?;

    let data = serde_json::to_string_pretty(&collector)?;
    fs::write(&output_path, data)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    println!("[✓] Placed {} word(s)", report.placed_words);
    if !report.skipped_pages.is_empty() {
        eprintln!("[!] Skipped page(s) with invalid geometry: {:?}", report.skipped_pages);
    }
    println!("[✓] Saved to: {}", output_path.display());
    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    let detections = load_detections(&input)?;

    let total_words: usize = detections.pages.iter().map(|p| p.len()).sum();

    println!("Detections Information");
    println!("======================");
    println!("File: {}", input.display());
    println!("Pages: {}", detections.pages.len());
    println!("Words: {}", total_words);
    for (idx, page) in detections.pages.iter().enumerate() {
        println!("  page {}: {} word(s)", idx + 1, page.len());
    }

    Ok(())
}
