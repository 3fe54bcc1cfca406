use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use platereader::{PlateProcessor, TessOcr};

#[derive(Parser)]
#[command(name = "platereader")]
#[command(about = "Read the registration from a cropped license plate image")]
struct Cli {
    /// Path to the cropped plate image
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Path to write the binarized composite canvas
    #[arg(value_name = "OUTPUT")]
    output_path: PathBuf,

    /// Tesseract language pack
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Segment and write the canvas only, skip recognition
    #[arg(long)]
    segment_only: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("platereader={default_level}"))),
        )
        .init();

    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

    let processor = PlateProcessor::new();
    let segmentation = processor.segment(&img)?;

    // The canvas goes to disk before recognition so a failed OCR pass
    // still leaves the diagnostic image behind.
    segmentation.canvas.save(&args.output_path)?;

    if args.segment_only {
        println!("\n=== Segmentation Results ===");
        println!("Candidate characters: {}", segmentation.candidates.len());
        for (i, candidate) in segmentation.candidates.iter().enumerate() {
            println!(
                "  Character {} at ({}, {}) - {}x{}",
                i + 1,
                candidate.bbox.x,
                candidate.bbox.y,
                candidate.bbox.width,
                candidate.bbox.height
            );
        }
        return Ok(());
    }

    let engine = TessOcr::new(&args.lang)?;
    let reading = processor.recognize(&segmentation, &engine)?;

    println!("\n=== Plate Reading ===");
    println!("Cumulative: {}", reading.cumulative);
    println!("Composite:  {}", reading.composite);
    println!("Final:      {}", reading.text);

    Ok(())
}
