use clap::Parser;
use image::ImageReader;
use std::path::{Path, PathBuf};

use skinscan::detection::model::{self, ModelPaths};
use skinscan::report::DetectionReport;
use skinscan::{DetectionPipeline, build_report};

#[derive(Parser)]
#[command(name = "skinscan")]
#[command(about = "Detect skin findings in photos with a pretrained model")]
struct Cli {
    /// Run once on this image and print the report instead of opening the UI
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Path to the detection model artifact
    #[arg(long, value_name = "FILE", default_value = "best.rten")]
    model: PathBuf,

    /// Path to the class-name listing shipped with the model
    #[arg(long, value_name = "FILE", default_value = "best.names")]
    labels: PathBuf,

    /// Brightness factor applied before detection
    #[arg(long, default_value_t = 1.0)]
    brightness: f32,

    /// Confidence threshold for reported detections
    #[arg(long, default_value_t = 0.25)]
    confidence: f32,

    /// Save the annotated image here (headless runs only)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let paths = ModelPaths {
        model: args.model,
        labels: args.labels,
    };

    match args.image_path {
        Some(image_path) => run_once(
            &paths,
            &image_path,
            args.brightness,
            args.confidence,
            args.output.as_deref(),
        ),
        None => launch_gui(paths),
    }
}

#[cfg(feature = "gui")]
fn launch_gui(paths: ModelPaths) -> anyhow::Result<()> {
    skinscan::gui::run(paths)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_paths: ModelPaths) -> anyhow::Result<()> {
    anyhow::bail!("built without the gui feature; pass an IMAGE to run headless")
}

fn run_once(
    paths: &ModelPaths,
    image_path: &Path,
    brightness: f32,
    confidence: f32,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    // A failed load blocks detection entirely; surface the diagnostic as-is.
    let model = match model::shared_model(paths) {
        Ok(model) => model,
        Err(diagnostic) => anyhow::bail!("{diagnostic}"),
    };

    let img = ImageReader::open(image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
        .to_rgb8();

    let pipeline = DetectionPipeline::new()
        .with_brightness(brightness.clamp(0.5, 2.0))
        .with_confidence_threshold(confidence.clamp(0.1, 1.0));
    let outcome = pipeline.run(model.as_ref(), &img)?;

    println!("\n=== Detection Results ===");
    match build_report(&outcome.detections) {
        DetectionReport::NoDetections { advisory } => println!("{advisory}"),
        DetectionReport::Detected { summary, rows } => {
            println!("{summary}\n");
            println!("{:<6} {:<24} {}", "#", "Class", "Confidence");
            for row in rows {
                println!("{:<6} {:<24} {}", row.index, row.class_name, row.confidence);
            }
        }
    }

    if let Some(output_path) = output {
        outcome
            .annotated
            .save(output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        println!("\nAnnotated image saved to {}", output_path.display());
    }

    Ok(())
}
