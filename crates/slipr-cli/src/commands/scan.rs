//! Scan command - run OCR on a slip image and parse the text.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use slipr_core::ocr::load_image;
use slipr_core::{OcrConfig, TextRecognizer};

use super::config::load_config;
use super::{emit, render, OutputFormat};
use crate::pipeline::SlipPipeline;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Slip image (PNG, JPEG, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Drop recognized lines at or below this confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Append the parsed record to this CSV log
    #[arg(long)]
    log: Option<PathBuf>,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dir) = args.model_dir.clone() {
        config.ocr.model_dir = dir;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.ocr.min_confidence = min_confidence;
    }
    config.validate()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning image: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );

    pb.set_message("Loading image...");
    let image = load_image(&args.input)?;

    pb.set_message("Loading OCR models...");
    let recognizer = load_recognizer(&config.ocr)?;

    pb.set_message("Running OCR...");
    let mut pipeline = SlipPipeline::from_config(&config, args.log);
    let record = pipeline.process_image(recognizer.as_ref(), &image);
    pb.finish_and_clear();

    emit(&render(&record?, args.format)?, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Build the OCR recognizer from configured model files.
#[cfg(feature = "native")]
pub fn load_recognizer(config: &OcrConfig) -> anyhow::Result<Box<dyn TextRecognizer>> {
    let recognizer = slipr_core::PureOcrRecognizer::from_config(config).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\nPlace the detection, recognition and dictionary files in {} \
             or pass --model-dir.",
            e,
            config.model_dir.display()
        )
    })?;
    Ok(Box::new(recognizer))
}

#[cfg(not(feature = "native"))]
pub fn load_recognizer(_config: &OcrConfig) -> anyhow::Result<Box<dyn TextRecognizer>> {
    anyhow::bail!("slipr was built without the `native` feature; image input is unavailable")
}
