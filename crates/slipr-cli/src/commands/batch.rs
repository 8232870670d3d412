//! Batch processing command for multiple slip files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use slipr_core::ocr::load_image;
use slipr_core::{SlipRecord, TextRecognizer};

use super::config::load_config;
use super::scan::load_recognizer;
use super::{render, OutputFormat};
use crate::pipeline::SlipPipeline;
use crate::sink::{record_fields, RECORD_COLUMNS};

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "text"];
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching transcripts (.txt) and slip images
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Append every parsed record to this CSV log
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<SlipRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dir) = args.model_dir.clone() {
        config.ocr.model_dir = dir;
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_text(p) || is_image(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut pipeline = SlipPipeline::from_config(&config, args.log.clone());
    // Models are loaded on the first image only.
    let mut recognizer: Option<Box<dyn TextRecognizer>> = None;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &mut pipeline, &mut recognizer, &config.ocr);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => results.push(ProcessResult {
                path,
                record: Some(record),
                error: None,
                processing_time_ms,
            }),
            Err(e) if args.continue_on_error => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(ProcessResult {
                    path,
                    record: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            if let Some(record) = &result.record {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("slip");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
                fs::write(&output_path, render(record, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn is_text(path: &Path) -> bool {
    TEXT_EXTENSIONS.contains(&extension(path).as_str())
}

fn is_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(path).as_str())
}

fn process_single_file(
    path: &Path,
    pipeline: &mut SlipPipeline,
    recognizer: &mut Option<Box<dyn TextRecognizer>>,
    ocr: &slipr_core::OcrConfig,
) -> anyhow::Result<SlipRecord> {
    if is_text(path) {
        return pipeline.process_text(&fs::read_to_string(path)?);
    }

    let image = load_image(path)?;
    if recognizer.is_none() {
        *recognizer = Some(load_recognizer(ocr)?);
    }
    let recognizer = recognizer
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("OCR recognizer unavailable"))?;
    pipeline.process_image(recognizer, &image)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(RECORD_COLUMNS);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut row = vec![filename];
        match &result.record {
            Some(record) => {
                row.push("success".to_string());
                row.extend(record_fields(record));
            }
            None => {
                row.push("error".to_string());
                row.extend(std::iter::repeat_n(String::new(), RECORD_COLUMNS.len()));
            }
        }
        row.push(result.processing_time_ms.to_string());
        row.push(result.error.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
