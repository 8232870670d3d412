//! Parse command - extract slip data from OCR text.

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use super::config::load_config;
use super::{emit, render, OutputFormat};
use crate::pipeline::SlipPipeline;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file holding the OCR transcript, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Append the parsed record to this CSV log
    #[arg(long)]
    log: Option<PathBuf>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Parsing file: {}", args.input.display());
        std::fs::read_to_string(&args.input)?
    };

    let mut pipeline = SlipPipeline::from_config(&config, args.log);
    let record = pipeline.process_text(&text)?;

    emit(&render(&record, args.format)?, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
