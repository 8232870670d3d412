//! CLI subcommands and the output formatting they share.

pub mod batch;
pub mod config;
pub mod parse;
pub mod scan;

use std::fs;
use std::path::Path;

use console::style;

use slipr_core::{format_plain_text, format_summary, SlipRecord};

use crate::sink::{record_fields, RECORD_COLUMNS};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Human-readable summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a record in the requested format.
pub fn render(record: &SlipRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(RECORD_COLUMNS)?;
            wtr.write_record(record_fields(record))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text if record.looks_like_slip() => Ok(format_summary(record)),
        OutputFormat::Text => Ok(format_plain_text(&record.raw_text)),
    }
}

/// Write to `output`, or stdout when none is given.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_csv() {
        let record = SlipRecord {
            amount: Some("100.00".to_string()),
            time: Some("09:30".to_string()),
            ..Default::default()
        };

        let csv = render(&record, OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "sender,recipient,amount,date,time,bank,reference,account_number\n,,100.00,,09:30,,,\n"
        );
    }

    #[test]
    fn test_render_text_falls_back_to_plain() {
        let record = SlipRecord {
            raw_text: "hello".to_string(),
            ..Default::default()
        };
        let text = render(&record, OutputFormat::Text).unwrap();
        assert!(text.starts_with("📄 **ข้อความที่อ่านได้:**"));
    }
}
