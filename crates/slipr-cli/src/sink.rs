//! Record sinks: where parsed slips are logged after display.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use slipr_core::SlipRecord;

/// Record columns shared by every CSV the CLI writes.
pub const RECORD_COLUMNS: [&str; 8] = [
    "sender",
    "recipient",
    "amount",
    "date",
    "time",
    "bank",
    "reference",
    "account_number",
];

/// Record fields in [`RECORD_COLUMNS`] order, absent fields empty.
pub fn record_fields(record: &SlipRecord) -> [String; 8] {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();
    [
        text(&record.sender),
        text(&record.recipient),
        text(&record.amount),
        text(&record.date),
        text(&record.time),
        record
            .bank
            .map(|b| b.canonical_name().to_string())
            .unwrap_or_default(),
        text(&record.reference),
        text(&record.account_number),
    ]
}

/// Destination for parsed records.
pub trait RecordSink {
    /// Persist one record.
    fn append(&mut self, record: &SlipRecord) -> anyhow::Result<()>;
}

/// Appends records to a CSV file, writing the header when the file is new.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &SlipRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let is_new = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if is_new {
            let mut header = vec!["logged_at"];
            header.extend(RECORD_COLUMNS);
            wtr.write_record(&header)?;
        }

        let logged_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut row = vec![logged_at];
        row.extend(record_fields(record));
        wtr.write_record(&row)?;
        wtr.flush()?;

        debug!("Appended record to {}", self.path.display());
        Ok(())
    }
}
