//! Heuristic slip parser running the rule extractors in a fixed order.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::models::config::ParserConfig;
use crate::models::SlipRecord;

use super::rules::{
    AccountExtractor, AmountExtractor, BankDetector, DateExtractor, FieldExtractor,
    NameExtractor, ReferenceExtractor, TimeExtractor,
};

/// Result of slip extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted slip data.
    pub record: SlipRecord,
    /// Field-level problems that did not stop extraction.
    pub warnings: Vec<String>,
    /// Confidence of each extracted field, keyed by field name.
    pub field_confidence: BTreeMap<String, f32>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for slip parsing.
pub trait SlipParser {
    /// Parse a slip transcript into a record with detailed diagnostics.
    fn parse_detailed(&self, text: &str) -> ExtractionResult;

    /// Parse a slip transcript into a record.
    fn parse(&self, text: &str) -> SlipRecord {
        self.parse_detailed(text).record
    }

    /// Like [`SlipParser::parse`], but an empty transcript is an error
    /// instead of an error record.
    fn try_parse(&self, text: &str) -> Result<SlipRecord> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput.into());
        }
        Ok(self.parse(text))
    }
}

/// Rule-based slip parser.
#[derive(Debug, Clone)]
pub struct HeuristicSlipParser {
    /// Gregorian year used to expand two-digit years; `None` means today.
    reference_year: Option<i32>,
    /// Input beyond this many characters is ignored.
    max_input_chars: usize,
}

impl HeuristicSlipParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ParserConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            reference_year: config.reference_year,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Pin the year used to expand two-digit years.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Set the input length cap.
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    fn date_extractor(&self) -> DateExtractor {
        match self.reference_year {
            Some(year) => DateExtractor::new().with_reference_year(year),
            None => DateExtractor::new(),
        }
    }

    fn truncate<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => {
                warn!(
                    "Input truncated to {} characters for parsing",
                    self.max_input_chars
                );
                &text[..cut]
            }
            None => text,
        }
    }
}

impl Default for HeuristicSlipParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SlipParser for HeuristicSlipParser {
    fn parse_detailed(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut field_confidence = BTreeMap::new();

        if text.trim().is_empty() {
            warn!("Refusing to parse empty transcript");
            let err = ExtractionError::EmptyInput;
            warnings.push(err.to_string());
            return ExtractionResult {
                record: SlipRecord::failed(text, &err),
                warnings,
                field_confidence,
                processing_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        info!("Parsing slip from {} characters of text", text.chars().count());
        let input = self.truncate(text);
        let mut record = SlipRecord {
            raw_text: text.to_string(),
            ..SlipRecord::default()
        };

        if let Some(found) = BankDetector::new().extract(input) {
            field_confidence.insert("bank".to_string(), found.confidence);
            record.bank = Some(found.value);
        }

        if let Some(found) = ReferenceExtractor::new().extract(input) {
            field_confidence.insert("reference".to_string(), found.confidence);
            if let Some(date) = found.value.date {
                field_confidence.insert("date".to_string(), found.confidence);
                record.date = Some(date);
            }
            record.reference = Some(found.value.reference);
        }

        if record.date.is_none() {
            if let Some(found) = self.date_extractor().extract(input) {
                if let Err(e) = &found.value.calendar {
                    warnings.push(e.to_string());
                }
                field_confidence.insert("date".to_string(), found.confidence);
                record.date = Some(found.value.value);
            }
        }

        if let Some(found) = TimeExtractor::new().extract(input) {
            field_confidence.insert("time".to_string(), found.confidence);
            record.time = Some(found.value);
        }

        if let Some(found) = AmountExtractor::new().extract(input) {
            field_confidence.insert("amount".to_string(), found.confidence);
            record.amount = Some(found.value);
        }

        if let Some(found) = AccountExtractor::new().extract(input) {
            field_confidence.insert("account_number".to_string(), found.confidence);
            record.account_number = Some(found.value);
        }

        if let Some(names) = NameExtractor::new().extract(input) {
            record.sender = names.sender;
            record.recipient = names.recipient;
        }

        for (field, missing) in [
            ("amount", record.amount.is_none()),
            ("date", record.date.is_none()),
            ("sender", record.sender.is_none()),
        ] {
            if missing {
                debug!("Could not extract {}", field);
            }
        }

        debug!(
            "Extracted slip: bank={:?} amount={:?} date={:?}",
            record.bank, record.amount, record.date
        );

        ExtractionResult {
            record,
            warnings,
            field_confidence,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
