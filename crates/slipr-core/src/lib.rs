//! Core library for Thai bank slip OCR processing.
//!
//! This crate provides:
//! - Slip data models (record, bank table, transcript, configuration)
//! - The OCR capability trait, with a `pure-onnx-ocr` adapter behind the
//!   `native` feature
//! - Heuristic extraction of sender, recipient, amount, date, time, bank,
//!   reference and account number from OCR text
//! - Human-readable slip summaries

pub mod error;
pub mod models;
pub mod ocr;
pub mod slip;

pub use error::{ExtractionError, OcrError, Result, SlipError};
pub use models::config::{OcrConfig, OutputConfig, ParserConfig, SlipConfig};
pub use models::{Bank, SlipRecord, Transcript};
pub use ocr::{OcrResult, TextLine, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use slip::{
    format_plain_text, format_summary, ExtractionResult, HeuristicSlipParser, SlipParser,
};
