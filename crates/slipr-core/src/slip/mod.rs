//! Slip field extraction and summaries.

mod parser;
pub mod rules;
mod summary;

pub use parser::{ExtractionResult, HeuristicSlipParser, SlipParser};
pub use summary::{format_plain_text, format_summary};
