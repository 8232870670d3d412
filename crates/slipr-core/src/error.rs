//! Error types for the slipr-core library.

use thiserror::Error;

/// Main error type for the slipr library.
#[derive(Error, Debug)]
pub enum SlipError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Slip field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the text acquisition layer.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The image yielded no usable text.
    #[error("could not extract any usable text ({chars} characters recognized)")]
    NoText { chars: usize },
}

/// Errors related to slip field extraction.
///
/// Only [`ExtractionError::EmptyInput`] fails a whole record; the others are
/// reported as per-field warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The transcript was empty or whitespace only.
    #[error("no text to parse")]
    EmptyInput,

    /// A date was found but is not a plausible calendar date.
    #[error("implausible date {value}: {reason}")]
    InvalidDate { value: String, reason: String },
}

/// Result type for the slipr library.
pub type Result<T> = std::result::Result<T, SlipError>;
