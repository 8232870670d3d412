//! Text acquisition: the OCR capability and its output.
//!
//! The parser never calls OCR itself. Callers hold a [`TextRecognizer`],
//! turn its [`OcrResult`] into a [`Transcript`] and hand the text on.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{OcrError, Result as SlipResult};
use crate::models::Transcript;

/// Open a slip image from disk.
pub fn load_image(path: &Path) -> SlipResult<DynamicImage> {
    Ok(image::open(path)?)
}

/// Anything that can read lines of text from an image.
pub trait TextRecognizer {
    /// Recognize text lines in the image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

/// A recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Quadrilateral (x1, y1, x2, y2, x3, y3, x4, y4); all zero when unknown.
    #[serde(default)]
    pub bbox: [f32; 8],
}

impl TextLine {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox: [0.0; 8],
        }
    }

    /// Top-left corner of the axis-aligned bounding rectangle.
    fn origin(&self) -> (f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];
        (
            xs.iter().cloned().fold(f32::INFINITY, f32::min),
            ys.iter().cloned().fold(f32::INFINITY, f32::min),
        )
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized lines.
    pub lines: Vec<TextLine>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            lines: Vec::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Sort lines by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.lines.sort_by(|a, b| {
            let (ax, ay) = a.origin();
            let (bx, by) = b.origin();

            // Lines within 20 pixels vertically share a row.
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });
    }

    /// Lines scoring strictly above `min_confidence`, in order.
    pub fn transcript(&self, min_confidence: f32) -> Transcript {
        Transcript::from_lines(
            self.lines
                .iter()
                .filter(|line| line.confidence > min_confidence)
                .map(|line| line.text.as_str()),
        )
    }

    /// Like [`OcrResult::transcript`], but fails when fewer than `min_chars`
    /// non-whitespace characters survive the filter.
    pub fn usable_transcript(
        &self,
        min_confidence: f32,
        min_chars: usize,
    ) -> Result<Transcript, OcrError> {
        let transcript = self.transcript(min_confidence);
        let chars = transcript
            .lines()
            .iter()
            .flat_map(|l| l.chars())
            .filter(|c| !c.is_whitespace())
            .count();

        if chars < min_chars {
            return Err(OcrError::NoText { chars });
        }
        Ok(transcript)
    }
}
