//! Configuration structures for the slip pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SlipError};

/// Plausible range for `parser.reference_year`.
const REFERENCE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2200;

/// Main configuration for the slipr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipConfig {
    /// Text acquisition configuration.
    pub ocr: OcrConfig,

    /// Slip parser configuration.
    pub parser: ParserConfig,

    /// Output and logging configuration.
    pub output: OutputConfig,
}

/// OCR adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Lines recognized below this confidence are dropped (0.0 - 1.0).
    pub min_confidence: f32,

    /// Transcripts shorter than this (after trimming) count as unreadable.
    pub min_text_chars: usize,

    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl OcrConfig {
    /// Full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            min_text_chars: 3,
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "th_rec.onnx".to_string(),
            dictionary: "th_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// Slip parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Transcripts are truncated to this many characters before parsing.
    pub max_input_chars: usize,

    /// Gregorian year used to expand two-digit years. `None` means the
    /// current year.
    pub reference_year: Option<i32>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 20_000,
            reference_year: None,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file every parsed record is appended to.
    pub log_path: Option<PathBuf>,
}

impl SlipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SlipError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SlipError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ocr.min_confidence) {
            return Err(SlipError::Config(format!(
                "ocr.min_confidence must be between 0 and 1, got {}",
                self.ocr.min_confidence
            )));
        }
        if self.parser.max_input_chars == 0 {
            return Err(SlipError::Config(
                "parser.max_input_chars must be positive".to_string(),
            ));
        }
        if let Some(year) = self.parser.reference_year {
            if !REFERENCE_YEARS.contains(&year) {
                return Err(SlipError::Config(format!(
                    "parser.reference_year must be between {} and {}, got {}",
                    REFERENCE_YEARS.start(),
                    REFERENCE_YEARS.end(),
                    year
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SlipConfig =
            serde_json::from_str(r#"{ "parser": { "reference_year": 2025 } }"#).unwrap();
        assert_eq!(config.parser.reference_year, Some(2025));
        assert_eq!(config.parser.max_input_chars, 20_000);
        assert_eq!(config.ocr.min_confidence, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SlipConfig::default();
        config.ocr.min_text_chars = 10;
        config.save(&path).unwrap();

        let loaded = SlipConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.min_text_chars, 10);
        assert_eq!(loaded.ocr.model_path("det.onnx"), PathBuf::from("models/det.onnx"));
    }

    #[test]
    fn test_validate() {
        assert!(SlipConfig::default().validate().is_ok());

        let mut config = SlipConfig::default();
        config.ocr.min_confidence = 1.5;
        assert!(matches!(config.validate(), Err(SlipError::Config(_))));
    }

    #[test]
    fn test_validate_reference_year() {
        let mut config = SlipConfig::default();
        config.parser.reference_year = Some(2025);
        assert!(config.validate().is_ok());

        config.parser.reference_year = Some(i32::MAX);
        assert!(matches!(config.validate(), Err(SlipError::Config(_))));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(SlipConfig::from_file(&missing), Err(SlipError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(SlipConfig::from_file(&broken), Err(SlipError::Config(_))));
    }
}
