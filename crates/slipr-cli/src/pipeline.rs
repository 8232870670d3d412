//! Wires the collaborators together: recognizer output goes to the parser,
//! parsed slips go to the sink.

use std::path::PathBuf;

use image::DynamicImage;
use tracing::{debug, info, warn};

use slipr_core::{HeuristicSlipParser, OcrConfig, SlipConfig, SlipParser, SlipRecord, TextRecognizer};

use crate::sink::{CsvSink, RecordSink};

pub struct SlipPipeline {
    parser: Box<dyn SlipParser>,
    sink: Option<Box<dyn RecordSink>>,
    ocr: OcrConfig,
}

impl SlipPipeline {
    pub fn new(parser: impl SlipParser + 'static, ocr: OcrConfig) -> Self {
        Self {
            parser: Box::new(parser),
            sink: None,
            ocr,
        }
    }

    /// Build from configuration; `log_path` overrides the configured log file.
    pub fn from_config(config: &SlipConfig, log_path: Option<PathBuf>) -> Self {
        let pipeline = Self::new(
            HeuristicSlipParser::from_config(&config.parser),
            config.ocr.clone(),
        );
        match log_path.or_else(|| config.output.log_path.clone()) {
            Some(path) => {
                let sink = CsvSink::new(path);
                debug!("Logging records to {}", sink.path().display());
                pipeline.with_sink(sink)
            }
            None => pipeline,
        }
    }

    pub fn with_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Parse a transcript and log it when it looks like a slip.
    pub fn process_text(&mut self, text: &str) -> anyhow::Result<SlipRecord> {
        let record = self.parser.try_parse(text)?;

        if let Some(sink) = self.sink.as_mut() {
            if record.looks_like_slip() {
                sink.append(&record)?;
            } else {
                info!("Transcript does not look like a slip, not logging it");
            }
        }

        Ok(record)
    }

    /// Recognize an image, then parse the surviving lines.
    pub fn process_image(
        &mut self,
        recognizer: &dyn TextRecognizer,
        image: &DynamicImage,
    ) -> anyhow::Result<SlipRecord> {
        let result = recognizer.recognize(image)?;
        debug!(
            "OCR returned {} lines in {}ms",
            result.lines.len(),
            result.processing_time_ms
        );

        let transcript = result
            .usable_transcript(self.ocr.min_confidence, self.ocr.min_text_chars)
            .inspect_err(|e| warn!("Unreadable image: {}", e))?;

        self.process_text(&transcript.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use slipr_core::{OcrError, OcrResult, TextLine};

    #[derive(Default, Clone)]
    struct MemorySink(Rc<RefCell<Vec<SlipRecord>>>);

    impl RecordSink for MemorySink {
        fn append(&mut self, record: &SlipRecord) -> anyhow::Result<()> {
            self.0.borrow_mut().push(record.clone());
            Ok(())
        }
    }

    struct FixedRecognizer(Vec<TextLine>);

    impl TextRecognizer for FixedRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<OcrResult, OcrError> {
            let mut result = OcrResult::empty(1, 1);
            result.lines = self.0.clone();
            Ok(result)
        }
    }

    fn pipeline(sink: &MemorySink) -> SlipPipeline {
        SlipPipeline::new(
            HeuristicSlipParser::new().with_reference_year(2025),
            OcrConfig::default(),
        )
        .with_sink(sink.clone())
    }

    #[test]
    fn test_slip_is_logged() {
        let sink = MemorySink::default();
        let record = pipeline(&sink).process_text("จำนวนเงิน 250.00 บาท").unwrap();

        assert_eq!(record.amount.as_deref(), Some("250.00"));
        assert_eq!(sink.0.borrow().len(), 1);
    }

    #[test]
    fn test_plain_text_is_not_logged() {
        let sink = MemorySink::default();
        pipeline(&sink).process_text("สวัสดีครับ").unwrap();
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_empty_text_fails() {
        let sink = MemorySink::default();
        assert!(pipeline(&sink).process_text("").is_err());
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_image_lines_below_confidence_are_dropped() {
        let sink = MemorySink::default();
        let recognizer = FixedRecognizer(vec![
            TextLine::new("จำนวนเงิน 99.00 บาท", 0.3),
            TextLine::new("โอนเงินสำเร็จ 120.00 บาท", 0.9),
        ]);

        let record = pipeline(&sink)
            .process_image(&recognizer, &DynamicImage::new_rgb8(1, 1))
            .unwrap();

        assert_eq!(record.amount.as_deref(), Some("120.00"));
        assert_eq!(record.raw_text, "โอนเงินสำเร็จ 120.00 บาท");
    }

    #[test]
    fn test_unreadable_image_fails() {
        let sink = MemorySink::default();
        let recognizer = FixedRecognizer(vec![TextLine::new("??", 0.2)]);

        let err = pipeline(&sink)
            .process_image(&recognizer, &DynamicImage::new_rgb8(1, 1))
            .unwrap_err();
        assert!(err.to_string().contains("usable text"));
    }
}
