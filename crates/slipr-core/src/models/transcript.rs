//! Line-ordered OCR transcript.

use serde::{Deserialize, Serialize};

/// OCR text as an ordered sequence of non-empty, trimmed lines.
///
/// Line order is significant: several extractors look at "this line, then the
/// next one".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Split newline-delimited text into trimmed, non-empty lines.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Build from already-separated lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_text_drops_blank_lines() {
        let t = Transcript::from_text("  จาก \n\n\t\n นาย สมชาย  \n");
        assert_eq!(t.lines(), &["จาก".to_string(), "นาย สมชาย".to_string()]);
        assert_eq!(t.text(), "จาก\nนาย สมชาย");
    }

    #[test]
    fn test_empty() {
        assert!(Transcript::from_text(" \n ").is_empty());
    }
}
