//! Rule-based field extractors for Thai payment slips.

pub mod account;
pub mod amounts;
pub mod bank;
pub mod dates;
pub mod names;
pub mod patterns;
pub mod reference;
pub mod time;

pub use account::{extract_account_number, AccountExtractor};
pub use amounts::{extract_amount, format_baht, normalize_amount, AmountExtractor};
pub use bank::{detect_bank, BankDetector};
pub use dates::{extract_date, DateExtractor, DateMatch};
pub use names::{clean_name, extract_names, NameExtractor, SlipNames};
pub use reference::{extract_reference, ReferenceExtractor, ReferenceMatch};
pub use time::{extract_time, TimeExtractor};

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Return the first non-empty capture group of the first pattern that
/// matches. Patterns are tried in order, so their order is the precedence.
pub fn find_first_match(text: &str, patterns: &[&Regex]) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern.captures(text).and_then(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().trim())
                .find(|s| !s.is_empty())
                .map(str::to_string)
        })
    })
}

/// Like [`find_first_match`], but every capture is passed through `accept`
/// and rejected captures keep the search going, first through later matches
/// of the same pattern and then through the next pattern.
///
/// The closure receives the capture and the index of the pattern it came from.
pub fn find_first_valid<T, F>(
    text: &str,
    patterns: &[&Regex],
    mut accept: F,
) -> Option<ExtractionMatch<T>>
where
    F: FnMut(&str, usize) -> Option<T>,
{
    for (index, pattern) in patterns.iter().enumerate() {
        for caps in pattern.captures_iter(text) {
            let Some(group) = caps.iter().skip(1).flatten().find(|m| !m.as_str().trim().is_empty())
            else {
                continue;
            };
            if let Some(value) = accept(group.as_str().trim(), index) {
                // Earlier patterns are the more specific ones.
                let confidence = (0.95 - 0.15 * index as f32).max(0.3);
                return Some(
                    ExtractionMatch::new(value, confidence, group.as_str())
                        .with_position(group.start(), group.end()),
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_match_respects_order() {
        let generic = Regex::new(r"([0-9]+)").unwrap();
        let labeled = Regex::new(r"ref:([0-9]+)").unwrap();

        let text = "123 ref:456";
        assert_eq!(find_first_match(text, &[&labeled, &generic]).as_deref(), Some("456"));
        assert_eq!(find_first_match(text, &[&generic, &labeled]).as_deref(), Some("123"));
        assert_eq!(find_first_match("abc", &[&labeled, &generic]), None);
    }

    #[test]
    fn test_find_first_match_skips_empty_groups() {
        let pattern = Regex::new(r"(a*)(b+)").unwrap();
        assert_eq!(find_first_match("bb", &[&pattern]).as_deref(), Some("bb"));
    }

    #[test]
    fn test_find_first_valid_continues_after_rejection() {
        let pattern = Regex::new(r"([0-9]+)").unwrap();
        let result = find_first_valid("0 0 7", &[&pattern], |s, _| {
            s.parse::<u32>().ok().filter(|n| *n > 0)
        })
        .unwrap();

        assert_eq!(result.value, 7);
        assert_eq!(result.position, Some((4, 5)));
    }
}
