//! Transaction reference extraction, including layouts where the reference
//! is printed between the day and the month of the transfer date.

use super::patterns::{
    month_number, thai_month_name, REF_CODE_BELOW_LABEL, REF_DATE_INTERLEAVED, REF_LABELED,
    REF_LABELED_LONG, REF_STANDALONE,
};
use super::{find_first_valid, ExtractionMatch, FieldExtractor};

/// A reference, with the date when both were recovered from one run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Reference with all whitespace removed.
    pub reference: String,
    /// `"{day} {month} {year}"` from the interleaved layout.
    pub date: Option<String>,
}

/// Reference extractor.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_interleaved(&self, text: &str) -> Option<ExtractionMatch<ReferenceMatch>> {
        for caps in REF_DATE_INTERLEAVED.captures_iter(text) {
            let reference = strip_whitespace(&caps[2]);
            if reference.chars().filter(|c| c.is_ascii_alphanumeric()).count() < 6
                || !reference.chars().any(|c| c.is_ascii_digit())
            {
                continue;
            }

            let day = match caps[1].parse::<u32>() {
                Ok(day) if (1..=31).contains(&day) => day,
                _ => continue,
            };
            let Some(month) = month_number(&caps[3]).and_then(thai_month_name) else {
                continue;
            };
            let date = format!("{} {} {}", day, month, &caps[4]);

            let (start, end) = (caps.get(1)?.start(), caps.get(4)?.end());
            return Some(
                ExtractionMatch::new(
                    ReferenceMatch {
                        reference,
                        date: Some(date),
                    },
                    0.9,
                    &text[start..end],
                )
                .with_position(start, end),
            );
        }
        None
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = ExtractionMatch<ReferenceMatch>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(found) = self.extract_interleaved(text) {
            return Some(found);
        }

        find_first_valid(
            text,
            &[
                &REF_LABELED_LONG,
                &REF_CODE_BELOW_LABEL,
                &REF_LABELED,
                &REF_STANDALONE,
            ],
            |candidate, index| {
                let reference = strip_whitespace(candidate);
                // The generic patterns also hit plain words; a reference
                // always carries digits.
                if index > 1 && !reference.chars().any(|c| c.is_ascii_digit()) {
                    return None;
                }
                Some(ReferenceMatch {
                    reference,
                    date: None,
                })
            },
        )
    }
}

/// Extract the transaction reference (and the interleaved date, if any).
pub fn extract_reference(text: &str) -> Option<ReferenceMatch> {
    ReferenceExtractor::new().extract(text).map(|m| m.value)
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
