//! Transfer time extraction.

use crate::models::Transcript;

use super::dates::split_line_date;
use super::patterns::{DATE_WITH_TIME, TIME_HM, TIME_HMS, TIME_LABELED};
use super::{find_first_valid, ExtractionMatch, FieldExtractor};

/// Time extractor.
///
/// A time printed next to the transfer date wins over a labeled one, which
/// wins over bare `HH:MM:SS` and finally bare `HH:MM` tokens.
pub struct TimeExtractor;

impl TimeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TimeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let transcript = Transcript::from_text(text);
        if let Some(found) = split_line_date(transcript.lines()) {
            if let Some(time) = normalize_time(&found.time) {
                return Some(ExtractionMatch::new(time, 0.95, found.time));
            }
        }

        find_first_valid(
            text,
            &[&DATE_WITH_TIME, &TIME_LABELED, &TIME_HMS, &TIME_HM],
            |candidate, _| normalize_time(candidate),
        )
    }
}

/// Extract the transfer time as `HH:MM` or `HH:MM:SS`.
pub fn extract_time(text: &str) -> Option<String> {
    TimeExtractor::new().extract(text).map(|m| m.value)
}

/// Zero-pad the hour and reject out-of-range components.
fn normalize_time(raw: &str) -> Option<String> {
    let parts: Vec<u32> = raw
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;

    match parts.as_slice() {
        [h, m] if *h < 24 && *m < 60 => Some(format!("{:02}:{:02}", h, m)),
        [h, m, s] if *h < 24 && *m < 60 && *s < 60 => {
            Some(format!("{:02}:{:02}:{:02}", h, m, s))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_line_time() {
        assert_eq!(
            extract_time("10:00 โฆษณา\n15 พ.ค\n2568 14:32").as_deref(),
            Some("14:32")
        );
    }

    #[test]
    fn test_time_next_to_date_wins() {
        let text = "เวลา 08:00\n15 พ.ค. 2568 - 14:32";
        assert_eq!(extract_time(text).as_deref(), Some("14:32"));
    }

    #[test]
    fn test_labeled_time() {
        assert_eq!(extract_time("Time: 9:05 น.").as_deref(), Some("09:05"));
        assert_eq!(extract_time("เวลา 21:15:07").as_deref(), Some("21:15:07"));
    }

    #[test]
    fn test_seconds_preferred_over_bare_hm() {
        assert_eq!(extract_time("12:30 xx 10:11:12").as_deref(), Some("10:11:12"));
    }

    #[test]
    fn test_out_of_range_candidates_skipped() {
        assert_eq!(extract_time("25:61 then 07:45").as_deref(), Some("07:45"));
        assert_eq!(extract_time("99:99"), None);
    }

    #[test]
    fn test_no_time() {
        assert_eq!(extract_time("ไม่มีเวลา"), None);
        assert_eq!(extract_time(""), None);
    }
}
