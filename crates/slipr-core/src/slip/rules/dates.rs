//! Date extraction for Thai slips.
//!
//! Dates are reported as `"{day} {full Thai month} {year}"` with the year as
//! printed. Slips mix Buddhist Era and Gregorian years, so the year is only
//! converted internally to check that the date exists.

use chrono::{Datelike, Local, NaiveDate};
use tracing::warn;

use crate::error::ExtractionError;
use crate::models::Transcript;

use super::patterns::{
    month_number, thai_month_name, DATE_NUMERIC, DIGIT_RUN, MONTH_YEAR, SPLIT_DAY_LINE,
    SPLIT_YEAR_TIME_LINE,
};
use super::{ExtractionMatch, FieldExtractor};

/// Years above this are Buddhist Era.
const BUDDHIST_ERA_THRESHOLD: i32 = 2500;

/// Offset between Buddhist Era and Gregorian years.
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// An extracted date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Display form: normalized when valid, the raw tokens otherwise.
    pub value: String,
    /// Time printed next to the date in the split-line layout.
    pub time: Option<String>,
    /// Gregorian calendar date, or why the tokens do not form one.
    pub calendar: Result<NaiveDate, ExtractionError>,
}

/// Day/abbreviation on one line and year/time on the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitLineDate {
    pub day: String,
    pub month: String,
    pub year: String,
    pub time: String,
}

/// Date field extractor.
pub struct DateExtractor {
    reference_year: i32,
}

impl DateExtractor {
    /// Create an extractor that expands two-digit years around the current year.
    pub fn new() -> Self {
        Self {
            reference_year: Local::now().year(),
        }
    }

    /// Use a fixed Gregorian year when expanding two-digit years.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Strategy A: one bank app exports `15 พ.ค` and `2568 14:32` as two lines.
    fn extract_split_line(&self, transcript: &Transcript) -> Option<DateMatch> {
        let found = split_line_date(transcript.lines())?;
        // Unknown abbreviations are passed through as printed.
        let month_name = month_number(&found.month)
            .and_then(thai_month_name)
            .unwrap_or(found.month.as_str());
        let day: u32 = found.day.parse().ok()?;

        Some(DateMatch {
            value: format!("{} {} {}", day, month_name, found.year),
            time: Some(found.time.clone()),
            calendar: self.validate(&found.day, &found.month, &found.year),
        })
    }

    /// Strategy B: month name and year on one line, the day before them.
    fn extract_month_year(&self, text: &str) -> Option<DateMatch> {
        let caps = MONTH_YEAR.captures(text)?;
        let whole = caps.get(0)?;

        // The number closest to the month is the most likely day; earlier
        // ones tend to be account fragments.
        let day = DIGIT_RUN
            .find_iter(&text[..whole.start()])
            .filter(|m| m.len() <= 2)
            .last()
            .map(|m| m.as_str().to_string())?;

        Some(self.build(&day, &caps[1], &caps[2]))
    }

    fn extract_numeric(&self, text: &str) -> Option<DateMatch> {
        let caps = DATE_NUMERIC.captures(text)?;
        Some(self.build(&caps[1], &caps[2], &caps[3]))
    }

    fn build(&self, day: &str, month: &str, year: &str) -> DateMatch {
        let calendar = self.validate(day, month, year);
        let value = match &calendar {
            Ok(_) => {
                let day: u32 = day.parse().unwrap_or_default();
                let month_name = month_number(month)
                    .or_else(|| month.parse().ok())
                    .and_then(thai_month_name)
                    .unwrap_or(month);
                let year = self.expand_year(year).unwrap_or_default();
                format!("{} {} {}", day, month_name, year)
            }
            Err(e) => {
                warn!("Keeping unvalidated date: {}", e);
                format!("{} {} {}", day, month, year)
            }
        };

        DateMatch {
            value,
            time: None,
            calendar,
        }
    }

    /// Expand a two-digit year to a Buddhist Era year in the current century.
    /// `None` when the reference year is too large to expand around.
    fn expand_year(&self, year: &str) -> Option<i32> {
        let parsed: i32 = year.parse().ok()?;
        if year.len() <= 2 {
            let be_now = self.reference_year.checked_add(BUDDHIST_ERA_OFFSET)?;
            (be_now / 100 * 100).checked_add(parsed)
        } else {
            Some(parsed)
        }
    }

    fn validate(&self, day: &str, month: &str, year: &str) -> Result<NaiveDate, ExtractionError> {
        let raw = format!("{} {} {}", day, month, year);
        let invalid = |reason: &str| ExtractionError::InvalidDate {
            value: raw.clone(),
            reason: reason.to_string(),
        };

        let day: u32 = day.parse().map_err(|_| invalid("day is not a number"))?;
        let month = month_number(month)
            .or_else(|| month.parse().ok())
            .ok_or_else(|| invalid("unknown month"))?;
        let year = self.expand_year(year).ok_or_else(|| invalid("year cannot be resolved"))?;

        if !(1..=31).contains(&day) {
            return Err(invalid("day out of range"));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month out of range"));
        }

        NaiveDate::from_ymd_opt(to_gregorian(year), month, day)
            .ok_or_else(|| invalid("no such calendar day"))
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<DateMatch>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let transcript = Transcript::from_text(text);

        if let Some(found) = self.extract_split_line(&transcript) {
            let source = found.value.clone();
            return Some(ExtractionMatch::new(found, 0.9, source));
        }

        let found = self
            .extract_month_year(text)
            .or_else(|| self.extract_numeric(text))?;
        let confidence = if found.calendar.is_ok() { 0.85 } else { 0.3 };
        let source = found.value.clone();
        Some(ExtractionMatch::new(found, confidence, source))
    }
}

/// Extract the slip date.
pub fn extract_date(text: &str) -> Option<DateMatch> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

/// Convert a Buddhist Era year to Gregorian; Gregorian years pass through.
pub fn to_gregorian(year: i32) -> i32 {
    if year > BUDDHIST_ERA_THRESHOLD {
        year - BUDDHIST_ERA_OFFSET
    } else {
        year
    }
}

pub(crate) fn split_line_date(lines: &[String]) -> Option<SplitLineDate> {
    lines.windows(2).find_map(|pair| {
        let day_line = SPLIT_DAY_LINE.captures(&pair[0])?;
        let year_line = SPLIT_YEAR_TIME_LINE.captures(&pair[1])?;
        Some(SplitLineDate {
            day: day_line[1].to_string(),
            month: day_line[2].to_string(),
            year: year_line[1].to_string(),
            time: year_line[2].to_string(),
        })
    })
}
