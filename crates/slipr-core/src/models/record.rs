//! Structured record extracted from a slip transcript.

use serde::{Deserialize, Serialize};

use super::bank::Bank;

/// Words whose presence marks a transcript as a payment slip even when no
/// amount was recovered.
const SLIP_MARKERS: [&str; 4] = ["จำนวนเงิน", "บาท", "THB", "Amount"];

/// A best-effort structured view of one payment slip.
///
/// Every optional field is either well-formed or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipRecord {
    /// Payer name.
    pub sender: Option<String>,

    /// Payee name.
    pub recipient: Option<String>,

    /// Amount in baht, digits with an optional two-digit fraction, no separators.
    pub amount: Option<String>,

    /// `"{day} {Thai month} {year}"`, year as written on the slip.
    pub date: Option<String>,

    /// `HH:MM` or `HH:MM:SS`.
    pub time: Option<String>,

    /// Sender-side bank.
    pub bank: Option<Bank>,

    /// Transaction reference, whitespace stripped.
    pub reference: Option<String>,

    /// Masked or partial account number, verbatim.
    pub account_number: Option<String>,

    /// Original transcript.
    pub raw_text: String,

    /// Set only when the whole record could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SlipRecord {
    /// A record carrying only an error marker.
    pub fn failed(raw_text: impl Into<String>, error: impl ToString) -> Self {
        Self {
            raw_text: raw_text.into(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Whether any field besides the raw text was recovered.
    pub fn has_fields(&self) -> bool {
        self.sender.is_some()
            || self.recipient.is_some()
            || self.amount.is_some()
            || self.date.is_some()
            || self.time.is_some()
            || self.bank.is_some()
            || self.reference.is_some()
            || self.account_number.is_some()
    }

    /// Heuristic used by callers to decide between a slip summary and a
    /// plain-text reply.
    pub fn looks_like_slip(&self) -> bool {
        self.amount.is_some() || SLIP_MARKERS.iter().any(|m| self.raw_text.contains(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record() {
        let record = SlipRecord::failed("", "no text to parse");
        assert_eq!(record.error.as_deref(), Some("no text to parse"));
        assert!(!record.has_fields());
    }

    #[test]
    fn test_looks_like_slip() {
        let mut record = SlipRecord {
            raw_text: "hello world".to_string(),
            ..Default::default()
        };
        assert!(!record.looks_like_slip());

        record.raw_text = "โอนเงิน 100 บาท".to_string();
        assert!(record.looks_like_slip());

        record.raw_text = "hello".to_string();
        record.amount = Some("100.00".to_string());
        assert!(record.looks_like_slip());
    }

    #[test]
    fn test_error_is_skipped_when_absent() {
        let json = serde_json::to_value(SlipRecord::default()).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("sender").is_some());
    }
}
