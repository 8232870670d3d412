//! Bank identification from slip text.

use tracing::trace;

use crate::models::Bank;

use super::patterns::{RECIPIENT_MARKER, SCB_CODE};
use super::{ExtractionMatch, FieldExtractor};

/// Maps transcript text to the sender-side bank.
///
/// SCB is checked before every other bank, with a word-boundary pattern for
/// its code, because OCR noise frequently contains its letters. The sender
/// side of the slip (text before the first recipient marker) is searched
/// first; the whole transcript is the fallback.
pub struct BankDetector;

impl BankDetector {
    pub fn new() -> Self {
        Self
    }

    fn detect_in(&self, text: &str) -> Option<Bank> {
        if SCB_CODE.is_match(text) {
            return Some(Bank::Scb);
        }

        let lower = text.to_lowercase();
        if Bank::Scb.aliases().iter().any(|alias| lower.contains(alias)) {
            return Some(Bank::Scb);
        }

        Bank::ALL
            .into_iter()
            .filter(|bank| *bank != Bank::Scb)
            .find(|bank| bank.aliases().iter().any(|alias| lower.contains(alias)))
    }
}

impl Default for BankDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BankDetector {
    type Output = ExtractionMatch<Bank>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(marker) = RECIPIENT_MARKER.find(text) {
            let sender_side = &text[..marker.start()];
            if let Some(bank) = self.detect_in(sender_side) {
                trace!("Bank {} found before recipient marker", bank);
                return Some(ExtractionMatch::new(bank, 0.9, sender_side));
            }
        }

        self.detect_in(text)
            .map(|bank| ExtractionMatch::new(bank, 0.7, text))
    }
}

/// Detect the sender-side bank in slip text.
pub fn detect_bank(text: &str) -> Option<Bank> {
    BankDetector::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_thai_name() {
        assert_eq!(detect_bank("ธ.กสิกรไทย\nโอนเงินสำเร็จ"), Some(Bank::Kasikorn));
        assert_eq!(detect_bank("ธนาคารกรุงไทย"), Some(Bank::Krungthai));
    }

    #[test]
    fn test_detect_case_insensitive_code() {
        assert_eq!(detect_bank("KBank transfer"), Some(Bank::Kasikorn));
        assert_eq!(detect_bank("Krungthai NEXT"), Some(Bank::Krungthai));
    }

    #[test]
    fn test_scb_takes_precedence_over_earlier_alias() {
        let text = "กสิกรไทย\nSCB\nไปยัง\nนาง สมหญิง";
        assert_eq!(detect_bank(text), Some(Bank::Scb));
    }

    #[test]
    fn test_sender_side_searched_first() {
        let text = "ธ.กรุงเทพ\nนาย สมชาย\nไปยัง\nSCB\nนาง สมหญิง";
        assert_eq!(detect_bank(text), Some(Bank::Bangkok));
    }

    #[test]
    fn test_falls_back_to_whole_text() {
        let text = "นาย สมชาย\nไปยัง\nธ.กสิกรไทย\nนาง สมหญิง";
        assert_eq!(detect_bank(text), Some(Bank::Kasikorn));
    }

    #[test]
    fn test_scb_code_inside_word_is_ignored() {
        assert_eq!(detect_bank("abscbde"), None);
    }

    #[test]
    fn test_no_bank() {
        assert_eq!(detect_bank("hello world"), None);
        assert_eq!(detect_bank(""), None);
    }
}
