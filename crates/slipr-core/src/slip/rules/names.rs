//! Sender and recipient name extraction.
//!
//! Strategies run in order and each only fills names that are still missing:
//!
//! 1. a sender/recipient label followed by the name on the same line,
//! 2. a name-shaped line directly below a line holding a label,
//! 3. honorific-led lines confirmed by an account number next to them,
//! 4. honorific-led lines directly above a bank name line.
//!
//! The last two cover slips that print no labels at all. KBank and KTB
//! exports put the bank name under each party, sometimes with no account
//! number, so that line is the only remaining anchor.

use tracing::trace;

use crate::models::Transcript;

use super::patterns::{
    ACCOUNT_TOKEN_DIGITS, ACCOUNT_TOKEN_MASKED, BANK_IN_NAME, HONORIFIC_LED, HONORIFIC_ONLY,
    LEADING_NOISE, MASK_ONLY, MASK_TAIL, NAME_SHAPE, NAME_STOP, NOISE_LINE, RECIPIENT_MARKER,
    RECIPIENT_NAME, SENDER_MARKER, SENDER_NAME, WHITESPACE_RUN,
};
use super::FieldExtractor;

/// Minimum digit/mask characters in a masked account token.
const MIN_MASKED_ACCOUNT_CHARS: usize = 5;

/// Names found on a slip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlipNames {
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

impl SlipNames {
    fn is_complete(&self) -> bool {
        self.sender.is_some() && self.recipient.is_some()
    }
}

#[derive(Clone, Copy)]
enum Side {
    Sender,
    Recipient,
}

/// Name extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_labeled(&self, text: &str, names: &mut SlipNames) {
        if names.sender.is_none() {
            names.sender = SENDER_NAME
                .captures_iter(text)
                .find_map(|caps| candidate_name(&caps[1]));
        }
        if names.recipient.is_none() {
            names.recipient = RECIPIENT_NAME
                .captures_iter(text)
                .find_map(|caps| candidate_name(&caps[1]));
        }
    }

    fn extract_below_label(&self, lines: &[String], names: &mut SlipNames) {
        for i in 1..lines.len() {
            if names.is_complete() {
                return;
            }
            let Some(side) = label_side(&lines[i - 1]) else {
                continue;
            };
            let slot = match side {
                Side::Sender => &mut names.sender,
                Side::Recipient => &mut names.recipient,
            };
            if slot.is_some() {
                continue;
            }

            // `บจก.` on its own line is followed by the company name.
            let line = match lines.get(i + 1) {
                Some(next) if HONORIFIC_ONLY.is_match(&lines[i]) => {
                    format!("{} {}", lines[i], next)
                }
                _ => lines[i].clone(),
            };
            if let Some(name) = candidate_name(&line) {
                trace!("Name below label: {}", name);
                *slot = Some(name);
            }
        }
    }

    fn extract_by_account(&self, lines: &[String], names: &mut SlipNames) {
        let confirmed: Vec<String> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| HONORIFIC_LED.is_match(line))
            .filter(|(i, _)| account_nearby(lines, *i))
            .filter_map(|(_, line)| candidate_name(line))
            .take(2)
            .collect();

        fill_in_order(names, confirmed);
    }

    fn extract_above_bank_line(&self, lines: &[String], names: &mut SlipNames) {
        let anchored: Vec<String> = lines
            .windows(2)
            .filter(|pair| HONORIFIC_LED.is_match(&pair[0]) && is_bank_line(&pair[1]))
            .filter_map(|pair| candidate_name(&pair[0]))
            .take(2)
            .collect();

        fill_in_order(names, anchored);
    }
}

/// First name found is the sender, the second the recipient.
fn fill_in_order(names: &mut SlipNames, found: Vec<String>) {
    let mut found = found.into_iter();
    if let Some(first) = found.next() {
        names.sender.get_or_insert(first);
    }
    if let Some(second) = found.next() {
        names.recipient.get_or_insert(second);
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = SlipNames;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let mut names = SlipNames::default();

        self.extract_labeled(text, &mut names);
        if !names.is_complete() {
            let transcript = Transcript::from_text(text);
            self.extract_below_label(transcript.lines(), &mut names);
            if !names.is_complete() {
                self.extract_by_account(transcript.lines(), &mut names);
            }
            if names.sender.is_none() && names.recipient.is_none() {
                self.extract_above_bank_line(transcript.lines(), &mut names);
            }
        }

        (names.sender.is_some() || names.recipient.is_some()).then_some(names)
    }
}

/// Extract sender and recipient names.
pub fn extract_names(text: &str) -> SlipNames {
    NameExtractor::new().extract(text).unwrap_or_default()
}

/// Clean a raw name candidate: leading punctuation, bank names and trailing
/// masked account fragments are removed and whitespace is collapsed.
pub fn clean_name(raw: &str) -> Option<String> {
    let name = LEADING_NOISE.replace(raw, "");
    let name = BANK_IN_NAME.replace_all(&name, " ");
    let name = WHITESPACE_RUN.replace_all(&name, " ");
    let name = MASK_TAIL.replace(name.trim(), "");
    let name = name.trim();

    if name.is_empty() || MASK_ONLY.is_match(name) {
        None
    } else {
        Some(name.to_string())
    }
}

/// A cleaned name, or `None` when the text is not shaped like a name.
fn candidate_name(raw: &str) -> Option<String> {
    let truncated = match NAME_STOP.find(raw) {
        Some(stop) => &raw[..stop.start()],
        None => raw,
    };

    let name = clean_name(truncated)?;
    if !NAME_SHAPE.is_match(&name) || NOISE_LINE.is_match(&name) || is_bare_label(&name) {
        return None;
    }
    Some(name)
}

fn is_bare_label(s: &str) -> bool {
    [&*SENDER_MARKER, &*RECIPIENT_MARKER]
        .iter()
        .any(|marker| marker.find(s).is_some_and(|m| m.len() == s.len()))
}

/// Which label a line carries; the later one wins when both appear.
fn label_side(line: &str) -> Option<Side> {
    let sender = SENDER_MARKER.find_iter(line).last().map(|m| m.start());
    let recipient = RECIPIENT_MARKER.find_iter(line).last().map(|m| m.start());
    match (sender, recipient) {
        (Some(s), Some(r)) if r > s => Some(Side::Recipient),
        (Some(_), _) => Some(Side::Sender),
        (None, Some(_)) => Some(Side::Recipient),
        (None, None) => None,
    }
}

/// A line that names a bank and nothing else.
fn is_bank_line(line: &str) -> bool {
    BANK_IN_NAME.is_match(line) && clean_name(line).is_none()
}

fn has_account_token(line: &str) -> bool {
    if ACCOUNT_TOKEN_DIGITS.is_match(line) {
        return true;
    }
    ACCOUNT_TOKEN_MASKED.find_iter(line).any(|m| {
        let token = m.as_str();
        let significant = token
            .chars()
            .filter(|c| c.is_ascii_digit() || c.eq_ignore_ascii_case(&'x'))
            .count();
        token.contains(['x', 'X']) && significant >= MIN_MASKED_ACCOUNT_CHARS
    })
}

/// Account token on the line itself, the next line, or two lines down when
/// the line between is a bank or other noise line.
fn account_nearby(lines: &[String], i: usize) -> bool {
    if has_account_token(&lines[i]) {
        return true;
    }
    match (lines.get(i + 1), lines.get(i + 2)) {
        (Some(next), _) if has_account_token(next) => true,
        (Some(next), Some(after)) => {
            (NOISE_LINE.is_match(next) || BANK_IN_NAME.is_match(next)) && has_account_token(after)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_name_strips_bank_code() {
        assert_eq!(clean_name("นาย สมชาย ใจดี SCB").as_deref(), Some("นาย สมชาย ใจดี"));
    }

    #[test]
    fn test_clean_name_strips_noise_and_masks() {
        assert_eq!(clean_name(": นาง  สมหญิง   รักดี").as_deref(), Some("นาง สมหญิง รักดี"));
        assert_eq!(clean_name("นาย สมชาย xxx-xxx1234-5").as_deref(), Some("นาย สมชาย"));
        assert_eq!(clean_name("ธ.กสิกรไทย"), None);
        assert_eq!(clean_name("xxx-xxx-x"), None);
        assert_eq!(clean_name("   "), None);
    }

    #[test]
    fn test_labeled_names() {
        let names = extract_names("จาก นาย สมชาย ใจดี xxx-xxx1234-5\nไปยัง นาง สมหญิง รักดี");
        assert_eq!(names.sender.as_deref(), Some("นาย สมชาย ใจดี"));
        assert_eq!(names.recipient.as_deref(), Some("นาง สมหญิง รักดี"));
    }

    #[test]
    fn test_english_labels() {
        let names = extract_names("From: Mr. John Smith\nTo: Ms. Jane Doe Bank of Ayudhya");
        assert_eq!(names.sender.as_deref(), Some("Mr. John Smith"));
        assert_eq!(names.recipient.as_deref(), Some("Ms. Jane Doe"));
    }

    #[test]
    fn test_name_below_label() {
        let names = extract_names("จาก\nนาย สมชาย ใจดี\nไปยัง\nนาง สมหญิง รักดี");
        assert_eq!(names.sender.as_deref(), Some("นาย สมชาย ใจดี"));
        assert_eq!(names.recipient.as_deref(), Some("นาง สมหญิง รักดี"));
    }

    #[test]
    fn test_honorific_only_line_joins_next() {
        let names = extract_names("ไปยัง\nบจก.\nสยามเทรดดิ้ง");
        assert_eq!(names.recipient.as_deref(), Some("บจก. สยามเทรดดิ้ง"));
    }

    #[test]
    fn test_account_proximity_names() {
        let text = "โอนเงินสำเร็จ\n15 พ.ค. 2568 14:32\nนาย สมชาย ใจดี\nธ.กสิกรไทย\nxxx-xxx1234-5\nนาง สมหญิง รักดี\nxxx-xxx9876-1\nจำนวนเงิน 1,500.00 บาท";
        let names = extract_names(text);

        assert_eq!(names.sender.as_deref(), Some("นาย สมชาย ใจดี"));
        assert_eq!(names.recipient.as_deref(), Some("นาง สมหญิง รักดี"));
    }

    #[test]
    fn test_unconfirmed_honorific_line_is_ignored() {
        let names = extract_names("นาย สมชาย ใจดี\nขอบคุณที่ใช้บริการ");
        assert_eq!(names, SlipNames::default());
    }

    #[test]
    fn test_names_above_bank_lines() {
        let names = extract_names("นาย สมชาย ใจดี\nธ.กสิกรไทย\nนาง สมหญิง รักดี\nธ.กสิกรไทย\n100.00 บาท");
        assert_eq!(names.sender.as_deref(), Some("นาย สมชาย ใจดี"));
        assert_eq!(names.recipient.as_deref(), Some("นาง สมหญิง รักดี"));
    }

    #[test]
    fn test_bank_line_anchor_needs_bank_only_line() {
        let names = extract_names("นาย สมชาย ใจดี\nโอนเงินสำเร็จ\nนาง สมหญิง รักดี\nขอบคุณ");
        assert_eq!(names, SlipNames::default());
    }

    #[test]
    fn test_bare_digit_account_confirms_name() {
        let names = extract_names("นาย สมชาย ใจดี\n1234567890");
        assert_eq!(names.sender.as_deref(), Some("นาย สมชาย ใจดี"));
        assert_eq!(names.recipient, None);
    }
}
