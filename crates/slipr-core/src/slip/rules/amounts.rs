//! Amount extraction for Thai slips (`1,234.50 บาท`).

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_BARE, AMOUNT_LABELED, AMOUNT_LABELED_INTEGRAL, AMOUNT_WITH_CURRENCY};
use super::{find_first_valid, ExtractionMatch, FieldExtractor};

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        find_first_valid(
            text,
            &[
                &AMOUNT_LABELED,
                &AMOUNT_WITH_CURRENCY,
                &AMOUNT_BARE,
                &AMOUNT_LABELED_INTEGRAL,
            ],
            |candidate, _| normalize_amount(candidate),
        )
    }
}

/// Extract the transferred amount, separators stripped.
pub fn extract_amount(text: &str) -> Option<String> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

/// Strip thousands separators; `None` unless the result is a positive number.
pub fn normalize_amount(s: &str) -> Option<String> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    let amount = Decimal::from_str(&cleaned).ok()?;
    (amount > Decimal::ZERO).then_some(cleaned)
}

/// Format an amount in Thai style (1,234.50).
pub fn format_baht(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("1,234.50").as_deref(), Some("1234.50"));
        assert_eq!(normalize_amount("500").as_deref(), Some("500"));
        assert_eq!(normalize_amount("0.00"), None);
        assert_eq!(normalize_amount("abc"), None);
    }

    #[test]
    fn test_amount_with_currency() {
        assert_eq!(extract_amount("1,234.50 บาท").as_deref(), Some("1234.50"));
        assert_eq!(extract_amount("โอน 75.00 THB").as_deref(), Some("75.00"));
    }

    #[test]
    fn test_labeled_amount_wins() {
        let text = "ค่าธรรมเนียม 0.00 บาท\nจำนวนเงิน: 2,500.00";
        assert_eq!(extract_amount(text).as_deref(), Some("2500.00"));
    }

    #[test]
    fn test_zero_candidates_are_skipped() {
        assert_eq!(
            extract_amount("ค่าธรรมเนียม 0.00 บาท\n150.25 บาท").as_deref(),
            Some("150.25")
        );
    }

    #[test]
    fn test_bare_amount() {
        assert_eq!(extract_amount("โอนเงินสำเร็จ\n300.00\n").as_deref(), Some("300.00"));
    }

    #[test]
    fn test_integral_labeled_amount() {
        assert_eq!(extract_amount("จำนวนเงิน 1,500 บาท").as_deref(), Some("1500"));
    }

    #[test]
    fn test_bare_integer_is_not_an_amount() {
        assert_eq!(extract_amount("999"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn test_format_baht() {
        assert_eq!(format_baht(Decimal::from_str("1234.5").unwrap()), "1,234.50");
        assert_eq!(format_baht(Decimal::from_str("12345678.90").unwrap()), "12,345,678.90");
        assert_eq!(format_baht(Decimal::from_str("75").unwrap()), "75.00");
    }
}
