//! Human-readable slip summaries.
//!
//! Formatting is pure: logging and persistence belong to the caller.

use std::fmt::Write;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::SlipRecord;

use super::rules::format_baht;

/// Format a parsed slip as a labeled report. Absent fields are omitted.
pub fn format_summary(record: &SlipRecord) -> String {
    let mut summary = String::from("📄 **สรุปข้อมูลสลิป**\n");

    let amount = record.amount.as_deref().map(|raw| {
        match Decimal::from_str(&raw.replace(',', "")) {
            Ok(value) => format!("{} บาท", format_baht(value)),
            Err(_) => format!("{} บาท", raw),
        }
    });
    let bank = record.bank.map(|b| b.canonical_name().to_string());

    let fields = [
        ("👤", "ผู้โอน", record.sender.clone()),
        ("👥", "ผู้รับ", record.recipient.clone()),
        ("🏦", "ธนาคาร", bank),
        ("💰", "จำนวนเงิน", amount),
        ("📅", "วันที่", record.date.clone()),
        ("⏰", "เวลา", record.time.clone()),
        ("🔢", "หมายเลขอ้างอิง", record.reference.clone()),
        ("💳", "เลขบัญชี", record.account_number.clone()),
    ];
    for (icon, label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(summary, "{} **{}**: {}", icon, label, value);
        }
    }

    let _ = writeln!(summary, "📝 **ข้อความเต็ม**:\n```\n{}\n```", record.raw_text);
    summary.push_str(&text_stats(&record.raw_text));
    summary
}

/// Format a transcript that does not look like a slip.
pub fn format_plain_text(raw_text: &str) -> String {
    format!(
        "📄 **ข้อความที่อ่านได้:**\n\n```\n{}\n```\n\n{}",
        raw_text,
        text_stats(raw_text)
    )
}

fn text_stats(text: &str) -> String {
    format!(
        "📝 **จำนวนตัวอักษร:** {} ตัว\n🔤 **จำนวนบรรทัด:** {} บรรทัด",
        text.chars().count(),
        text.split('\n').count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bank;
    use pretty_assertions::assert_eq;

    fn record() -> SlipRecord {
        SlipRecord {
            sender: Some("นาย สมชาย ใจดี".to_string()),
            recipient: Some("นาง สมหญิง รักดี".to_string()),
            amount: Some("1234.5".to_string()),
            date: Some("15 พฤษภาคม 2568".to_string()),
            time: Some("14:32".to_string()),
            bank: Some(Bank::Kasikorn),
            reference: Some("ABC123".to_string()),
            account_number: None,
            raw_text: "line one\nline two".to_string(),
            error: None,
        }
    }

    #[test]
    fn test_format_summary() {
        let expected = "📄 **สรุปข้อมูลสลิป**
👤 **ผู้โอน**: นาย สมชาย ใจดี
👥 **ผู้รับ**: นาง สมหญิง รักดี
🏦 **ธนาคาร**: กสิกรไทย
💰 **จำนวนเงิน**: 1,234.50 บาท
📅 **วันที่**: 15 พฤษภาคม 2568
⏰ **เวลา**: 14:32
🔢 **หมายเลขอ้างอิง**: ABC123
📝 **ข้อความเต็ม**:
```
line one
line two
```
📝 **จำนวนตัวอักษร:** 17 ตัว
🔤 **จำนวนบรรทัด:** 2 บรรทัด";

        assert_eq!(format_summary(&record()), expected);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let summary = format_summary(&SlipRecord {
            raw_text: "x".to_string(),
            ..Default::default()
        });

        assert!(!summary.contains("ผู้โอน"));
        assert!(!summary.contains("จำนวนเงิน"));
        assert!(summary.contains("📝 **จำนวนตัวอักษร:** 1 ตัว"));
    }

    #[test]
    fn test_format_is_pure() {
        let record = record();
        assert_eq!(format_summary(&record), format_summary(&record));
    }

    #[test]
    fn test_plain_text() {
        let text = format_plain_text("สวัสดี\nครับ");
        assert!(text.starts_with("📄 **ข้อความที่อ่านได้:**"));
        assert!(text.ends_with("🔤 **จำนวนบรรทัด:** 2 บรรทัด"));
    }
}
