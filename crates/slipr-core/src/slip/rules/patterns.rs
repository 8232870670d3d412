//! Common regex patterns and lookup tables for Thai slip extraction.
//!
//! Patterns use the `regex` crate, so matching is linear in the input size.
//! Numeric classes are spelled `[0-9]` because `\d` would also accept Thai
//! digits, which the downstream parsers reject.

use lazy_static::lazy_static;
use regex::Regex;

/// Full Thai month names, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Thai month abbreviations with the dots removed, January first.
const THAI_MONTH_ABBR: [&str; 12] = [
    "มค", "กพ", "มีค", "เมย", "พค", "มิย", "กค", "สค", "กย", "ตค", "พย", "ธค",
];

const ENGLISH_MONTH_PREFIX: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const FULL_MONTH_ALT: &str = "มกราคม|กุมภาพันธ์|มีนาคม|เมษายน|พฤษภาคม|มิถุนายน|กรกฎาคม|สิงหาคม|กันยายน|ตุลาคม|พฤศจิกายน|ธันวาคม";

const ABBR_MONTH_ALT: &str = r"(?:มี\.?ค|ม\.?ค|ก\.?พ|เม\.?ย|พ\.?ค|มิ\.?ย|ก\.?ค|ส\.?ค|ก\.?ย|ต\.?ค|พ\.?ย|ธ\.?ค)\.?";

const ENGLISH_MONTH_ALT: &str = r"\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?";

const HONORIFIC_ALT: &str = r"(?:นางสาว|นาง|นาย|น\.ส\.?|ด\.ช\.?|ด\.ญ\.?|ดร\.?|บจก\.?|บมจ\.?|หจก\.?|บริษัท|\bmrs\b\.?|\bmr\b\.?|\bms\b\.?|\bmiss\b|\bco\.,?\s*ltd\b\.?)";

const SENDER_LABEL_ALT: &str = r"(?:จาก|ผู้โอน|\bfrom\b|\bsender\b)";

const RECIPIENT_LABEL_ALT: &str = r"(?:ไปยัง|ผู้รับ|ถึง|\bto\b|\brecipient\b)";

/// Compile a pattern after expanding the `<MONTH>`, `<THAI_MONTH>`, `<ABBR>`,
/// `<HONORIFIC>`, `<SENDER>` and `<RECIPIENT>` placeholders.
fn build(pattern: &str) -> Regex {
    let month = format!("(?:{}|{}|{})", FULL_MONTH_ALT, ABBR_MONTH_ALT, ENGLISH_MONTH_ALT);
    let thai_month = format!("(?:{}|{})", FULL_MONTH_ALT, ABBR_MONTH_ALT);
    let expanded = pattern
        .replace("<MONTH>", &month)
        .replace("<THAI_MONTH>", &thai_month)
        .replace("<ABBR>", ABBR_MONTH_ALT)
        .replace("<HONORIFIC>", HONORIFIC_ALT)
        .replace("<SENDER>", SENDER_LABEL_ALT)
        .replace("<RECIPIENT>", RECIPIENT_LABEL_ALT);
    Regex::new(&expanded).unwrap()
}

lazy_static! {
    // Bank detection
    pub static ref SCB_CODE: Regex = Regex::new(r"(?i)\bu?scb\b").unwrap();

    pub static ref RECIPIENT_MARKER: Regex = build(r"(?i)<RECIPIENT>");

    pub static ref SENDER_MARKER: Regex = build(r"(?i)<SENDER>");

    // Reference number, optionally interleaved with the date
    pub static ref REF_DATE_INTERLEAVED: Regex = build(
        r"(?:^|[^0-9])([0-9]{1,2})[ \t]+([0-9A-Za-z][0-9A-Za-z./:\- \t]{5,}?)[ \t]*(<THAI_MONTH>)[ \t]*([0-9]{4})(?:[^0-9]|$)"
    );

    pub static ref REF_LABELED_LONG: Regex = Regex::new(
        r"(?i)(?:รหัสอ้างอิง|เลขที่อ้างอิง|หมายเลขอ้างอิง|เลขที่รายการ|รหัสธุรกรรม|อ้างอิง|\bref(?:erence)?\b\.?)\s*[:#]?\s*([0-9A-Za-z]{10,})"
    ).unwrap();

    pub static ref REF_LABELED: Regex = Regex::new(
        r"(?i)(?:รหัสอ้างอิง|เลขที่อ้างอิง|หมายเลขอ้างอิง|เลขที่รายการ|รหัสธุรกรรม|อ้างอิง|\bref(?:erence)?\b\.?(?:\s*(?:no|number)\b\.?)?|\btransaction\s+id\b)\s*[:#.]?\s*([0-9A-Za-z][0-9A-Za-z\-/.:]*[0-9A-Za-z])"
    ).unwrap();

    // Label alone on its line with the code on the next one (KTB merchant slips)
    pub static ref REF_CODE_BELOW_LABEL: Regex = Regex::new(
        r"(?m)(?:รหัสธุรกรรม|เลขที่อ้างอิง)[ \t]*\n[ \t]*([0-9A-Za-z]{4,})[ \t]*$"
    ).unwrap();

    pub static ref REF_STANDALONE: Regex = Regex::new(r"\b([0-9A-Za-z]{15,})\b").unwrap();

    // Dates
    pub static ref SPLIT_DAY_LINE: Regex = build(r"(?:^|[^0-9])([0-9]{1,2})[ \t]*(<ABBR>)[ \t]*$");

    pub static ref SPLIT_YEAR_TIME_LINE: Regex = Regex::new(
        r"^([0-9]{4})\s+([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)(?:[^0-9]|$)"
    ).unwrap();

    pub static ref MONTH_YEAR: Regex = build(r"(?i)(<MONTH>)[ \t]*([0-9]{4}|[0-9]{2})\b");

    // Thai letters count as word characters, so `\b` misses `วันที่15`.
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();

    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b([0-9]{1,2})[/\-]([0-9]{1,2})[/\-]([0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    // Times
    pub static ref DATE_WITH_TIME: Regex = build(
        r"(?i)(?:^|[^0-9])[0-9]{1,2}[ \t]*(?:<MONTH>)[ \t]*(?:[0-9]{4}|[0-9]{2})[ \t]*[,\-]?[ \t]*(?:เวลา[ \t]*)?([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)(?:[^0-9:]|$)"
    );

    pub static ref TIME_LABELED: Regex = Regex::new(
        r"(?i)(?:เวลา|\btime\b)[ \t]*:?[ \t]*([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)(?:[^0-9:]|$)"
    ).unwrap();

    pub static ref TIME_HMS: Regex = Regex::new(
        r"(?:^|[^0-9:])([0-9]{1,2}:[0-9]{2}:[0-9]{2})(?:[^0-9:]|$)"
    ).unwrap();

    pub static ref TIME_HM: Regex = Regex::new(
        r"(?:^|[^0-9:])([0-9]{1,2}:[0-9]{2})(?:[^0-9:]|$)"
    ).unwrap();

    // Amounts (Thai format: 1,234.50)
    pub static ref AMOUNT_LABELED: Regex = Regex::new(
        r"(?i)(?:จำนวนเงิน|ยอดเงิน|ยอดโอน|ยอดชำระ|จำนวน|\bamount\b|\btotal\b)\s*:?\s*(?:฿|thb)?\s*([0-9][0-9,]*\.[0-9]{2})(?:[^0-9]|$)"
    ).unwrap();

    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"(?i)(?:^|[^0-9.,])([0-9][0-9,]*\.[0-9]{2})\s*(?:บาท|thb|baht)"
    ).unwrap();

    pub static ref AMOUNT_BARE: Regex = Regex::new(
        r"(?:^|[^0-9.,])([0-9][0-9,]{0,9}\.[0-9]{2})(?:[^0-9]|$)"
    ).unwrap();

    pub static ref AMOUNT_LABELED_INTEGRAL: Regex = Regex::new(
        r"(?i)(?:จำนวนเงิน|ยอดเงิน|ยอดโอน|ยอดชำระ|\bamount\b)\s*:?\s*(?:฿\s*)?([0-9][0-9,]*)\s*(?:บาท|thb|baht)"
    ).unwrap();

    // Account numbers
    pub static ref ACCOUNT_MASKED_LONG: Regex = Regex::new(
        r"(?i)\b(x{3}-x{3}[0-9]+-[0-9x]+)"
    ).unwrap();

    pub static ref ACCOUNT_MASKED_GROUPED: Regex = Regex::new(
        r"(?i)\b(x{3}-[x0-9]-[x0-9]{4,5}-[x0-9])\b"
    ).unwrap();

    pub static ref ACCOUNT_MASKED_SHORT: Regex = Regex::new(
        r"(?i)(?:^|[^a-z0-9])(x-[0-9]{4,})"
    ).unwrap();

    pub static ref ACCOUNT_LABELED: Regex = Regex::new(
        r"(?i)(?:เลขที่บัญชี|บัญชี|\baccount(?:\s*no\.?)?|\ba/c)\s*:?\s*([0-9x][0-9x\-]{4,}[0-9x])"
    ).unwrap();

    pub static ref ACCOUNT_TOKEN_DIGITS: Regex = Regex::new(r"(?:^|[^0-9])[0-9]{10}(?:[^0-9]|$)").unwrap();

    pub static ref ACCOUNT_TOKEN_MASKED: Regex = Regex::new(r"(?i)[x0-9][x0-9\-]{3,}[x0-9]").unwrap();

    // Names
    pub static ref SENDER_NAME: Regex = build(r"(?i)<SENDER>[ \t]*:?[ \t]*([^\n]+)");

    pub static ref RECIPIENT_NAME: Regex = build(r"(?i)<RECIPIENT>[ \t]*:?[ \t]*([^\n]+)");

    pub static ref NAME_STOP: Regex = Regex::new(
        r"(?i)x{2,}|x-[x0-9]|[0-9]{4,}|\bbank\b|ธนาคาร"
    ).unwrap();

    pub static ref NAME_SHAPE: Regex = Regex::new(
        r"^[\p{Thai}A-Za-z][\p{Thai}A-Za-z .,'\-]*$"
    ).unwrap();

    pub static ref HONORIFIC_LED: Regex = build(r"(?i)^<HONORIFIC>[ \t]*[\p{Thai}A-Za-z]");

    pub static ref HONORIFIC_ONLY: Regex = build(r"(?i)^<HONORIFIC>$");

    pub static ref NOISE_LINE: Regex = Regex::new(
        r"(?i)ธนาคาร|ธ\.|\bbank\b|บาท|\bthb\b|จำนวน|ยอดเงิน|ยอดโอน|\bamount\b|วันที่|\bdate\b|เวลา|\btime\b|ค่าธรรมเนียม|\bfee\b|อ้างอิง|\bref|บัญชี|โอนเงิน|สำเร็จ"
    ).unwrap();

    pub static ref LEADING_NOISE: Regex = Regex::new(r"^[\s\p{P}\p{S}]+").unwrap();

    pub static ref BANK_IN_NAME: Regex = Regex::new(
        r"(?i)(?:ธนาคาร|ธ\.)?[ \t]*(?:\b(?:u?scb|k-?bank|bbl|ktb|ttb|tmb|uob|cimb|icbc|gsb|baac|krungsri|kasikorn|krungthai)\b|ไทยพาณิชย์|กสิกรไทย|กสิกร|กรุงเทพ|กรุงไทย|ทหารไทยธนชาต|ทหารไทย|ทีเอ็มบี|ธนชาต|ยูโอบี|ซีไอเอ็มบี|ไอซีบีซี|กรุงศรี|ออมสิน|ธ\.ก\.ส\.?)"
    ).unwrap();

    pub static ref MASK_TAIL: Regex = Regex::new(
        r"(?i)(?:^|\s+)(?:x+[\-0-9]|x{3})[x0-9\-]*\s*$"
    ).unwrap();

    pub static ref MASK_ONLY: Regex = Regex::new(r"(?i)^[x\-*.\s]+$").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Month number (1-12) for a Thai full name, Thai abbreviation (dots
/// optional) or English name.
pub fn month_number(token: &str) -> Option<u32> {
    let key: String = token
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if let Some(i) = THAI_MONTHS.iter().position(|m| *m == key) {
        return Some(i as u32 + 1);
    }
    if let Some(i) = THAI_MONTH_ABBR.iter().position(|m| *m == key) {
        return Some(i as u32 + 1);
    }
    if key.is_ascii() && key.len() >= 3 {
        if let Some(i) = ENGLISH_MONTH_PREFIX.iter().position(|m| key.starts_with(m)) {
            return Some(i as u32 + 1);
        }
    }
    None
}

/// Full Thai month name for a month number.
pub fn thai_month_name(month: u32) -> Option<&'static str> {
    THAI_MONTHS.get((month as usize).checked_sub(1)?).copied()
}
