//! Closed set of Thai banks recognized on slips.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bank identified on a slip, serialized by its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
    /// Siam Commercial Bank.
    #[serde(rename = "SCB")]
    Scb,
    /// Kasikornbank.
    #[serde(rename = "กสิกรไทย")]
    Kasikorn,
    /// Bangkok Bank.
    #[serde(rename = "กรุงเทพ")]
    Bangkok,
    /// Krungthai Bank.
    #[serde(rename = "กรุงไทย")]
    Krungthai,
    /// TMB (TMBThanachart).
    #[serde(rename = "ทีเอ็มบี")]
    Tmb,
    /// Thanachart Bank.
    #[serde(rename = "ธนชาต")]
    Thanachart,
    /// United Overseas Bank (Thai).
    #[serde(rename = "ยูโอบี")]
    Uob,
    /// CIMB Thai.
    #[serde(rename = "ซีไอเอ็มบี")]
    Cimb,
    /// ICBC (Thai).
    #[serde(rename = "ไอซีบีซี")]
    Icbc,
    /// Bank for Agriculture and Agricultural Cooperatives.
    #[serde(rename = "ธ.ก.ส.")]
    Baac,
    /// Bank of Ayudhya (Krungsri).
    #[serde(rename = "กรุงศรี")]
    Krungsri,
    /// Government Savings Bank.
    #[serde(rename = "ออมสิน")]
    Gsb,
}

impl Bank {
    /// Banks in alias-scan order. SCB is first but is matched separately.
    pub const ALL: [Bank; 12] = [
        Bank::Scb,
        Bank::Kasikorn,
        Bank::Bangkok,
        Bank::Krungthai,
        Bank::Tmb,
        Bank::Thanachart,
        Bank::Uob,
        Bank::Cimb,
        Bank::Icbc,
        Bank::Baac,
        Bank::Krungsri,
        Bank::Gsb,
    ];

    /// Canonical display name.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Bank::Scb => "SCB",
            Bank::Kasikorn => "กสิกรไทย",
            Bank::Bangkok => "กรุงเทพ",
            Bank::Krungthai => "กรุงไทย",
            Bank::Tmb => "ทีเอ็มบี",
            Bank::Thanachart => "ธนชาต",
            Bank::Uob => "ยูโอบี",
            Bank::Cimb => "ซีไอเอ็มบี",
            Bank::Icbc => "ไอซีบีซี",
            Bank::Baac => "ธ.ก.ส.",
            Bank::Krungsri => "กรุงศรี",
            Bank::Gsb => "ออมสิน",
        }
    }

    /// Lowercase aliases matched by substring containment.
    ///
    /// Covers official codes, English and Thai names, and spellings the OCR
    /// engine tends to produce (letter-spaced Thai, dropped tone marks).
    /// SCB's short code is not listed: it collides with OCR garbage and is
    /// matched with a word-boundary pattern instead.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Bank::Scb => &[
                "ไทยพาณิชย์",
                "ไทยพาณิชย",
                "ไ ท ย พ า ณิ ช ย์",
                "siam commercial",
            ],
            Bank::Kasikorn => &[
                "กสิกรไทย",
                "กสิกร",
                "kbank",
                "k-bank",
                "kasikorn",
                "k plus",
            ],
            Bank::Bangkok => &["กรุงเทพ", "ก รุ ง เ ท พ", "bbl", "bangkok bank", "bualuang"],
            Bank::Krungthai => &["กรุงไทย", "ก รุ ง ไ ท ย", "ktb", "krung thai", "krungthai"],
            Bank::Tmb => &["ทีเอ็มบี", "ทหารไทย", "tmb", "tmbthanachart", "ttb"],
            Bank::Thanachart => &["ธนชาต", "thanachart"],
            Bank::Uob => &["ยูโอบี", "uob"],
            Bank::Cimb => &["ซีไอเอ็มบี", "cimb"],
            Bank::Icbc => &["ไอซีบีซี", "icbc"],
            Bank::Baac => &["ธ.ก.ส.", "ก.ส.ห.", "baac", "bank for agriculture"],
            Bank::Krungsri => &["กรุงศรี", "krungsri", "ayudhya"],
            Bank::Gsb => &["ออมสิน", "gsb", "government savings"],
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_canonical_name() {
        let json = serde_json::to_string(&Bank::Kasikorn).unwrap();
        assert_eq!(json, "\"กสิกรไทย\"");

        let bank: Bank = serde_json::from_str("\"SCB\"").unwrap();
        assert_eq!(bank, Bank::Scb);
    }

    #[test]
    fn test_aliases_are_lowercase() {
        for bank in Bank::ALL {
            for alias in bank.aliases() {
                assert_eq!(*alias, alias.to_lowercase(), "{bank:?}");
            }
        }
    }
}
