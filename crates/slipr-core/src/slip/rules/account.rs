//! Account number extraction. Slips print masked numbers, which are kept
//! exactly as shown.

use super::patterns::{
    ACCOUNT_LABELED, ACCOUNT_MASKED_GROUPED, ACCOUNT_MASKED_LONG, ACCOUNT_MASKED_SHORT,
};
use super::{find_first_match, ExtractionMatch, FieldExtractor};

/// Account number extractor.
pub struct AccountExtractor;

impl AccountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AccountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let masked = find_first_match(
            text,
            &[&ACCOUNT_MASKED_LONG, &ACCOUNT_MASKED_GROUPED, &ACCOUNT_MASKED_SHORT],
        );
        if let Some(account) = masked {
            return Some(ExtractionMatch::new(account.clone(), 0.9, account));
        }

        find_first_match(text, &[&ACCOUNT_LABELED])
            .map(|account| ExtractionMatch::new(account.clone(), 0.7, account))
    }
}

/// Extract the first account number shown on the slip.
pub fn extract_account_number(text: &str) -> Option<String> {
    AccountExtractor::new().extract(text).map(|m| m.value)
}
