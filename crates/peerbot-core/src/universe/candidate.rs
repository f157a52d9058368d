use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Market, Money};

/// A company eligible to be returned as a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCompany {
    /// Unique registry key
    pub corp_code: String,
    pub corp_name: String,
    pub stock_code: String,
    pub market: Market,
    /// Free-text business description
    pub business_description: String,
    /// Industry terms matched against query text
    pub keywords: Vec<String>,
    /// Annual revenue in base currency units
    pub scale: Money,
}

impl CandidateCompany {
    /// Scale figure usable for ratio comparisons, if any.
    pub fn positive_scale(&self) -> Option<Money> {
        (self.scale > Decimal::ZERO).then_some(self.scale)
    }

    /// Trim keywords, drop empties and remove case-insensitive duplicates,
    /// keeping first-seen order.
    pub(crate) fn normalize_keywords(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.keywords.len());
        let mut normalized = Vec::with_capacity(self.keywords.len());
        for kw in &self.keywords {
            let trimmed = kw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let folded = trimmed.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            seen.push(folded);
            normalized.push(trimmed.to_string());
        }
        self.keywords = normalized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn company(keywords: &[&str], scale: Money) -> CandidateCompany {
        CandidateCompany {
            corp_code: "000001".into(),
            corp_name: "TestCo".into(),
            stock_code: "000001".into(),
            market: Market::Kospi,
            business_description: "test".into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            scale,
        }
    }

    #[test]
    fn test_normalize_keywords_dedupes_case_insensitively() {
        let mut c = company(&[" AI ", "ai", "", "검색", "검색"], dec!(1));
        c.normalize_keywords();
        assert_eq!(c.keywords, vec!["AI".to_string(), "검색".to_string()]);
    }

    #[test]
    fn test_positive_scale() {
        assert_eq!(company(&[], dec!(10)).positive_scale(), Some(dec!(10)));
        assert_eq!(company(&[], Decimal::ZERO).positive_scale(), None);
        assert_eq!(company(&[], dec!(-5)).positive_scale(), None);
    }
}
