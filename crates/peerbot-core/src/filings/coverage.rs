use serde::{Deserialize, Serialize};

use crate::types::{Market, MarketFilter};

/// Collection progress for one company's filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionStatus {
    NotStarted,
    Done,
    Failed,
}

/// Registry entry for a company tracked by the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpEntry {
    pub corp_code: String,
    pub stock_code: String,
    pub corp_name: String,
    pub market: Market,
    pub status: CollectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Market and status restriction for a coverage listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageFilter {
    #[serde(default)]
    pub market: MarketFilter,
    /// `None` keeps every status
    #[serde(default)]
    pub status: Option<CollectionStatus>,
}

impl CoverageFilter {
    pub fn matches(&self, entry: &CorpEntry) -> bool {
        self.market.admits(entry.market) && self.status.map_or(true, |s| s == entry.status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub pending: usize,
}

impl CoverageStats {
    pub fn from_entries(entries: &[CorpEntry]) -> Self {
        let count = |status| entries.iter().filter(|e| e.status == status).count();
        Self {
            total: entries.len(),
            done: count(CollectionStatus::Done),
            failed: count(CollectionStatus::Failed),
            pending: count(CollectionStatus::NotStarted),
        }
    }
}

/// Entries matching `filter`, with stats over the unfiltered registry.
pub fn filter_coverage(entries: &[CorpEntry], filter: &CoverageFilter) -> (Vec<CorpEntry>, CoverageStats) {
    let matched = entries
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    (matched, CoverageStats::from_entries(entries))
}
