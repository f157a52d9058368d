//! Filing retrieval boundary: report metadata, business-section text and
//! financial-summary tables, plus company-profile assembly.

pub mod coverage;
pub mod flatten;
pub mod offline;

use serde::{Deserialize, Serialize};

use crate::profile::{BusinessSection, CompanyProfile, FsSummary, ReportMeta};
use crate::types::Market;
use crate::PeerBotResult;

pub use coverage::{filter_coverage, CollectionStatus, CorpEntry, CoverageFilter, CoverageStats};
pub use flatten::flatten_fs_summary;
pub use offline::OfflineFilingSource;

/// How a company search interprets its query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    /// Case-insensitive name containment
    #[default]
    Name,
    /// Business-description search; every registry entry is a candidate
    Business,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySearchResult {
    pub corp_code: String,
    pub corp_name: String,
    pub market: Market,
}

/// Source of filing documents and derived company profiles.
pub trait FilingSource {
    /// Annual-report metadata for a company name and fiscal year.
    fn report_meta(&self, corp_name: &str, year: i32) -> PeerBotResult<ReportMeta>;

    /// Business-section text of a filing.
    fn business_section(&self, corp_code: &str, rcept_no: &str, year: i32)
        -> PeerBotResult<BusinessSection>;

    /// Financial-summary tables of a filing.
    fn fs_summary(&self, corp_code: &str, rcept_no: &str, year: i32) -> PeerBotResult<FsSummary>;

    /// Collection registry, in registry order.
    fn coverage(&self) -> Vec<CorpEntry>;

    /// Profile for a corp code or exact company name.
    fn profile(&self, identifier: &str, year: i32) -> PeerBotResult<CompanyProfile>;

    fn search_companies(&self, query: &str, kind: SearchKind) -> Vec<CompanySearchResult> {
        let q = query.trim().to_lowercase();
        self.coverage()
            .into_iter()
            .filter(|e| kind == SearchKind::Business || e.corp_name.to_lowercase().contains(&q))
            .map(|e| CompanySearchResult {
                corp_code: e.corp_code,
                corp_name: e.corp_name,
                market: e.market,
            })
            .collect()
    }
}
