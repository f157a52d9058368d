//! Company profile and the filing records it is assembled from.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::peers::query::VirtualProfile;
use crate::types::{Market, Money};

/// Filing metadata for one annual report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub corp_name: String,
    pub corp_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
    pub bsns_year: i32,
    /// Filing receipt number
    pub rcept_no: String,
    /// Filing label
    pub report_nm: String,
    /// Filing date (YYYY-MM-DD)
    pub rcept_dt: String,
    /// True for amended filings
    pub is_correction: bool,
}

/// Business-description section text of a filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSection {
    pub corp_code: String,
    pub bsns_year: i32,
    pub business_section: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FsType {
    Consolidated,
    Separate,
    Unknown,
}

/// One line item of a financial statement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsItem {
    pub item_name: String,
    /// Value as printed, in the table's unit
    pub raw_value: Decimal,
    /// `raw_value * unit_multiplier`
    pub amount: Money,
    pub source_row: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsTable {
    pub table_index: u32,
    pub fs_type: FsType,
    /// Unit label, e.g. "백만원"
    pub unit_str: String,
    pub unit_multiplier: Decimal,
    pub items: Vec<FsItem>,
}

/// Financial-summary tables extracted from a filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsSummary {
    pub corp_code: String,
    pub bsns_year: i32,
    pub tables: Vec<FsTable>,
}

/// Flattened headline figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsFlat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_equity: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_cf: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_type: Option<FsType>,
}

/// Read-only description of a peer-search target, listed or virtual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub corp_code: String,
    pub stock_code: String,
    pub corp_name: String,
    pub market: Market,
    pub bsns_year: i32,
    #[serde(default)]
    pub business_section: Option<String>,
    #[serde(default)]
    pub fs_summary_flat: Option<FsFlat>,
    #[serde(default)]
    pub fs_summary_raw: Option<FsSummary>,
    #[serde(default)]
    pub report_meta: Option<ReportMeta>,
    #[serde(default)]
    pub is_virtual: bool,
}

impl CompanyProfile {
    /// Profile for a virtual company. The corp code is a fresh
    /// `VIRTUAL_<millis>` tag; the profile never joins the universe.
    pub fn from_virtual(input: &VirtualProfile, year: i32) -> Self {
        Self {
            corp_code: format!("VIRTUAL_{}", Utc::now().timestamp_millis()),
            stock_code: "N/A".to_string(),
            corp_name: input.name.clone(),
            market: Market::Private,
            bsns_year: year,
            business_section: Some(input.description.clone()),
            fs_summary_flat: Some(FsFlat {
                revenue: input.revenue,
                total_assets: input.total_assets,
                ..FsFlat::default()
            }),
            fs_summary_raw: None,
            report_meta: None,
            is_virtual: true,
        }
    }

    pub fn revenue(&self) -> Option<Money> {
        self.fs_summary_flat.as_ref().and_then(|f| f.revenue)
    }
}
