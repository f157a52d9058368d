use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::coverage::{CollectionStatus, CorpEntry};
use super::flatten::flatten_fs_summary;
use super::FilingSource;
use crate::error::PeerBotError;
use crate::profile::{
    BusinessSection, CompanyProfile, FsFlat, FsItem, FsSummary, FsTable, FsType, ReportMeta,
};
use crate::types::Market;
use crate::PeerBotResult;

const SAMSUNG: &str = "00126380";
const MIRAE: &str = "00111754";
const KAKAO: &str = "00258801";

/// In-memory filing source serving a fixed set of seeded filings.
#[derive(Debug, Clone, Default)]
pub struct OfflineFilingSource {
    metas: Vec<ReportMeta>,
    sections: HashMap<String, String>,
    tables: HashMap<String, Vec<FsTable>>,
    flats: HashMap<String, FsFlat>,
    registry: Vec<CorpEntry>,
}

impl OfflineFilingSource {
    pub fn seeded() -> Self {
        let metas = vec![
            meta("삼성전자", SAMSUNG, "005930", "20250331001234", "2025-03-31", false),
            meta("미래에셋증권", MIRAE, "006800", "20250330009999", "2025-03-30", false),
            meta("카카오", KAKAO, "035720", "20250330005678", "2025-03-30", true),
        ];

        let mut sections = HashMap::new();
        sections.insert(
            SAMSUNG.to_string(),
            "II. 사업의 내용\n\n1. 사업의 개요\n삼성전자는 본사를 거점으로 한국과 DX부문(Device eXperience)의 \
             산하 해외 9개 지역총괄 및 DS부문(Device Solutions)의 산하 해외 5개 지역총괄, \
             SDC(Samsung Display), Harman 산하 종속기업 등 232개의 종속기업으로 구성되어 있습니다. \
             주요 제품은 반도체, 스마트폰 등 모바일 기기, TV 및 가전 제품입니다."
                .to_string(),
        );
        sections.insert(
            MIRAE.to_string(),
            "II. 사업의 내용\n\n1. 사업의 개요\n금융투자업자로서 증권 중개, 자산관리, IB 및 \
             자기매매 업무를 영위하고 있습니다."
                .to_string(),
        );

        let mut tables = HashMap::new();
        tables.insert(
            SAMSUNG.to_string(),
            vec![million_won_table(&[
                ("매출액", dec!(300000000)),
                ("영업이익", dec!(50000000)),
                ("당기순이익", dec!(40000000)),
                ("자산총계", dec!(450000000)),
            ])],
        );
        tables.insert(
            MIRAE.to_string(),
            vec![million_won_table(&[
                ("영업수익", dec!(20000000)),
                ("영업이익", dec!(1000000)),
                ("당기순이익", dec!(800000)),
                ("자산총계", dec!(100000000)),
            ])],
        );

        let flats = tables
            .iter()
            .map(|(code, t)| {
                let summary = FsSummary {
                    corp_code: code.clone(),
                    bsns_year: 2024,
                    tables: t.clone(),
                };
                (code.clone(), flatten_fs_summary(&summary))
            })
            .collect();

        let registry = vec![
            entry(SAMSUNG, "삼성전자", "005930", CollectionStatus::Done, None),
            entry(MIRAE, "미래에셋증권", "006800", CollectionStatus::Done, None),
            entry(
                KAKAO,
                "카카오",
                "035720",
                CollectionStatus::Failed,
                Some("API Limit Exceeded"),
            ),
            entry("000660", "SK하이닉스", "000660", CollectionStatus::Done, None),
            entry("066570", "LG전자", "066570", CollectionStatus::Done, None),
            entry("035420", "NAVER", "035420", CollectionStatus::Done, None),
        ];

        Self {
            metas,
            sections,
            tables,
            flats,
            registry,
        }
    }

    fn registry_entry(&self, identifier: &str) -> Option<&CorpEntry> {
        let id = identifier.trim();
        self.registry
            .iter()
            .find(|e| e.corp_code == id || e.corp_name == id)
    }

    /// Fail when the collector recorded an error for this company.
    fn ensure_collected(&self, corp_code: &str) -> PeerBotResult<()> {
        match self.registry.iter().find(|e| e.corp_code == corp_code) {
            Some(e) if e.status == CollectionStatus::Failed => {
                Err(PeerBotError::InsufficientData(format!(
                    "filing collection failed for {} ({}): {}",
                    e.corp_name,
                    e.corp_code,
                    e.last_error.as_deref().unwrap_or("unknown error")
                )))
            }
            _ => Ok(()),
        }
    }

    fn known_names(&self) -> String {
        self.metas
            .iter()
            .map(|m| format!("'{}'", m.corp_name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FilingSource for OfflineFilingSource {
    fn report_meta(&self, corp_name: &str, year: i32) -> PeerBotResult<ReportMeta> {
        let name = corp_name.trim();
        self.metas
            .iter()
            .find(|m| m.corp_name == name && m.bsns_year == year)
            .cloned()
            .ok_or_else(|| {
                tracing::warn!(corp_name = name, year, known = %self.known_names(), "report not found");
                PeerBotError::not_found("report", format!("{name} ({year})"))
            })
    }

    fn business_section(
        &self,
        corp_code: &str,
        rcept_no: &str,
        year: i32,
    ) -> PeerBotResult<BusinessSection> {
        tracing::debug!(corp_code, rcept_no, year, "business section requested");
        self.ensure_collected(corp_code)?;
        let text = self
            .sections
            .get(corp_code)
            .ok_or_else(|| PeerBotError::not_found("business section", corp_code))?;
        Ok(BusinessSection {
            corp_code: corp_code.to_string(),
            bsns_year: year,
            business_section: text.clone(),
        })
    }

    fn fs_summary(&self, corp_code: &str, rcept_no: &str, year: i32) -> PeerBotResult<FsSummary> {
        tracing::debug!(corp_code, rcept_no, year, "financial summary requested");
        self.ensure_collected(corp_code)?;
        let tables = self
            .tables
            .get(corp_code)
            .ok_or_else(|| PeerBotError::not_found("financial summary", corp_code))?;
        Ok(FsSummary {
            corp_code: corp_code.to_string(),
            bsns_year: year,
            tables: tables.clone(),
        })
    }

    fn coverage(&self) -> Vec<CorpEntry> {
        self.registry.clone()
    }

    fn profile(&self, identifier: &str, year: i32) -> PeerBotResult<CompanyProfile> {
        let entry = self
            .registry_entry(identifier)
            .ok_or_else(|| PeerBotError::not_found("company", identifier))?;
        let code = entry.corp_code.as_str();

        let fs_summary_raw = self.tables.get(code).map(|tables| FsSummary {
            corp_code: code.to_string(),
            bsns_year: year,
            tables: tables.clone(),
        });

        Ok(CompanyProfile {
            corp_code: entry.corp_code.clone(),
            stock_code: entry.stock_code.clone(),
            corp_name: entry.corp_name.clone(),
            market: entry.market,
            bsns_year: year,
            business_section: self.sections.get(code).cloned(),
            fs_summary_flat: self.flats.get(code).cloned(),
            fs_summary_raw,
            report_meta: self
                .metas
                .iter()
                .find(|m| m.corp_code == code && m.bsns_year == year)
                .cloned(),
            is_virtual: false,
        })
    }
}

fn meta(
    corp_name: &str,
    corp_code: &str,
    stock_code: &str,
    rcept_no: &str,
    rcept_dt: &str,
    is_correction: bool,
) -> ReportMeta {
    let prefix = if is_correction { "[기재정정]" } else { "" };
    ReportMeta {
        corp_name: corp_name.to_string(),
        corp_code: corp_code.to_string(),
        stock_code: Some(stock_code.to_string()),
        bsns_year: 2024,
        rcept_no: rcept_no.to_string(),
        report_nm: format!("{prefix}사업보고서(2024.01.01~2024.12.31)"),
        rcept_dt: rcept_dt.to_string(),
        is_correction,
    }
}

fn million_won_table(rows: &[(&str, Decimal)]) -> FsTable {
    let unit_multiplier = dec!(1000000);
    FsTable {
        table_index: 0,
        fs_type: FsType::Consolidated,
        unit_str: "백만원".to_string(),
        unit_multiplier,
        items: rows
            .iter()
            .enumerate()
            .map(|(i, (name, raw))| FsItem {
                item_name: name.to_string(),
                raw_value: *raw,
                amount: *raw * unit_multiplier,
                source_row: format!("Row {}", i + 1),
            })
            .collect(),
    }
}

fn entry(
    corp_code: &str,
    corp_name: &str,
    stock_code: &str,
    status: CollectionStatus,
    last_error: Option<&str>,
) -> CorpEntry {
    CorpEntry {
        corp_code: corp_code.to_string(),
        stock_code: stock_code.to_string(),
        corp_name: corp_name.to_string(),
        market: Market::Kospi,
        status,
        last_error: last_error.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filings::SearchKind;

    #[test]
    fn test_report_meta_lookup() {
        let src = OfflineFilingSource::seeded();
        let m = src.report_meta("카카오", 2024).unwrap();
        assert!(m.is_correction);
        assert!(m.report_nm.starts_with("[기재정정]"));
        assert_eq!(m.rcept_no, "20250330005678");
    }

    #[test]
    fn test_report_meta_not_found() {
        let src = OfflineFilingSource::seeded();
        assert!(matches!(
            src.report_meta("없는회사", 2024),
            Err(PeerBotError::NotFound { .. })
        ));
        assert!(src.report_meta("삼성전자", 2019).is_err());
    }

    #[test]
    fn test_fs_summary_amounts_use_multiplier() {
        let src = OfflineFilingSource::seeded();
        let fs = src.fs_summary(SAMSUNG, "20250331001234", 2024).unwrap();
        let revenue = &fs.tables[0].items[0];
        assert_eq!(revenue.amount, dec!(300000000000000));
        assert_eq!(fs.tables[0].unit_str, "백만원");
    }

    #[test]
    fn test_failed_collection_surfaces_error() {
        let src = OfflineFilingSource::seeded();
        let err = src.business_section(KAKAO, "20250330005678", 2024).unwrap_err();
        assert!(err.to_string().contains("API Limit Exceeded"));
    }

    #[test]
    fn test_profile_by_name_and_code() {
        let src = OfflineFilingSource::seeded();
        let by_name = src.profile("미래에셋증권", 2024).unwrap();
        let by_code = src.profile(MIRAE, 2024).unwrap();
        assert_eq!(by_name, by_code);
        assert_eq!(by_code.revenue(), Some(dec!(20000000000000)));
        assert!(by_code.business_section.unwrap().contains("금융투자업자"));
        assert!(by_code.report_meta.is_some());

        let hynix = src.profile("000660", 2024).unwrap();
        assert!(hynix.fs_summary_flat.is_none());
        assert!(src.profile("nope", 2024).is_err());
    }

    #[test]
    fn test_search_companies() {
        let src = OfflineFilingSource::seeded();
        let hits = src.search_companies("lg", SearchKind::Name);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].corp_name, "LG전자");
        assert_eq!(src.search_companies("anything", SearchKind::Business).len(), 6);
    }
}
