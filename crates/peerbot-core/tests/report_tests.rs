use peerbot_core::filings::{FilingSource, OfflineFilingSource};
use peerbot_core::peers::{PeerOverrides, PeerRanker, QueryDescriptor, TuningParameters, VirtualProfile};
use peerbot_core::profile::CompanyProfile;
use peerbot_core::report::render::format_krw;
use peerbot_core::report::{build_report, generate_report, render, ReportFormat, ReportInput};
use peerbot_core::universe::CandidateUniverse;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn samsung_report() -> peerbot_core::report::ValuationReport {
    let universe = CandidateUniverse::seeded();
    let overrides = PeerOverrides::seeded();
    let ranker = PeerRanker::new(&universe).with_overrides(&overrides);
    let target = OfflineFilingSource::seeded().profile("삼성전자", 2024).unwrap();
    let peers = ranker.find_peers(&QueryDescriptor::from_profile(&target), &TuningParameters::default());
    generate_report(&target, &peers, 2024)
}

#[test]
fn test_listed_report_structure() {
    let report = samsung_report();

    assert_eq!(report.target_label, "삼성전자 (2024)");
    assert_eq!(report.peers_table.len(), 3);
    assert_eq!(report.peer_explanations.len(), 3);
    assert!(report.rationale_text.contains("삼성전자"));
    assert!(report.notes_text.is_some());

    let hynix = &report.peers_table[0];
    assert_eq!(hynix.revenue, dec!(150000000000000));
    assert_eq!(hynix.operating_income, dec!(18000000000000));
    assert!(hynix.estimated);

    let exp = &report.peer_explanations[0];
    assert!(exp.summary.contains("유사도 92.0%"));
    assert_eq!(exp.scale_target, Some(dec!(300000000000000)));
    assert_eq!(exp.bullet_points.len(), 1);
}

#[test]
fn test_virtual_report_label() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let target = CompanyProfile::from_virtual(
        &VirtualProfile {
            name: "핀테크 스타트업".into(),
            description: "간편결제 핀테크 금융".into(),
            revenue: None,
            total_assets: None,
        },
        2024,
    );
    let peers = ranker.find_peers(&QueryDescriptor::from_profile(&target), &TuningParameters::default());

    let out = build_report(&ReportInput {
        target,
        peers,
        year: 2024,
    })
    .unwrap();

    assert_eq!(out.result.target_label, "Virtual – 핀테크 스타트업");
    assert_eq!(out.result.peers_table[0].corp_name, "카카오페이");
    assert!(out.result.peer_explanations.iter().all(|e| e.bullet_points.is_empty()));
    assert!(out.warnings.iter().any(|w| w.contains("revenue unknown")));
}

#[test]
fn test_markdown_and_text_rendering() {
    let report = samsung_report();

    let md = render(&report, ReportFormat::Markdown).unwrap();
    assert!(md.starts_with("# Valuation Report: 삼성전자 (2024)"));
    assert!(md.contains("| SK하이닉스 | 000660 | KOSPI | 92.0% | ₩150.0조 |"));
    assert!(md.contains("## 4. Limitations"));

    let txt = render(&report, ReportFormat::Text).unwrap();
    assert!(txt.contains("- LG전자 (066570): Sim 75.0%, Rev ₩80.0조"));
}

#[test]
fn test_csv_rendering_has_header_and_rows() {
    let report = samsung_report();
    let csv = render(&report, ReportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("CorpName,StockCode,Market,Similarity"));
    assert!(lines[1].starts_with("SK하이닉스,000660,KOSPI,0.92"));
}

#[test]
fn test_krw_formatting_units() {
    assert_eq!(format_krw(dec!(300000000000000)), "₩300.0조");
    assert_eq!(format_krw(dec!(500000000000)), "₩5000억");
    assert_eq!(format_krw(dec!(12345678)), "₩12,345,678");
}
