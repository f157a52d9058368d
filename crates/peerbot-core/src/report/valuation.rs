use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::peers::ScoredPeer;
use crate::profile::CompanyProfile;
use crate::types::{with_metadata, ComputationOutput, Market, Money, Rate};
use crate::PeerBotResult;

// Estimation multiples applied to a peer's scale (revenue).
pub const OPERATING_INCOME_MULTIPLE: Decimal = dec!(0.12);
pub const NET_INCOME_MULTIPLE: Decimal = dec!(0.08);
pub const TOTAL_ASSETS_MULTIPLE: Decimal = dec!(1.5);
pub const TOTAL_EQUITY_MULTIPLE: Decimal = dec!(0.8);

const RATIONALE_TEMPLATE: &str = "본 가치평가는 {target}의 사업 구조 및 재무 규모를 기반으로 수행되었습니다.\n\
선정된 피어 그룹은 유사한 산업군(Industry)에 속하며, 키워드 유사도 및 코사인 유사도 분석을 통해 도출되었습니다.\n\
특히 매출액 및 자산 규모 측면에서 비교 가능한 범위를 우선적으로 고려하였습니다.";

pub const LIMITATIONS_TEXT: &str = "1. 비상장 기업의 경우 입력된 추정 재무 수치에 의존하므로 실제 가치와 차이가 있을 수 있습니다.\n\
2. 정성적 요인(브랜드 가치, 경영진 역량 등)은 본 정량적 모델에 완전히 반영되지 않았습니다.\n\
3. 오프라인 모드에서는 AI 모델 대신 규칙 기반(Rule-based) 매칭 알고리즘이 사용되었습니다.";

pub const NOTES_TEXT: &str = "본 보고서는 PeerBot Offline Engine에 의해 생성되었습니다. \
영업이익, 순이익, 자산총계, 자본총계는 매출 규모에 고정 배수를 적용한 추정치입니다.";

/// Scale figure an explanation compares on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleMetric {
    Revenue,
    TotalAssets,
    TotalEquity,
}

/// One row of the peer comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerTableRow {
    pub corp_code: String,
    pub stock_code: String,
    pub corp_name: String,
    pub market: Market,
    pub similarity: Rate,
    pub revenue: Money,
    pub operating_income: Money,
    pub net_income: Money,
    pub total_assets: Money,
    pub total_equity: Money,
    /// Figures other than revenue are multiples of revenue, not sourced data
    pub estimated: bool,
}

impl PeerTableRow {
    pub fn from_peer(peer: &ScoredPeer) -> Self {
        let scale = peer.scale_value;
        Self {
            corp_code: peer.corp_code.clone(),
            stock_code: peer.stock_code.clone(),
            corp_name: peer.corp_name.clone(),
            market: peer.market,
            similarity: peer.similarity,
            revenue: scale,
            operating_income: estimate(scale, OPERATING_INCOME_MULTIPLE),
            net_income: estimate(scale, NET_INCOME_MULTIPLE),
            total_assets: estimate(scale, TOTAL_ASSETS_MULTIPLE),
            total_equity: estimate(scale, TOTAL_EQUITY_MULTIPLE),
            estimated: true,
        }
    }
}

/// Revenue times a multiple, saturating at the decimal range.
fn estimate(scale: Money, multiple: Decimal) -> Money {
    scale.checked_mul(multiple).unwrap_or(if scale.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Why a peer was selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerExplanation {
    pub corp_code: String,
    pub stock_code: String,
    pub corp_name: String,
    pub market: Market,
    pub similarity: Rate,
    pub keyword_score: Rate,
    pub cosine_score: Rate,
    pub scale_metric: ScaleMetric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_target: Option<Money>,
    pub scale_peer: Money,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullet_points: Vec<String>,
}

/// Structured peer valuation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub target_label: String,
    pub year: i32,
    pub peers_table: Vec<PeerTableRow>,
    pub peer_explanations: Vec<PeerExplanation>,
    pub rationale_text: String,
    pub limitations_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_text: Option<String>,
}

/// Similarity as a percentage rounded half away from zero to 1 dp.
pub fn similarity_pct(similarity: Rate) -> Decimal {
    (similarity * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Label for the report subject.
pub fn target_label(target: &CompanyProfile, year: i32) -> String {
    if target.is_virtual {
        format!("Virtual – {}", target.corp_name)
    } else {
        format!("{} ({year})", target.corp_name)
    }
}

/// Build a report from a target and an already ranked peer list.
pub fn generate_report(target: &CompanyProfile, peers: &[ScoredPeer], year: i32) -> ValuationReport {
    let scale_target = target.revenue();

    let peer_explanations = peers
        .iter()
        .map(|peer| PeerExplanation {
            corp_code: peer.corp_code.clone(),
            stock_code: peer.stock_code.clone(),
            corp_name: peer.corp_name.clone(),
            market: peer.market,
            similarity: peer.similarity,
            keyword_score: peer.keyword_score,
            cosine_score: peer.cosine_score,
            scale_metric: ScaleMetric::Revenue,
            scale_target,
            scale_peer: peer.scale_value,
            summary: format!(
                "{}은(는) {}와 유사한 비즈니스 모델을 보유하고 있으며, 유사도 {:.1}%를 기록하여 선정되었습니다.",
                peer.corp_name,
                target.corp_name,
                similarity_pct(peer.similarity)
            ),
            bullet_points: scale_bullets(scale_target, peer.scale_value),
        })
        .collect();

    ValuationReport {
        target_label: target_label(target, year),
        year,
        peers_table: peers.iter().map(PeerTableRow::from_peer).collect(),
        peer_explanations,
        rationale_text: RATIONALE_TEMPLATE.replace("{target}", &target.corp_name),
        limitations_text: LIMITATIONS_TEXT.to_string(),
        notes_text: Some(NOTES_TEXT.to_string()),
    }
}

fn scale_bullets(target: Option<Money>, peer: Money) -> Vec<String> {
    match target {
        Some(t) if t > Decimal::ZERO && peer > Decimal::ZERO => match peer.checked_div(t) {
            Some(ratio) => vec![format!("매출 규모 비율(피어/대상): {}x", ratio.round_dp(2))],
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Input for report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub target: CompanyProfile,
    pub peers: Vec<ScoredPeer>,
    pub year: i32,
}

/// Generate a report and wrap it with diagnostics.
pub fn build_report(input: &ReportInput) -> PeerBotResult<ComputationOutput<ValuationReport>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.peers.is_empty() {
        warnings.push("No peers supplied; report contains no table rows or explanations".into());
    }
    if input.target.revenue().is_none() {
        warnings.push("Target revenue unknown; explanations omit scale comparison".into());
    }
    warnings.push(
        "Operating income, net income, total assets and total equity are estimated from revenue"
            .into(),
    );

    let report = generate_report(&input.target, &input.peers, input.year);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Template-based peer valuation report",
        input,
        warnings,
        elapsed,
        report,
    ))
}
