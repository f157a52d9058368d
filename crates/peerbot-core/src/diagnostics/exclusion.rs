//! Rule-based peer exclusion diagnostics.
//!
//! Rules run in a fixed order and the first match wins. Every path yields a
//! result; failure-like conditions are reported as reason codes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, MarketFilter, Money, Rate};
use crate::universe::CandidateUniverse;
use crate::PeerBotResult;

/// Ratio bounds (candidate / target) outside which a peer is a scale mismatch.
pub const SCALE_RATIO_MIN: Decimal = dec!(0.1);
pub const SCALE_RATIO_MAX: Decimal = dec!(10);
/// Acceptable band shown to users. Differs from the numeric gate above.
pub const SCALE_BAND_LABEL: &str = "0.5x ~ 2.0x";
/// Score attached to an included candidate.
pub const INCLUDED_SCORE: Rate = dec!(0.45);

const NOT_FOUND_MSG: &str = "유니버스 데이터베이스에서 해당 기업을 찾을 수 없습니다.";
const EOK: Decimal = dec!(100000000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionStatus {
    Included,
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionReason {
    ScaleMismatch,
    LowSimilarity,
    DataParsingError,
    MarketMismatch,
    NotFound,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExclusionReason::ScaleMismatch => "SCALE_MISMATCH",
            ExclusionReason::LowSimilarity => "LOW_SIMILARITY",
            ExclusionReason::DataParsingError => "DATA_PARSING_ERROR",
            ExclusionReason::MarketMismatch => "MARKET_MISMATCH",
            ExclusionReason::NotFound => "NOT_FOUND",
        };
        f.write_str(s)
    }
}

/// Reason-specific payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsing_error_msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionResult {
    pub corp_name: String,
    pub status: ExclusionStatus,
    pub reason_code: ExclusionReason,
    pub details: ExclusionDetails,
}

impl ExclusionResult {
    pub fn is_excluded(&self) -> bool {
        self.status == ExclusionStatus::Excluded
    }

    fn excluded(corp_name: &str, reason_code: ExclusionReason, details: ExclusionDetails) -> Self {
        Self {
            corp_name: corp_name.to_string(),
            status: ExclusionStatus::Excluded,
            reason_code,
            details,
        }
    }
}

/// Target-side facts the rules check a candidate against. Absent fields
/// skip the corresponding rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_scale: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketFilter>,
}

/// Decide whether `candidate_name` should be trusted as a peer.
pub fn check_exclusion(
    universe: &CandidateUniverse,
    candidate_name: &str,
    context: &ExclusionContext,
) -> ExclusionResult {
    // 1. name lookup
    let Some(known) = universe.find_by_name(candidate_name) else {
        return ExclusionResult::excluded(
            candidate_name,
            ExclusionReason::NotFound,
            ExclusionDetails {
                parsing_error_msg: Some(NOT_FOUND_MSG.to_string()),
                ..Default::default()
            },
        );
    };

    // 2. market
    if let Some(filter) = context.market {
        if !filter.admits(known.market) {
            return ExclusionResult::excluded(
                candidate_name,
                ExclusionReason::MarketMismatch,
                ExclusionDetails {
                    metric_name: Some("market".into()),
                    target_value: Some(filter.to_string()),
                    company_value: Some(known.market.to_string()),
                    ..Default::default()
                },
            );
        }
    }

    let target_scale = context.target_scale.filter(|s| *s > Decimal::ZERO);

    // 3. unusable candidate scale
    if target_scale.is_some() && known.positive_scale().is_none() {
        return ExclusionResult::excluded(
            candidate_name,
            ExclusionReason::DataParsingError,
            ExclusionDetails {
                metric_name: Some("revenue".into()),
                company_value: Some(known.scale.to_string()),
                parsing_error_msg: Some(format!(
                    "{}의 매출 규모 데이터를 해석할 수 없습니다.",
                    known.corp_name
                )),
                ..Default::default()
            },
        );
    }

    // 4. scale ratio gate
    if let (Some(target), Some(company)) = (target_scale, known.positive_scale()) {
        let outside = match company.checked_div(target) {
            Some(ratio) => ratio > SCALE_RATIO_MAX || ratio < SCALE_RATIO_MIN,
            None => true,
        };
        if outside {
            return ExclusionResult::excluded(
                candidate_name,
                ExclusionReason::ScaleMismatch,
                ExclusionDetails {
                    metric_name: Some("revenue".into()),
                    company_value: Some(format_eok(company)),
                    target_value: Some(format_eok(target)),
                    threshold_range: Some(SCALE_BAND_LABEL.into()),
                    ..Default::default()
                },
            );
        }
    }

    ExclusionResult {
        corp_name: candidate_name.to_string(),
        status: ExclusionStatus::Included,
        reason_code: ExclusionReason::LowSimilarity,
        details: ExclusionDetails {
            score: Some(INCLUDED_SCORE),
            ..Default::default()
        },
    }
}

/// Amount in 억 (1e8) units with no decimals, e.g. `₩5000억`.
pub fn format_eok(amount: Money) -> String {
    let eok = (amount / EOK).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("₩{eok}억")
}

/// Input for a batch of exclusion checks against one target context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionInput {
    pub candidates: Vec<String>,
    #[serde(default)]
    pub context: ExclusionContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionOutput {
    pub results: Vec<ExclusionResult>,
    pub included: usize,
    pub excluded: usize,
}

/// Check each named candidate and summarise the outcome.
pub fn run_exclusion_check(
    universe: &CandidateUniverse,
    input: &ExclusionInput,
) -> PeerBotResult<ComputationOutput<ExclusionOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.candidates.is_empty() {
        warnings.push("No candidate names supplied".to_string());
    }
    if input.context.target_scale.is_some_and(|s| s <= Decimal::ZERO) {
        warnings.push("Non-positive target scale ignored; scale rules skipped".to_string());
    }

    let results: Vec<ExclusionResult> = input
        .candidates
        .iter()
        .map(|name| check_exclusion(universe, name, &input.context))
        .collect();
    let excluded = results.iter().filter(|r| r.is_excluded()).count();

    for r in results.iter().filter(|r| r.is_excluded()) {
        tracing::debug!(corp_name = %r.corp_name, reason = %r.reason_code, "peer excluded");
    }

    let output = ExclusionOutput {
        included: results.len() - excluded,
        excluded,
        results,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rule-based peer exclusion diagnostics",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Market;
    use crate::universe::CandidateCompany;

    #[test]
    fn test_unknown_company_not_found() {
        let u = CandidateUniverse::seeded();
        let r = check_exclusion(&u, "없는회사", &ExclusionContext::default());
        assert_eq!(r.status, ExclusionStatus::Excluded);
        assert_eq!(r.reason_code, ExclusionReason::NotFound);
        assert_eq!(r.details.parsing_error_msg.as_deref(), Some(NOT_FOUND_MSG));
    }

    #[test]
    fn test_scale_mismatch_small_candidate() {
        let u = CandidateUniverse::seeded();
        let ctx = ExclusionContext {
            target_scale: Some(dec!(300000000000000)),
            ..Default::default()
        };
        let r = check_exclusion(&u, "카카오페이", &ctx);
        assert_eq!(r.reason_code, ExclusionReason::ScaleMismatch);
        assert_eq!(r.details.company_value.as_deref(), Some("₩5000억"));
        assert_eq!(r.details.target_value.as_deref(), Some("₩3000000억"));
        assert_eq!(r.details.threshold_range.as_deref(), Some("0.5x ~ 2.0x"));
    }

    #[test]
    fn test_scale_within_gate_is_included() {
        let u = CandidateUniverse::seeded();
        // 150T / 300T = 0.5, inside (0.1, 10)
        let ctx = ExclusionContext {
            target_scale: Some(dec!(300000000000000)),
            ..Default::default()
        };
        let r = check_exclusion(&u, "SK하이닉스", &ctx);
        assert_eq!(r.status, ExclusionStatus::Included);
        assert_eq!(r.reason_code, ExclusionReason::LowSimilarity);
        assert_eq!(r.details.score, Some(dec!(0.45)));
    }

    #[test]
    fn test_gate_bounds_are_exclusive() {
        let u = CandidateUniverse::seeded();
        // 카카오페이 500B; target 5T gives ratio exactly 0.1
        let ctx = ExclusionContext {
            target_scale: Some(dec!(5000000000000)),
            ..Default::default()
        };
        assert_eq!(
            check_exclusion(&u, "카카오페이", &ctx).status,
            ExclusionStatus::Included
        );
        // target 50B gives ratio exactly 10
        let ctx = ExclusionContext {
            target_scale: Some(dec!(50000000000)),
            ..Default::default()
        };
        assert_eq!(
            check_exclusion(&u, "카카오페이", &ctx).status,
            ExclusionStatus::Included
        );
    }

    #[test]
    fn test_tiny_target_overflowing_ratio_is_scale_mismatch() {
        let u = CandidateUniverse::seeded();
        let ctx = ExclusionContext {
            target_scale: Some(dec!(0.0000000000000001)),
            ..Default::default()
        };
        let r = check_exclusion(&u, "삼성전자", &ctx);
        assert_eq!(r.status, ExclusionStatus::Excluded);
        assert_eq!(r.reason_code, ExclusionReason::ScaleMismatch);
        assert_eq!(r.details.company_value.as_deref(), Some("₩3000000억"));
    }

    #[test]
    fn test_empty_name_matches_first_entry() {
        let u = CandidateUniverse::seeded();
        let r = check_exclusion(&u, "", &ExclusionContext::default());
        assert_eq!(r.status, ExclusionStatus::Included);
        assert_eq!(r.reason_code, ExclusionReason::LowSimilarity);
    }

    #[test]
    fn test_no_context_included() {
        let u = CandidateUniverse::seeded();
        let r = check_exclusion(&u, "NAVER", &ExclusionContext::default());
        assert_eq!(r.status, ExclusionStatus::Included);
    }

    #[test]
    fn test_market_mismatch() {
        let u = CandidateUniverse::seeded();
        let ctx = ExclusionContext {
            market: Some(MarketFilter::Kosdaq),
            ..Default::default()
        };
        let r = check_exclusion(&u, "기아", &ctx);
        assert_eq!(r.reason_code, ExclusionReason::MarketMismatch);
        assert_eq!(r.details.company_value.as_deref(), Some("KOSPI"));
    }

    #[test]
    fn test_data_parsing_error_for_zero_scale() {
        let u = CandidateUniverse::from_candidates(vec![CandidateCompany {
            corp_code: "1".into(),
            corp_name: "빈데이터".into(),
            stock_code: "1".into(),
            market: Market::Kosdaq,
            business_description: String::new(),
            keywords: vec![],
            scale: Decimal::ZERO,
        }])
        .unwrap();
        let ctx = ExclusionContext {
            target_scale: Some(dec!(1000)),
            ..Default::default()
        };
        let r = check_exclusion(&u, "빈데이터", &ctx);
        assert_eq!(r.reason_code, ExclusionReason::DataParsingError);

        // without a target scale the rule is skipped
        let r = check_exclusion(&u, "빈데이터", &ExclusionContext::default());
        assert_eq!(r.status, ExclusionStatus::Included);
    }

    #[test]
    fn test_batch_counts() {
        let u = CandidateUniverse::seeded();
        let input = ExclusionInput {
            candidates: vec!["없는회사".into(), "NAVER".into(), "카카오페이".into()],
            context: ExclusionContext {
                target_scale: Some(dec!(300000000000000)),
                ..Default::default()
            },
        };
        let out = run_exclusion_check(&u, &input).unwrap();
        assert_eq!(out.result.excluded, 3);
        assert_eq!(out.result.included, 0);
    }

    #[test]
    fn test_reason_codes_serialize_screaming() {
        let json = serde_json::to_string(&ExclusionReason::DataParsingError).unwrap();
        assert_eq!(json, "\"DATA_PARSING_ERROR\"");
    }
}
