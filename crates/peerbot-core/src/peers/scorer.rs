use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::query::VirtualProfile;
use super::tuning::TuningParameters;
use crate::types::{Money, Rate};
use crate::universe::CandidateCompany;

/// Points awarded per candidate keyword found in the query text.
pub const KEYWORD_POINTS: u32 = 10;
/// Points when the larger/smaller scale ratio is below 2.
pub const CLOSE_SCALE_POINTS: u32 = 5;
/// Points when the scale ratio is in [2, 5).
pub const NEAR_SCALE_POINTS: u32 = 2;
/// Upper bound on any computed similarity.
pub const MAX_SIMILARITY: Rate = dec!(0.99);

const SMOOTHING_POINTS: Decimal = dec!(2);
const NORMALIZER: Decimal = dec!(20);

/// Text and scale a candidate is scored against.
#[derive(Debug, Clone, Copy)]
pub struct ScoringTarget<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub scale: Option<Money>,
}

impl<'a> From<&'a VirtualProfile> for ScoringTarget<'a> {
    fn from(v: &'a VirtualProfile) -> Self {
        Self {
            name: &v.name,
            description: &v.description,
            scale: v.scale(),
        }
    }
}

impl<'a> From<&'a CandidateCompany> for ScoringTarget<'a> {
    fn from(c: &'a CandidateCompany) -> Self {
        Self {
            name: &c.corp_name,
            description: &c.business_description,
            scale: c.positive_scale(),
        }
    }
}

/// Decomposed score for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_points: u32,
    pub matched_keywords: Vec<String>,
    pub scale_points: u32,
    /// max/min of the two scale figures, when both are present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_ratio: Option<Decimal>,
    pub raw_score: u32,
    pub similarity: Rate,
}

impl ScoreBreakdown {
    pub fn matched_count(&self) -> usize {
        self.matched_keywords.len()
    }
}

/// Score a candidate against a target.
///
/// `similarity = min(0.99, (keyword_points + scale_points + 2) / 20)`.
/// Tuning weights are accepted but do not alter the formula.
pub fn score(
    target: &ScoringTarget<'_>,
    candidate: &CandidateCompany,
    _tuning: &TuningParameters,
) -> ScoreBreakdown {
    let description = target.description.to_lowercase();
    let name = target.name.to_lowercase();

    let matched_keywords: Vec<String> = candidate
        .keywords
        .iter()
        .filter(|kw| {
            let folded = kw.to_lowercase();
            !folded.is_empty() && (description.contains(&folded) || name.contains(&folded))
        })
        .cloned()
        .collect();
    let keyword_points = KEYWORD_POINTS * matched_keywords.len() as u32;

    // An overflowing ratio lies beyond every band and earns no points.
    let scale_ratio = match (target.scale, candidate.positive_scale()) {
        (Some(a), Some(b)) if a > Decimal::ZERO => a.max(b).checked_div(a.min(b)),
        _ => None,
    };
    let scale_points = match scale_ratio {
        Some(r) if r < dec!(2) => CLOSE_SCALE_POINTS,
        Some(r) if r < dec!(5) => NEAR_SCALE_POINTS,
        _ => 0,
    };

    let raw_score = keyword_points + scale_points;
    let similarity = similarity_from_raw(raw_score);

    ScoreBreakdown {
        keyword_points,
        matched_keywords,
        scale_points,
        scale_ratio,
        raw_score,
        similarity,
    }
}

/// Smoothed, clamped similarity for a raw point total.
pub fn similarity_from_raw(raw_score: u32) -> Rate {
    ((Decimal::from(raw_score) + SMOOTHING_POINTS) / NORMALIZER).min(MAX_SIMILARITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::CandidateUniverse;

    fn virtual_target(description: &str, revenue: Option<Money>) -> VirtualProfile {
        VirtualProfile {
            name: "테스트".into(),
            description: description.into(),
            revenue,
            total_assets: None,
        }
    }

    #[test]
    fn test_samsung_keyword_hits() {
        let u = CandidateUniverse::seeded();
        let samsung = u.get("00126380").unwrap();
        let v = virtual_target("반도체 모바일 전자", Some(dec!(300000000000000)));
        let s = score(&ScoringTarget::from(&v), samsung, &TuningParameters::default());
        assert_eq!(s.matched_count(), 3);
        assert_eq!(s.keyword_points, 30);
        assert_eq!(s.scale_points, 5);
        assert_eq!(s.raw_score, 35);
        // (35 + 2) / 20 = 1.85, clamped
        assert_eq!(s.similarity, dec!(0.99));
    }

    #[test]
    fn test_no_match_floor() {
        let u = CandidateUniverse::seeded();
        let v = virtual_target("완전히 무관한 농업 사업", None);
        for c in u.iter() {
            let s = score(&ScoringTarget::from(&v), c, &TuningParameters::default());
            assert_eq!(s.similarity, dec!(0.1), "{} should sit on the floor", c.corp_name);
            assert_eq!(s.scale_ratio, None);
        }
    }

    #[test]
    fn test_scale_bands() {
        let u = CandidateUniverse::seeded();
        let hynix = u.get("000660").unwrap(); // 150T
        let t = TuningParameters::default();

        // ratio exactly 2 falls in the [2, 5) band
        let v = virtual_target("", Some(dec!(300000000000000)));
        assert_eq!(score(&ScoringTarget::from(&v), hynix, &t).scale_points, 2);

        // ratio 1.5
        let v = virtual_target("", Some(dec!(100000000000000)));
        assert_eq!(score(&ScoringTarget::from(&v), hynix, &t).scale_points, 5);

        // ratio 5 gets nothing
        let v = virtual_target("", Some(dec!(30000000000000)));
        assert_eq!(score(&ScoringTarget::from(&v), hynix, &t).scale_points, 0);
    }

    #[test]
    fn test_keyword_matching_is_case_folded_and_uses_name() {
        let u = CandidateUniverse::seeded();
        let naver = u.get("035420").unwrap();
        let v = VirtualProfile {
            name: "검색 스타트업".into(),
            description: "generative ai assistant".into(),
            revenue: None,
            total_assets: None,
        };
        let s = score(&ScoringTarget::from(&v), naver, &TuningParameters::default());
        assert_eq!(s.matched_keywords, vec!["검색".to_string(), "AI".to_string()]);
        // (20 + 2) / 20 = 1.1, clamped
        assert_eq!(s.similarity, dec!(0.99));
    }

    #[test]
    fn test_zero_revenue_degrades_to_keyword_only() {
        let u = CandidateUniverse::seeded();
        let kia = u.get("000270").unwrap();
        let v = virtual_target("자동차", Some(Decimal::ZERO));
        let s = score(&ScoringTarget::from(&v), kia, &TuningParameters::default());
        assert_eq!(s.scale_points, 0);
        assert_eq!(s.similarity, dec!(0.6));
    }

    #[test]
    fn test_tiny_revenue_overflowing_ratio_scores_no_scale_points() {
        let u = CandidateUniverse::seeded();
        let samsung = u.get("00126380").unwrap();
        let v = virtual_target("반도체", Some(dec!(0.0000000000000001)));
        let s = score(&ScoringTarget::from(&v), samsung, &TuningParameters::default());
        assert_eq!(s.scale_points, 0);
        assert_eq!(s.scale_ratio, None);
        assert_eq!(s.keyword_points, 10);
        assert_eq!(s.similarity, dec!(0.6));
    }

    #[test]
    fn test_similarity_from_raw_bounds() {
        assert_eq!(similarity_from_raw(0), dec!(0.1));
        assert_eq!(similarity_from_raw(12), dec!(0.7));
        assert_eq!(similarity_from_raw(500), MAX_SIMILARITY);
    }
}
