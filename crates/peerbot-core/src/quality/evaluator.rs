//! Retrospective search-quality measurement against golden peer sets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::golden::{GoldenPeerSet, GoldenSetStore};
use crate::error::PeerBotError;
use crate::peers::{PeerRanker, QueryDescriptor, ScoredPeer, TuningParameters};
use crate::profile::CompanyProfile;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::PeerBotResult;

/// Information-retrieval metrics over the top-K window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub k: usize,
    pub precision_at_k: Rate,
    pub recall_at_k: Rate,
    /// Any golden peer within the window
    pub hit_at_k: bool,
    /// Distinct golden corp codes
    pub num_golden: usize,
    pub num_hits: usize,
}

impl QualityMetrics {
    /// Metrics for a peer window. Precision divides by `k`, not by the
    /// window length, so a short result list is penalised.
    pub fn compute(window: &[ScoredPeer], golden: &GoldenPeerSet, k: usize) -> Self {
        let codes = golden.codes();
        let num_hits = window
            .iter()
            .take(k)
            .filter(|p| codes.contains(p.corp_code.as_str()))
            .count();
        let num_golden = codes.len();

        let precision_at_k = if k > 0 {
            Decimal::from(num_hits as u64) / Decimal::from(k as u64)
        } else {
            Decimal::ZERO
        };
        let recall_at_k = if num_golden > 0 {
            Decimal::from(num_hits as u64) / Decimal::from(num_golden as u64)
        } else {
            Decimal::ZERO
        };

        Self {
            k,
            precision_at_k,
            recall_at_k,
            hit_at_k: num_hits > 0,
            num_golden,
            num_hits,
        }
    }
}

/// Full evaluation record, echoing inputs for traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityEvalResult {
    pub target_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_corp_code: Option<String>,
    pub tuning: TuningParameters,
    pub golden: GoldenPeerSet,
    /// The evaluation window
    pub peers: Vec<ScoredPeer>,
    pub metrics: QualityMetrics,
}

/// Re-run the ranker for `target` and score the top-K window against `golden`.
pub fn evaluate(
    ranker: &PeerRanker<'_>,
    target: &CompanyProfile,
    tuning: &TuningParameters,
    golden: &GoldenPeerSet,
) -> QualityEvalResult {
    let query = QueryDescriptor::from_profile(target);
    let mut peers = ranker.find_peers(&query, tuning);
    peers.truncate(tuning.top_k);

    let metrics = QualityMetrics::compute(&peers, golden, tuning.top_k);
    tracing::debug!(
        golden_id = %golden.id,
        k = metrics.k,
        hits = metrics.num_hits,
        precision = %metrics.precision_at_k,
        recall = %metrics.recall_at_k,
        "quality evaluation complete"
    );

    QualityEvalResult {
        target_label: golden.target_label.clone(),
        target_corp_code: Some(target.corp_code.clone()),
        tuning: tuning.clone(),
        golden: golden.clone(),
        peers,
        metrics,
    }
}

/// Evaluate against the stored golden set with the given id.
pub fn evaluate_by_id(
    ranker: &PeerRanker<'_>,
    store: &GoldenSetStore,
    golden_id: &str,
    target: &CompanyProfile,
    tuning: &TuningParameters,
) -> PeerBotResult<QualityEvalResult> {
    let golden = store
        .get(golden_id)
        .ok_or_else(|| PeerBotError::not_found("golden set", golden_id))?;
    Ok(evaluate(ranker, target, tuning, &golden))
}

/// Input for a quality evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityEvalInput {
    pub target: CompanyProfile,
    #[serde(default)]
    pub tuning: TuningParameters,
    pub golden_id: String,
}

/// Validate tuning, evaluate, and wrap the result with diagnostics.
pub fn run_quality_eval(
    ranker: &PeerRanker<'_>,
    store: &GoldenSetStore,
    input: &QualityEvalInput,
) -> PeerBotResult<ComputationOutput<QualityEvalResult>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    input.tuning.validate()?;
    let result = evaluate_by_id(ranker, store, &input.golden_id, &input.target, &input.tuning)?;

    if result.metrics.num_golden == 0 {
        warnings.push(format!(
            "Golden set '{}' has no peers; recall reported as 0",
            input.golden_id
        ));
    }
    if result.peers.len() < input.tuning.top_k {
        warnings.push(format!(
            "Ranker returned {} peers for k = {}; precision is computed over k",
            result.peers.len(),
            input.tuning.top_k
        ));
    }
    if let Some(expected) = &result.golden.target_corp_code {
        if !input.target.is_virtual && expected != &input.target.corp_code {
            warnings.push(format!(
                "Golden set targets {expected} but evaluated target is {}",
                input.target.corp_code
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Precision@K / Recall@K against golden peer set",
        input,
        warnings,
        elapsed,
        result,
    ))
}
