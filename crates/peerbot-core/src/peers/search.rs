use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::query::QueryDescriptor;
use super::ranker::PeerRanker;
use super::scored::ScoredPeer;
use super::tuning::TuningParameters;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::PeerBotResult;

/// Input for a peer search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerSearchInput {
    pub query: QueryDescriptor,
    #[serde(default)]
    pub tuning: TuningParameters,
}

/// Output of a peer search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerSearchOutput {
    pub peers: Vec<ScoredPeer>,
    /// Number of peers returned
    pub count: usize,
    /// Highest similarity among the returned peers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_similarity: Option<Rate>,
}

/// Validate tuning, run the ranker, and wrap the result with diagnostics.
pub fn search_peers(
    ranker: &PeerRanker<'_>,
    input: &PeerSearchInput,
) -> PeerBotResult<ComputationOutput<PeerSearchOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.tuning.validate()?;

    let methodology = match &input.query {
        QueryDescriptor::Virtual(profile) => {
            if profile.description.trim().is_empty() {
                warnings.push("Empty business description; only name keywords can match".into());
            }
            if profile.scale().is_none() {
                warnings.push(
                    "No positive revenue supplied; scale component disabled for all candidates"
                        .into(),
                );
            }
            "Keyword and scale heuristic peer search"
        }
        QueryDescriptor::Listed { corp_code } => {
            if ranker.is_curated(corp_code) {
                "Curated peer list"
            } else {
                warnings.push(format!(
                    "No curated peer list for {corp_code}; using {:?} fallback",
                    ranker.fallback()
                ));
                "Listed-company peer search with fallback"
            }
        }
    };

    let peers = ranker.find_peers(&input.query, &input.tuning);
    if peers.len() < input.tuning.top_k {
        warnings.push(format!(
            "Only {} peers returned for top_k = {}",
            peers.len(),
            input.tuning.top_k
        ));
    }
    tracing::debug!(
        alpha = %input.tuning.alpha,
        beta = %input.tuning.beta,
        "tuning weights recorded; rule-based scorer does not apply them"
    );

    let output = PeerSearchOutput {
        count: peers.len(),
        top_similarity: peers.first().map(|p| p.similarity),
        peers,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}
