use serde::{Deserialize, Serialize};

use crate::types::{Market, Money, Rate};
use crate::universe::CandidateCompany;

/// Where a peer's scores came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ScoreProvenance {
    /// Rule-based keyword and scale scorer; keyword and cosine scores alias similarity
    Keyword,
    /// Reserved for an embedding-based scorer with an independent cosine score
    Embedding,
    /// Hand-authored result from a curated override table
    Curated,
}

/// A ranked peer as returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPeer {
    pub corp_code: String,
    pub corp_name: String,
    pub stock_code: String,
    pub market: Market,
    /// Blended similarity in [0, 0.99]
    pub similarity: Rate,
    /// Scale figure (revenue) of the peer
    pub scale_value: Money,
    pub keyword_score: Rate,
    pub cosine_score: Rate,
    pub provenance: ScoreProvenance,
}

impl ScoredPeer {
    /// Peer built by the keyword scorer; both component scores alias the
    /// final similarity.
    pub fn from_keyword_score(candidate: &CandidateCompany, similarity: Rate) -> Self {
        Self {
            corp_code: candidate.corp_code.clone(),
            corp_name: candidate.corp_name.clone(),
            stock_code: candidate.stock_code.clone(),
            market: candidate.market,
            similarity,
            scale_value: candidate.scale,
            keyword_score: similarity,
            cosine_score: similarity,
            provenance: ScoreProvenance::Keyword,
        }
    }

    /// Peer with independently authored component scores.
    #[allow(clippy::too_many_arguments)]
    pub fn curated(
        corp_code: &str,
        corp_name: &str,
        stock_code: &str,
        market: Market,
        similarity: Rate,
        scale_value: Money,
        keyword_score: Rate,
        cosine_score: Rate,
    ) -> Self {
        Self {
            corp_code: corp_code.to_string(),
            corp_name: corp_name.to_string(),
            stock_code: stock_code.to_string(),
            market,
            similarity,
            scale_value,
            keyword_score,
            cosine_score,
            provenance: ScoreProvenance::Curated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_is_tagged() {
        let json = serde_json::to_value(ScoreProvenance::Keyword).unwrap();
        assert_eq!(json, serde_json::json!({ "method": "keyword" }));
        let back: ScoreProvenance =
            serde_json::from_value(serde_json::json!({ "method": "embedding" })).unwrap();
        assert_eq!(back, ScoreProvenance::Embedding);
    }
}
