use serde::{Deserialize, Serialize};

use super::overrides::{placeholder_peer, PeerOverrides};
use super::query::QueryDescriptor;
use super::scored::ScoredPeer;
use super::scorer::{score, ScoringTarget};
use super::tuning::TuningParameters;
use crate::universe::{CandidateCompany, CandidateUniverse};

/// What a listed-company search returns when no curated list exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListedFallback {
    /// One generic low-similarity peer
    #[default]
    Placeholder,
    /// Score the universe using the company's own universe entry as the query
    Scorer,
}

/// Scores, sorts and truncates a candidate universe for a query.
#[derive(Debug, Clone, Copy)]
pub struct PeerRanker<'a> {
    universe: &'a CandidateUniverse,
    overrides: Option<&'a PeerOverrides>,
    fallback: ListedFallback,
}

impl<'a> PeerRanker<'a> {
    pub fn new(universe: &'a CandidateUniverse) -> Self {
        Self {
            universe,
            overrides: None,
            fallback: ListedFallback::Placeholder,
        }
    }

    pub fn with_overrides(mut self, overrides: &'a PeerOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_fallback(mut self, fallback: ListedFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn universe(&self) -> &'a CandidateUniverse {
        self.universe
    }

    pub fn fallback(&self) -> ListedFallback {
        self.fallback
    }

    /// Ranked peers for a query: at most `tuning.top_k`, descending by
    /// similarity, ties kept in universe order.
    pub fn find_peers(&self, query: &QueryDescriptor, tuning: &TuningParameters) -> Vec<ScoredPeer> {
        let peers = match query {
            QueryDescriptor::Virtual(profile) => {
                self.rank_universe(&ScoringTarget::from(profile), None, tuning)
            }
            QueryDescriptor::Listed { corp_code } => self.find_listed(corp_code, tuning),
        };
        tracing::debug!(
            query = %query_label(query),
            top_k = tuning.top_k,
            market = %tuning.market,
            returned = peers.len(),
            "peer search complete"
        );
        peers
    }

    /// True when a listed query for `corp_code` is answered by a curated list.
    pub fn is_curated(&self, corp_code: &str) -> bool {
        self.overrides.is_some_and(|o| o.contains(corp_code))
    }

    fn find_listed(&self, corp_code: &str, tuning: &TuningParameters) -> Vec<ScoredPeer> {
        if let Some(curated) = self.overrides.and_then(|o| o.get(corp_code)) {
            return curated
                .iter()
                .filter(|p| tuning.market.admits(p.market))
                .take(tuning.top_k)
                .cloned()
                .collect();
        }

        if self.fallback == ListedFallback::Scorer {
            if let Ok(own) = self.universe.get(corp_code) {
                return self.rank_universe(&ScoringTarget::from(own), Some(&own.corp_code), tuning);
            }
            tracing::warn!(corp_code, "listed query not in universe; using placeholder peer");
        }

        let placeholder = placeholder_peer();
        if tuning.top_k == 0 || !tuning.market.admits(placeholder.market) {
            return Vec::new();
        }
        vec![placeholder]
    }

    fn rank_universe(
        &self,
        target: &ScoringTarget<'_>,
        exclude_code: Option<&str>,
        tuning: &TuningParameters,
    ) -> Vec<ScoredPeer> {
        let mut scored: Vec<ScoredPeer> = self
            .universe
            .in_market(tuning.market)
            .filter(|c| exclude_code != Some(c.corp_code.as_str()))
            .map(|c: &CandidateCompany| {
                let breakdown = score(target, c, tuning);
                tracing::trace!(
                    corp_code = %c.corp_code,
                    raw = breakdown.raw_score,
                    similarity = %breakdown.similarity,
                    "candidate scored"
                );
                ScoredPeer::from_keyword_score(c, breakdown.similarity)
            })
            .collect();

        // sort_by is stable: equal similarities keep universe order
        scored.sort_by(|a, b| b.similarity.cmp(&a.similarity));
        scored.truncate(tuning.top_k);
        scored
    }
}

fn query_label(query: &QueryDescriptor) -> String {
    match query {
        QueryDescriptor::Listed { corp_code } => format!("listed:{corp_code}"),
        QueryDescriptor::Virtual(v) => format!("virtual:{}", v.name),
    }
}
