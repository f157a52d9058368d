//! Candidate universe: the in-memory registry of companies a peer search
//! may return. Entries keep insertion order, which is the ranking tie-break.

pub mod candidate;
mod seed;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::PeerBotError;
use crate::types::MarketFilter;
use crate::PeerBotResult;

pub use candidate::CandidateCompany;

/// Immutable, ordered collection of candidate companies keyed by `corp_code`.
#[derive(Debug, Clone)]
pub struct CandidateUniverse {
    candidates: Vec<CandidateCompany>,
    by_code: HashMap<String, usize>,
}

impl CandidateUniverse {
    /// Build a universe from candidates, normalizing keywords and rejecting
    /// blank or duplicate corp codes.
    pub fn from_candidates(candidates: Vec<CandidateCompany>) -> PeerBotResult<Self> {
        let mut by_code = HashMap::with_capacity(candidates.len());
        let mut normalized = Vec::with_capacity(candidates.len());

        for (idx, mut candidate) in candidates.into_iter().enumerate() {
            let code = candidate.corp_code.trim().to_string();
            if code.is_empty() {
                return Err(PeerBotError::invalid(
                    "corp_code",
                    format!("candidate #{idx} ({}) has an empty corp_code", candidate.corp_name),
                ));
            }
            if by_code.insert(code.clone(), idx).is_some() {
                return Err(PeerBotError::invalid(
                    "corp_code",
                    format!("duplicate corp_code '{code}' in candidate universe"),
                ));
            }
            if candidate.scale <= Decimal::ZERO {
                tracing::warn!(
                    corp_code = %code,
                    scale = %candidate.scale,
                    "candidate has no positive scale; scale rules will treat it as absent"
                );
            }
            candidate.corp_code = code;
            candidate.normalize_keywords();
            normalized.push(candidate);
        }

        Ok(Self {
            candidates: normalized,
            by_code,
        })
    }

    /// The built-in candidate pool.
    pub fn seeded() -> Self {
        let candidates = seed::seed_candidates();
        let by_code = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.corp_code.clone(), idx))
            .collect();
        Self {
            candidates,
            by_code,
        }
    }

    /// Parse a JSON array of candidates.
    pub fn from_json_str(json: &str) -> PeerBotResult<Self> {
        let candidates: Vec<CandidateCompany> = serde_json::from_str(json)?;
        Self::from_candidates(candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateCompany> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[CandidateCompany] {
        &self.candidates
    }

    /// Look up a candidate by its unique corp code.
    pub fn get(&self, corp_code: &str) -> PeerBotResult<&CandidateCompany> {
        self.by_code
            .get(corp_code.trim())
            .map(|&idx| &self.candidates[idx])
            .ok_or_else(|| PeerBotError::not_found("candidate", corp_code))
    }

    /// First candidate whose name contains `fragment`, compared as given.
    pub fn find_by_name(&self, fragment: &str) -> Option<&CandidateCompany> {
        self.candidates
            .iter()
            .find(|c| c.corp_name.contains(fragment))
    }

    /// Candidates whose name contains `query`, case-insensitively.
    pub fn search_by_name(&self, query: &str) -> Vec<&CandidateCompany> {
        let q = query.trim().to_lowercase();
        self.candidates
            .iter()
            .filter(|c| c.corp_name.to_lowercase().contains(&q))
            .collect()
    }

    /// Candidates admitted by a market filter, in insertion order.
    pub fn in_market(&self, filter: MarketFilter) -> impl Iterator<Item = &CandidateCompany> {
        self.candidates
            .iter()
            .filter(move |c| filter.admits(c.market))
    }
}

impl Default for CandidateUniverse {
    fn default() -> Self {
        Self::seeded()
    }
}
