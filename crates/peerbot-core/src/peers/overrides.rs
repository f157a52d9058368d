//! Curated peer lists for specific listed companies.
//!
//! Overrides are an opt-in lookup table kept apart from the scorer: a ranker
//! only consults them when one is attached.

use std::collections::HashMap;

use rust_decimal_macros::dec;

use super::scored::ScoredPeer;
use crate::types::Market;

/// Mapping from corp code to a precomputed, ordered peer list.
#[derive(Debug, Clone, Default)]
pub struct PeerOverrides {
    entries: HashMap<String, Vec<ScoredPeer>>,
}

impl PeerOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Curated lists for the seeded listed companies.
    pub fn seeded() -> Self {
        let mut overrides = Self::new();
        overrides.insert(
            "00126380",
            vec![
                ScoredPeer::curated(
                    "000660",
                    "SK하이닉스",
                    "000660",
                    Market::Kospi,
                    dec!(0.92),
                    dec!(150000000000000),
                    dec!(0.95),
                    dec!(0.91),
                ),
                ScoredPeer::curated(
                    "066570",
                    "LG전자",
                    "066570",
                    Market::Kospi,
                    dec!(0.75),
                    dec!(80000000000000),
                    dec!(0.60),
                    dec!(0.79),
                ),
                ScoredPeer::curated(
                    "009150",
                    "삼성전기",
                    "009150",
                    Market::Kospi,
                    dec!(0.68),
                    dec!(10000000000000),
                    dec!(0.50),
                    dec!(0.72),
                ),
            ],
        );
        overrides.insert(
            "00111754",
            vec![
                ScoredPeer::curated(
                    "005940",
                    "NH투자증권",
                    "005940",
                    Market::Kospi,
                    dec!(0.88),
                    dec!(60000000000000),
                    dec!(0.90),
                    dec!(0.87),
                ),
                ScoredPeer::curated(
                    "016360",
                    "삼성증권",
                    "016360",
                    Market::Kospi,
                    dec!(0.85),
                    dec!(55000000000000),
                    dec!(0.88),
                    dec!(0.84),
                ),
            ],
        );
        overrides
    }

    /// Register or replace the curated list for a corp code. Peers are kept
    /// sorted by descending similarity (stable).
    pub fn insert(&mut self, corp_code: impl Into<String>, mut peers: Vec<ScoredPeer>) {
        peers.sort_by(|a, b| b.similarity.cmp(&a.similarity));
        self.entries.insert(corp_code.into(), peers);
    }

    pub fn get(&self, corp_code: &str) -> Option<&[ScoredPeer]> {
        self.entries.get(corp_code.trim()).map(Vec::as_slice)
    }

    pub fn contains(&self, corp_code: &str) -> bool {
        self.entries.contains_key(corp_code.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single low-similarity stand-in returned when a listed company has no
/// curated list and no scorer fallback applies.
pub fn placeholder_peer() -> ScoredPeer {
    ScoredPeer::curated(
        "999999",
        "Generic Peer 1",
        "999999",
        Market::Kosdaq,
        dec!(0.50),
        dec!(100000000000),
        dec!(0.5),
        dec!(0.5),
    )
}
