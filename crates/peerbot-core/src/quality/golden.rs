use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use crate::error::PeerBotError;
use crate::PeerBotResult;

/// A peer considered correct for a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenPeer {
    pub corp_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corp_name: Option<String>,
}

impl GoldenPeer {
    pub fn new(corp_code: &str, corp_name: &str) -> Self {
        Self {
            corp_code: corp_code.to_string(),
            stock_code: None,
            corp_name: Some(corp_name.to_string()),
        }
    }
}

/// Hand-curated ground-truth peers for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenPeerSet {
    pub id: String,
    pub target_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_corp_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Membership is by corp code; order carries no meaning
    pub golden_peers: Vec<GoldenPeer>,
}

impl GoldenPeerSet {
    /// Distinct golden corp codes.
    pub fn codes(&self) -> HashSet<&str> {
        self.golden_peers
            .iter()
            .map(|p| p.corp_code.as_str())
            .collect()
    }

    pub fn contains(&self, corp_code: &str) -> bool {
        self.golden_peers.iter().any(|p| p.corp_code == corp_code)
    }
}

/// Whether an upsert added a new set or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Golden-set collection shared between evaluations.
///
/// Readers take a shared lock; `upsert` is the only writer.
#[derive(Debug, Default)]
pub struct GoldenSetStore {
    sets: RwLock<Vec<GoldenPeerSet>>,
}

impl GoldenSetStore {
    pub fn new(sets: Vec<GoldenPeerSet>) -> Self {
        Self {
            sets: RwLock::new(sets),
        }
    }

    /// Store holding the curated seed sets.
    pub fn seeded() -> Self {
        let created_at = Utc
            .with_ymd_and_hms(2025, 3, 31, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(vec![
            GoldenPeerSet {
                id: "golden-1".into(),
                target_label: "삼성전자 (반도체/모바일)".into(),
                target_corp_code: Some("00126380".into()),
                created_at,
                golden_peers: vec![
                    GoldenPeer::new("000660", "SK하이닉스"),
                    GoldenPeer::new("066570", "LG전자"),
                ],
            },
            GoldenPeerSet {
                id: "golden-2".into(),
                target_label: "Virtual - 증권사".into(),
                target_corp_code: None,
                created_at,
                golden_peers: vec![
                    GoldenPeer::new("00111754", "미래에셋증권"),
                    GoldenPeer::new("005940", "NH투자증권"),
                    GoldenPeer::new("016360", "삼성증권"),
                ],
            },
        ])
    }

    /// Parse a JSON array of golden sets.
    pub fn from_json_str(json: &str) -> PeerBotResult<Self> {
        let sets: Vec<GoldenPeerSet> = serde_json::from_str(json)?;
        Self::from_sets(sets)
    }

    /// Build a store from loaded sets, rejecting blank or duplicate ids.
    pub fn from_sets(sets: Vec<GoldenPeerSet>) -> PeerBotResult<Self> {
        let mut seen = HashSet::new();
        for set in &sets {
            validate_id(&set.id)?;
            if !seen.insert(set.id.as_str()) {
                return Err(PeerBotError::invalid(
                    "id",
                    format!("duplicate golden set id '{}'", set.id),
                ));
            }
        }
        Ok(Self::new(sets))
    }

    /// Snapshot of all sets in insertion order.
    pub fn list(&self) -> Vec<GoldenPeerSet> {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<GoldenPeerSet> {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Replace the set with a matching id, or append it.
    pub fn upsert(&self, set: GoldenPeerSet) -> PeerBotResult<UpsertOutcome> {
        validate_id(&set.id)?;
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        let outcome = match sets.iter().position(|s| s.id == set.id) {
            Some(idx) => {
                sets[idx] = set;
                UpsertOutcome::Replaced
            }
            None => {
                sets.push(set);
                UpsertOutcome::Inserted
            }
        };
        tracing::debug!(?outcome, total = sets.len(), "golden set upserted");
        Ok(outcome)
    }

    pub fn len(&self) -> usize {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_id(id: &str) -> PeerBotResult<()> {
    if id.trim().is_empty() {
        return Err(PeerBotError::invalid("id", "golden set id must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn set(id: &str, label: &str) -> GoldenPeerSet {
        GoldenPeerSet {
            id: id.into(),
            target_label: label.into(),
            target_corp_code: None,
            created_at: Utc::now(),
            golden_peers: vec![GoldenPeer::new("000660", "SK하이닉스")],
        }
    }

    #[test]
    fn test_seeded_sets() {
        let store = GoldenSetStore::seeded();
        let sets = store.list();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].id, "golden-1");
        assert_eq!(sets[1].codes().len(), 3);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let store = GoldenSetStore::seeded();
        assert_eq!(
            store.upsert(set("golden-1", "replaced")).unwrap(),
            UpsertOutcome::Replaced
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("golden-1").unwrap().target_label, "replaced");
        // position is preserved
        assert_eq!(store.list()[0].id, "golden-1");
    }

    #[test]
    fn test_upsert_appends_new() {
        let store = GoldenSetStore::seeded();
        assert_eq!(
            store.upsert(set("golden-3", "new")).unwrap(),
            UpsertOutcome::Inserted
        );
        assert_eq!(store.list().last().unwrap().id, "golden-3");
    }

    #[test]
    fn test_upsert_rejects_blank_id() {
        let store = GoldenSetStore::default();
        assert!(store.upsert(set("  ", "blank")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let store = Arc::new(GoldenSetStore::seeded());
        let mut handles = Vec::new();
        for i in 0..4 {
            let s = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                s.upsert(set(&format!("t-{i}"), "thread")).unwrap();
                s.list().len()
            }));
        }
        for h in handles {
            assert!(h.join().unwrap() >= 3);
        }
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let one = serde_json::to_value(set("a", "x")).unwrap();
        let json = serde_json::to_string(&vec![one.clone(), one]).unwrap();
        assert!(GoldenSetStore::from_json_str(&json).is_err());
    }

    #[test]
    fn test_golden_codes_are_distinct() {
        let mut s = set("dup", "dup");
        s.golden_peers.push(GoldenPeer::new("000660", "SK하이닉스"));
        assert_eq!(s.codes().len(), 1);
        assert!(s.contains("000660"));
    }
}
