use peerbot_core::peers::scorer::similarity_from_raw;
use peerbot_core::peers::search::{search_peers, PeerSearchInput};
use peerbot_core::peers::{
    score, ListedFallback, PeerOverrides, PeerRanker, QueryDescriptor, ScoreProvenance,
    ScoringTarget, TuningParameters, VirtualProfile,
};
use peerbot_core::universe::{CandidateCompany, CandidateUniverse};
use peerbot_core::{Market, MarketFilter, PeerBotError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn virtual_query(description: &str, revenue: Option<Decimal>) -> QueryDescriptor {
    QueryDescriptor::Virtual(VirtualProfile {
        name: "Target".into(),
        description: description.into(),
        revenue,
        total_assets: None,
    })
}

fn codes(peers: &[peerbot_core::peers::ScoredPeer]) -> Vec<&str> {
    peers.iter().map(|p| p.corp_code.as_str()).collect()
}

// ===========================================================================
// Virtual queries
// ===========================================================================

#[test]
fn test_semiconductor_query_ranks_samsung_first() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let query = virtual_query("반도체 모바일 전자", Some(dec!(300000000000000)));

    let peers = ranker.find_peers(&query, &TuningParameters::default());

    assert_eq!(peers.len(), 5);
    assert_eq!(peers[0].corp_name, "삼성전자");
    // 3 keywords (30) + close scale (5) = 35, capped
    assert_eq!(peers[0].similarity, dec!(0.99));
    // 반도체 (10) + ratio exactly 2.0 (2) = 12 -> 14/20
    assert_eq!(peers[1].corp_name, "SK하이닉스");
    assert_eq!(peers[1].similarity, dec!(0.7));
    assert_eq!(
        codes(&peers),
        vec!["00126380", "000660", "035720", "323410", "00111754"]
    );
}

#[test]
fn test_samsung_breakdown_counts_three_keywords() {
    let universe = CandidateUniverse::seeded();
    let samsung = universe.get("00126380").unwrap();
    let target = ScoringTarget {
        name: "Target",
        description: "반도체 모바일 전자",
        scale: Some(dec!(300000000000000)),
    };

    let b = score(&target, samsung, &TuningParameters::default());

    assert_eq!(b.matched_count(), 3);
    assert_eq!(b.keyword_points, 30);
    assert_eq!(b.scale_points, 5);
    assert_eq!(b.raw_score, 35);
}

#[test]
fn test_unrelated_query_ties_in_universe_order() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let query = virtual_query("완전히 무관한 농업 사업", None);
    let tuning = TuningParameters {
        top_k: universe.len(),
        ..TuningParameters::default()
    };

    let peers = ranker.find_peers(&query, &tuning);

    assert_eq!(peers.len(), universe.len());
    assert!(peers.iter().all(|p| p.similarity == dec!(0.10)));
    let universe_order: Vec<&str> = universe.iter().map(|c| c.corp_code.as_str()).collect();
    assert_eq!(codes(&peers), universe_order);
}

#[test]
fn test_missing_revenue_ranks_by_keyword_overlap_only() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let description = "증권 금융 투자 모바일";
    let query = virtual_query(description, None);
    let tuning = TuningParameters {
        top_k: universe.len(),
        ..TuningParameters::default()
    };

    let peers = ranker.find_peers(&query, &tuning);

    // 3, 3 and 2 matches all clamp to 0.99; then one match (0.6); then none (0.1)
    assert_eq!(
        codes(&peers),
        vec![
            "00111754", "005940", "323410", "00126380", "035720", "377300", "000660", "035420",
            "000270", "051910",
        ]
    );

    let target = ScoringTarget {
        name: "Target",
        description,
        scale: None,
    };
    let breakdowns: Vec<_> = peers
        .iter()
        .map(|p| score(&target, universe.get(&p.corp_code).unwrap(), &tuning))
        .collect();
    assert!(breakdowns.iter().all(|b| b.scale_points == 0 && b.scale_ratio.is_none()));
    assert!(breakdowns
        .windows(2)
        .all(|w| w[0].matched_count() >= w[1].matched_count()));
    for (peer, b) in peers.iter().zip(&breakdowns) {
        assert_eq!(peer.similarity, similarity_from_raw(b.keyword_points));
    }
}

#[test]
fn test_tiny_revenue_does_not_overflow_scale_ratio() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let query = virtual_query("반도체", Some(dec!(0.0000000000000001)));

    let peers = ranker.find_peers(&query, &TuningParameters::default());

    // keyword-only: 반도체 hits Samsung and SK hynix at (10 + 2) / 20
    assert_eq!(&codes(&peers)[..2], &["00126380", "000660"]);
    assert_eq!(peers[0].similarity, dec!(0.6));
    assert_eq!(peers[1].similarity, dec!(0.6));
}

#[test]
fn test_results_bounded_sorted_and_deterministic() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let query = virtual_query("증권 금융 모바일 플랫폼 광고", Some(dec!(10000000000000)));
    let tuning = TuningParameters::default();

    let first = ranker.find_peers(&query, &tuning);
    let second = ranker.find_peers(&query, &tuning);

    assert_eq!(first, second);
    assert!(first.len() <= tuning.top_k);
    for pair in first.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    for p in &first {
        assert!(p.similarity >= Decimal::ZERO && p.similarity <= dec!(0.99));
        assert_eq!(p.keyword_score, p.similarity);
        assert_eq!(p.cosine_score, p.similarity);
        assert_eq!(p.provenance, ScoreProvenance::Keyword);
    }
}

#[test]
fn test_top_k_zero_returns_nothing() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let tuning = TuningParameters {
        top_k: 0,
        ..TuningParameters::default()
    };
    assert!(ranker
        .find_peers(&virtual_query("반도체", None), &tuning)
        .is_empty());
    assert!(ranker
        .find_peers(&QueryDescriptor::listed("00126380"), &tuning)
        .is_empty());
}

#[test]
fn test_market_filter_restricts_candidates() {
    let mut candidates: Vec<CandidateCompany> = CandidateUniverse::seeded().as_slice().to_vec();
    candidates.push(CandidateCompany {
        corp_code: "263750".into(),
        corp_name: "펄어비스".into(),
        stock_code: "263750".into(),
        market: Market::Kosdaq,
        business_description: "게임 개발".into(),
        keywords: vec!["게임".into(), "모바일".into()],
        scale: dec!(300000000000),
    });
    let universe = CandidateUniverse::from_candidates(candidates).unwrap();
    let ranker = PeerRanker::new(&universe);
    let query = virtual_query("모바일 게임", None);

    let kosdaq = ranker.find_peers(
        &query,
        &TuningParameters {
            market: MarketFilter::Kosdaq,
            ..TuningParameters::default()
        },
    );
    assert_eq!(codes(&kosdaq), vec!["263750"]);

    let all = ranker.find_peers(&query, &TuningParameters::default());
    assert_eq!(all[0].corp_code, "263750");
    assert_eq!(all[0].similarity, similarity_from_raw(20));
}

// ===========================================================================
// Listed queries
// ===========================================================================

#[test]
fn test_curated_list_for_samsung() {
    let universe = CandidateUniverse::seeded();
    let overrides = PeerOverrides::seeded();
    let ranker = PeerRanker::new(&universe).with_overrides(&overrides);

    let peers = ranker.find_peers(&QueryDescriptor::listed("00126380"), &TuningParameters::default());

    assert_eq!(codes(&peers), vec!["000660", "066570", "009150"]);
    assert_eq!(peers[0].similarity, dec!(0.92));
    assert!(peers
        .iter()
        .all(|p| p.provenance == ScoreProvenance::Curated));
}

#[test]
fn test_unknown_listed_company_gets_placeholder() {
    let universe = CandidateUniverse::seeded();
    let overrides = PeerOverrides::seeded();
    let ranker = PeerRanker::new(&universe).with_overrides(&overrides);

    let peers = ranker.find_peers(&QueryDescriptor::listed("000270"), &TuningParameters::default());

    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].corp_code, "999999");
    assert_eq!(peers[0].similarity, dec!(0.50));
}

#[test]
fn test_scorer_fallback_excludes_the_query_itself() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe).with_fallback(ListedFallback::Scorer);

    let peers = ranker.find_peers(&QueryDescriptor::listed("000270"), &TuningParameters::default());

    assert_eq!(peers.len(), 5);
    assert!(peers.iter().all(|p| p.corp_code != "000270"));
    for pair in peers.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_search_peers_envelope() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let input = PeerSearchInput {
        query: virtual_query("반도체 모바일 전자", Some(dec!(300000000000000))),
        tuning: TuningParameters::default(),
    };

    let out = search_peers(&ranker, &input).unwrap();

    assert_eq!(out.result.count, 5);
    assert_eq!(out.result.top_similarity, Some(dec!(0.99)));
    assert!(out.warnings.is_empty());
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_search_peers_rejects_invalid_tuning() {
    let universe = CandidateUniverse::seeded();
    let ranker = PeerRanker::new(&universe);
    let input = PeerSearchInput {
        query: virtual_query("반도체", None),
        tuning: TuningParameters {
            size_band_low: dec!(3),
            size_band_high: dec!(2),
            ..TuningParameters::default()
        },
    };

    let err = search_peers(&ranker, &input).unwrap_err();
    assert!(matches!(err, PeerBotError::InvalidInput { .. }));
}

#[test]
fn test_query_descriptor_json_shape() {
    let q: QueryDescriptor =
        serde_json::from_str(r#"{"kind":"listed","corp_code":"00126380"}"#).unwrap();
    assert_eq!(q, QueryDescriptor::listed("00126380"));

    let v: QueryDescriptor = serde_json::from_str(
        r#"{"kind":"virtual","name":"X","description":"증권","revenue":"1000"}"#,
    )
    .unwrap();
    assert!(matches!(v, QueryDescriptor::Virtual(ref p) if p.revenue == Some(dec!(1000))));
}
