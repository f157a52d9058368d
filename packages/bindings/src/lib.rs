use std::sync::OnceLock;

use napi::Result as NapiResult;
use napi_derive::napi;

use peerbot_core::diagnostics::ExclusionInput;
use peerbot_core::filings::{CoverageFilter, FilingSource, OfflineFilingSource, SearchKind};
use peerbot_core::peers::search::PeerSearchInput;
use peerbot_core::peers::{PeerOverrides, PeerRanker};
use peerbot_core::quality::{GoldenPeerSet, GoldenSetStore, QualityEvalInput};
use peerbot_core::report::{ReportFormat, ReportInput};
use peerbot_core::universe::CandidateUniverse;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

static UNIVERSE: OnceLock<CandidateUniverse> = OnceLock::new();
static OVERRIDES: OnceLock<PeerOverrides> = OnceLock::new();
static GOLDEN_SETS: OnceLock<GoldenSetStore> = OnceLock::new();

fn ranker() -> PeerRanker<'static> {
    let universe = UNIVERSE.get_or_init(CandidateUniverse::seeded);
    let overrides = OVERRIDES.get_or_init(PeerOverrides::seeded);
    PeerRanker::new(universe).with_overrides(overrides)
}

fn golden_sets() -> &'static GoldenSetStore {
    GOLDEN_SETS.get_or_init(GoldenSetStore::seeded)
}

// ---------------------------------------------------------------------------
// Peer search
// ---------------------------------------------------------------------------

#[napi]
pub fn search_peers(input_json: String) -> NapiResult<String> {
    let input: PeerSearchInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        peerbot_core::peers::search::search_peers(&ranker(), &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn check_exclusion(input_json: String) -> NapiResult<String> {
    let input: ExclusionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let universe = UNIVERSE.get_or_init(CandidateUniverse::seeded);
    let output = peerbot_core::diagnostics::run_exclusion_check(universe, &input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_quality(input_json: String) -> NapiResult<String> {
    let input: QualityEvalInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = peerbot_core::quality::run_quality_eval(&ranker(), golden_sets(), &input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn list_golden_sets() -> NapiResult<String> {
    serde_json::to_string(&golden_sets().list()).map_err(to_napi_error)
}

#[napi]
pub fn upsert_golden_set(input_json: String) -> NapiResult<String> {
    let set: GoldenPeerSet = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let outcome = golden_sets().upsert(set).map_err(to_napi_error)?;
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_report(input_json: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = peerbot_core::report::build_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn render_report(input_json: String, format: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let format: ReportFormat = format.parse().map_err(to_napi_error)?;
    let report = peerbot_core::report::generate_report(&input.target, &input.peers, input.year);
    peerbot_core::report::render(&report, format).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Filings
// ---------------------------------------------------------------------------

#[napi]
pub fn report_meta(corp_name: String, year: i32) -> NapiResult<String> {
    let meta = OfflineFilingSource::seeded()
        .report_meta(&corp_name, year)
        .map_err(to_napi_error)?;
    serde_json::to_string(&meta).map_err(to_napi_error)
}

#[napi]
pub fn business_section(corp_code: String, rcept_no: String, year: i32) -> NapiResult<String> {
    let section = OfflineFilingSource::seeded()
        .business_section(&corp_code, &rcept_no, year)
        .map_err(to_napi_error)?;
    serde_json::to_string(&section).map_err(to_napi_error)
}

#[napi]
pub fn fs_summary(corp_code: String, rcept_no: String, year: i32) -> NapiResult<String> {
    let summary = OfflineFilingSource::seeded()
        .fs_summary(&corp_code, &rcept_no, year)
        .map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}

#[napi]
pub fn company_profile(identifier: String, year: i32) -> NapiResult<String> {
    let profile = OfflineFilingSource::seeded()
        .profile(&identifier, year)
        .map_err(to_napi_error)?;
    serde_json::to_string(&profile).map_err(to_napi_error)
}

#[napi]
pub fn search_companies(query: String, kind: String) -> NapiResult<String> {
    let kind: SearchKind =
        serde_json::from_value(serde_json::Value::String(kind)).map_err(to_napi_error)?;
    let results = OfflineFilingSource::seeded().search_companies(&query, kind);
    serde_json::to_string(&results).map_err(to_napi_error)
}

#[napi]
pub fn coverage(filter_json: String) -> NapiResult<String> {
    let filter: CoverageFilter = serde_json::from_str(&filter_json).map_err(to_napi_error)?;
    let (entries, stats) =
        peerbot_core::filings::filter_coverage(&OfflineFilingSource::seeded().coverage(), &filter);
    serde_json::to_string(&serde_json::json!({ "entries": entries, "stats": stats }))
        .map_err(to_napi_error)
}
