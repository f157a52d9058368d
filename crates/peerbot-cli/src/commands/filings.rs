use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use peerbot_core::filings::{
    filter_coverage, flatten_fs_summary, CollectionStatus, CoverageFilter, FilingSource,
    OfflineFilingSource, SearchKind,
};
use peerbot_core::MarketFilter;

use super::shared::{CmdResult, UniverseArgs, DEFAULT_YEAR};

/// Arguments for report-metadata lookup
#[derive(Args)]
pub struct MetaArgs {
    /// Company name, e.g. 삼성전자
    pub corp_name: String,

    /// Fiscal year
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,
}

/// Arguments for filing-document lookups
#[derive(Args)]
pub struct FilingArgs {
    /// Corp code of the filer
    pub corp_code: String,

    /// Filing receipt number (resolved from report metadata when omitted)
    #[arg(long)]
    pub rcept_no: Option<String>,

    /// Fiscal year
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,
}

/// Arguments for financial-summary lookup
#[derive(Args)]
pub struct FsSummaryArgs {
    #[command(flatten)]
    pub filing: FilingArgs,

    /// Return flattened headline figures instead of raw tables
    #[arg(long)]
    pub flat: bool,
}

/// Arguments for company-profile assembly
#[derive(Args)]
pub struct ProfileArgs {
    /// Corp code or exact company name
    pub identifier: String,

    /// Fiscal year
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Name,
    Business,
}

/// Arguments for company search
#[derive(Args)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// How the query is matched
    #[arg(long, value_enum, default_value_t = KindArg::Name)]
    pub kind: KindArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    NotStarted,
    Done,
    Failed,
}

/// Arguments for the coverage / candidate universe listing
#[derive(Args)]
pub struct UniverseListArgs {
    /// Market filter: ALL, KOSPI or KOSDAQ
    #[arg(long, default_value = "ALL")]
    pub market: MarketFilter,

    /// Keep only entries with this collection status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// List the peer candidate pool instead of the filing coverage registry
    #[arg(long)]
    pub candidates: bool,

    #[command(flatten)]
    pub universe: UniverseArgs,
}

pub fn run_meta(args: MetaArgs) -> CmdResult<Value> {
    let source = OfflineFilingSource::seeded();
    let meta = source.report_meta(&args.corp_name, args.year)?;
    Ok(serde_json::to_value(meta)?)
}

pub fn run_business_section(args: FilingArgs) -> CmdResult<Value> {
    let source = OfflineFilingSource::seeded();
    let rcept_no = resolve_rcept_no(&source, &args);
    let section = source.business_section(&args.corp_code, &rcept_no, args.year)?;
    Ok(serde_json::to_value(section)?)
}

pub fn run_fs_summary(args: FsSummaryArgs) -> CmdResult<Value> {
    let source = OfflineFilingSource::seeded();
    let rcept_no = resolve_rcept_no(&source, &args.filing);
    let summary = source.fs_summary(&args.filing.corp_code, &rcept_no, args.filing.year)?;
    if args.flat {
        return Ok(serde_json::to_value(flatten_fs_summary(&summary))?);
    }
    Ok(serde_json::to_value(summary)?)
}

pub fn run_profile(args: ProfileArgs) -> CmdResult<Value> {
    let source = OfflineFilingSource::seeded();
    let profile = source.profile(&args.identifier, args.year)?;
    Ok(serde_json::to_value(profile)?)
}

pub fn run_search(args: SearchArgs) -> CmdResult<Value> {
    let kind = match args.kind {
        KindArg::Name => SearchKind::Name,
        KindArg::Business => SearchKind::Business,
    };
    let source = OfflineFilingSource::seeded();
    let results = source.search_companies(&args.query, kind);
    Ok(json!({
        "result": {
            "count": results.len(),
            "results": results,
        }
    }))
}

pub fn run_universe(args: UniverseListArgs) -> CmdResult<Value> {
    if args.candidates {
        let universe = args.universe.load()?;
        let candidates: Vec<_> = universe.in_market(args.market).collect();
        return Ok(json!({
            "result": {
                "count": candidates.len(),
                "candidates": candidates,
            }
        }));
    }

    let filter = CoverageFilter {
        market: args.market,
        status: args.status.map(|s| match s {
            StatusArg::NotStarted => CollectionStatus::NotStarted,
            StatusArg::Done => CollectionStatus::Done,
            StatusArg::Failed => CollectionStatus::Failed,
        }),
    };
    let source = OfflineFilingSource::seeded();
    let (entries, stats) = filter_coverage(&source.coverage(), &filter);
    Ok(json!({
        "result": {
            "stats": stats,
            "entries": entries,
        }
    }))
}

/// Explicit `--rcept-no`, else the receipt number of the company's report
/// for the year, else empty.
fn resolve_rcept_no(source: &OfflineFilingSource, args: &FilingArgs) -> String {
    if let Some(ref no) = args.rcept_no {
        return no.clone();
    }
    source
        .coverage()
        .into_iter()
        .find(|e| e.corp_code == args.corp_code)
        .and_then(|e| source.report_meta(&e.corp_name, args.year).ok())
        .map(|m| m.rcept_no)
        .unwrap_or_default()
}
