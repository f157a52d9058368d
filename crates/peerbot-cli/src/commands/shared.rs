use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use peerbot_core::filings::{FilingSource, OfflineFilingSource};
use peerbot_core::peers::{
    ListedFallback, PeerOverrides, PeerRanker, QueryDescriptor, TuningParameters, VirtualProfile,
};
use peerbot_core::profile::{CompanyProfile, FsFlat};
use peerbot_core::quality::{GoldenPeerSet, GoldenSetStore};
use peerbot_core::universe::{CandidateCompany, CandidateUniverse};
use peerbot_core::MarketFilter;

use crate::input;

pub type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Fiscal year used when `--year` is omitted
pub const DEFAULT_YEAR: i32 = 2024;

/// Tuning flags layered over defaults or an input file's tuning block.
#[derive(Args, Debug, Default, Clone)]
pub struct TuningArgs {
    /// Keyword weight (recorded; the rule-based scorer does not apply it)
    #[arg(long)]
    pub alpha: Option<Decimal>,

    /// Scale weight (recorded; the rule-based scorer does not apply it)
    #[arg(long)]
    pub beta: Option<Decimal>,

    /// Lower bound of the size band
    #[arg(long)]
    pub size_band_low: Option<Decimal>,

    /// Upper bound of the size band
    #[arg(long)]
    pub size_band_high: Option<Decimal>,

    /// Number of peers to return
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Market filter: ALL, KOSPI or KOSDAQ
    #[arg(long)]
    pub market: Option<MarketFilter>,
}

impl TuningArgs {
    pub fn apply(&self, mut base: TuningParameters) -> TuningParameters {
        if let Some(v) = self.alpha {
            base.alpha = v;
        }
        if let Some(v) = self.beta {
            base.beta = v;
        }
        if let Some(v) = self.size_band_low {
            base.size_band_low = v;
        }
        if let Some(v) = self.size_band_high {
            base.size_band_high = v;
        }
        if let Some(v) = self.top_k {
            base.top_k = v;
        }
        if let Some(v) = self.market {
            base.market = v;
        }
        base
    }
}

/// Candidate-universe override.
#[derive(Args, Debug, Default, Clone)]
pub struct UniverseArgs {
    /// Candidate universe file (JSON or YAML array) replacing the built-in pool
    #[arg(long)]
    pub universe: Option<String>,
}

impl UniverseArgs {
    pub fn load(&self) -> CmdResult<CandidateUniverse> {
        match self.universe {
            Some(ref path) => {
                let candidates: Vec<CandidateCompany> = input::file::read_input(path)?;
                Ok(CandidateUniverse::from_candidates(candidates)?)
            }
            None => Ok(CandidateUniverse::seeded()),
        }
    }
}

/// Golden-set override.
#[derive(Args, Debug, Default, Clone)]
pub struct GoldenArgs {
    /// Golden set file (JSON or YAML array) replacing the built-in sets
    #[arg(long)]
    pub golden: Option<String>,
}

impl GoldenArgs {
    pub fn load(&self) -> CmdResult<GoldenSetStore> {
        match self.golden {
            Some(ref path) => {
                let sets: Vec<GoldenPeerSet> = input::file::read_input(path)?;
                Ok(GoldenSetStore::from_sets(sets)?)
            }
            None => Ok(GoldenSetStore::seeded()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FallbackArg {
    /// One generic low-similarity peer
    #[default]
    Placeholder,
    /// Score the universe using the company's own entry
    Scorer,
}

impl From<FallbackArg> for ListedFallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Placeholder => ListedFallback::Placeholder,
            FallbackArg::Scorer => ListedFallback::Scorer,
        }
    }
}

/// Build a ranker over `universe` with the seeded curated lists.
pub fn ranker<'a>(
    universe: &'a CandidateUniverse,
    overrides: &'a PeerOverrides,
    fallback: FallbackArg,
) -> PeerRanker<'a> {
    PeerRanker::new(universe)
        .with_overrides(overrides)
        .with_fallback(fallback.into())
}

/// Search target given as flags: a listed corp code or a virtual profile.
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    /// Corp code of a listed target
    #[arg(long, conflicts_with = "description")]
    pub corp_code: Option<String>,

    /// Name of a virtual target
    #[arg(long)]
    pub name: Option<String>,

    /// Business description of a virtual target
    #[arg(long)]
    pub description: Option<String>,

    /// Annual revenue of a virtual target (KRW)
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Total assets of a virtual target (KRW)
    #[arg(long)]
    pub total_assets: Option<Decimal>,
}

impl TargetArgs {
    /// True when no target flag was given.
    pub fn is_empty(&self) -> bool {
        self.corp_code.is_none() && self.name.is_none() && self.description.is_none()
    }

    pub fn query(&self) -> CmdResult<QueryDescriptor> {
        match self.corp_code {
            Some(ref code) => Ok(QueryDescriptor::listed(code.trim())),
            None => Ok(QueryDescriptor::Virtual(self.virtual_profile()?)),
        }
    }

    /// Target profile: filing data for listed companies (universe entry when
    /// no filings exist), or a fresh virtual profile.
    pub fn profile(&self, universe: &CandidateUniverse, year: i32) -> CmdResult<CompanyProfile> {
        match self.corp_code {
            Some(ref code) => listed_profile(universe, code.trim(), year),
            None => Ok(CompanyProfile::from_virtual(&self.virtual_profile()?, year)),
        }
    }

    fn virtual_profile(&self) -> CmdResult<VirtualProfile> {
        if self.name.is_none() && self.description.is_none() {
            return Err("--corp-code, --name or --description is required (or provide --input)".into());
        }
        Ok(VirtualProfile {
            name: self.name.clone().unwrap_or_else(|| "Virtual Company".to_string()),
            description: self.description.clone().unwrap_or_default(),
            revenue: self.revenue,
            total_assets: self.total_assets,
        })
    }
}

fn listed_profile(universe: &CandidateUniverse, code: &str, year: i32) -> CmdResult<CompanyProfile> {
    let filings = OfflineFilingSource::seeded();
    if let Ok(profile) = filings.profile(code, year) {
        return Ok(profile);
    }
    let candidate = universe.get(code)?;
    tracing::debug!(corp_code = code, "no filings; profile built from universe entry");
    Ok(CompanyProfile {
        corp_code: candidate.corp_code.clone(),
        stock_code: candidate.stock_code.clone(),
        corp_name: candidate.corp_name.clone(),
        market: candidate.market,
        bsns_year: year,
        business_section: Some(candidate.business_description.clone()),
        fs_summary_flat: Some(FsFlat {
            revenue: candidate.positive_scale(),
            ..FsFlat::default()
        }),
        fs_summary_raw: None,
        report_meta: None,
        is_virtual: false,
    })
}
