use clap::Args;
use serde_json::Value;

use peerbot_core::peers::search::{search_peers, PeerSearchInput};
use peerbot_core::peers::{PeerOverrides, TuningParameters};

use super::shared::{self, CmdResult, FallbackArg, TargetArgs, TuningArgs, UniverseArgs};
use crate::input;

/// Arguments for a peer search
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PeersArgs {
    /// Path to JSON/YAML input file (overrides target flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Policy for listed companies without a curated peer list
    #[arg(long, value_enum, default_value_t = FallbackArg::Placeholder)]
    pub fallback: FallbackArg,

    #[command(flatten)]
    pub universe: UniverseArgs,
}

pub fn run_peers(args: PeersArgs) -> CmdResult<Value> {
    let mut search_input: PeerSearchInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if !args.target.is_empty() {
        PeerSearchInput {
            query: args.target.query()?,
            tuning: TuningParameters::default(),
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--corp-code or --description is required (or provide --input)".into());
    };
    search_input.tuning = args.tuning.apply(search_input.tuning);

    let universe = args.universe.load()?;
    let overrides = PeerOverrides::seeded();
    let ranker = shared::ranker(&universe, &overrides, args.fallback);

    let result = search_peers(&ranker, &search_input)?;
    Ok(serde_json::to_value(result)?)
}
