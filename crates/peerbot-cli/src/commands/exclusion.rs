use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use peerbot_core::diagnostics::{run_exclusion_check, ExclusionContext, ExclusionInput};
use peerbot_core::MarketFilter;

use super::shared::{CmdResult, UniverseArgs};
use crate::input;

/// Arguments for exclusion diagnostics
#[derive(Args)]
pub struct ExclusionArgs {
    /// Candidate company names (substring match against the universe)
    pub names: Vec<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Target company scale (revenue, KRW)
    #[arg(long)]
    pub target_scale: Option<Decimal>,

    /// Target business description
    #[arg(long)]
    pub description: Option<String>,

    /// Require candidates to be listed on this market (KOSPI or KOSDAQ)
    #[arg(long)]
    pub market: Option<MarketFilter>,

    #[command(flatten)]
    pub universe: UniverseArgs,
}

pub fn run_exclusion(args: ExclusionArgs) -> CmdResult<Value> {
    let exclusion_input: ExclusionInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if !args.names.is_empty() {
        ExclusionInput {
            candidates: args.names,
            context: ExclusionContext {
                target_scale: args.target_scale,
                description: args.description,
                market: args.market,
            },
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("at least one candidate name is required (or provide --input)".into());
    };

    let universe = args.universe.load()?;
    let result = run_exclusion_check(&universe, &exclusion_input)?;
    Ok(serde_json::to_value(result)?)
}
