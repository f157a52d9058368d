use clap::Args;
use serde_json::Value;

use peerbot_core::peers::{PeerOverrides, TuningParameters};
use peerbot_core::quality::{run_quality_eval, QualityEvalInput};

use super::shared::{
    self, CmdResult, FallbackArg, GoldenArgs, TargetArgs, TuningArgs, UniverseArgs, DEFAULT_YEAR,
};
use crate::input;

/// Arguments for a search-quality evaluation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QualityArgs {
    /// Path to JSON/YAML input file (overrides target flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Golden set to evaluate against
    #[arg(long)]
    pub golden_id: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Fiscal year of the target profile
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Policy for listed companies without a curated peer list
    #[arg(long, value_enum, default_value_t = FallbackArg::Placeholder)]
    pub fallback: FallbackArg,

    #[command(flatten)]
    pub universe: UniverseArgs,

    #[command(flatten)]
    pub golden: GoldenArgs,
}

pub fn run_quality(args: QualityArgs) -> CmdResult<Value> {
    let universe = args.universe.load()?;

    let mut eval_input: QualityEvalInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if !args.target.is_empty() {
        QualityEvalInput {
            target: args.target.profile(&universe, args.year)?,
            tuning: TuningParameters::default(),
            golden_id: args
                .golden_id
                .clone()
                .ok_or("--golden-id is required (or provide --input)")?,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--corp-code or --description is required (or provide --input)".into());
    };
    if let Some(id) = args.golden_id {
        eval_input.golden_id = id;
    }
    eval_input.tuning = args.tuning.apply(eval_input.tuning);

    let store = args.golden.load()?;
    let overrides = PeerOverrides::seeded();
    let ranker = shared::ranker(&universe, &overrides, args.fallback);

    let result = run_quality_eval(&ranker, &store, &eval_input)?;
    Ok(serde_json::to_value(result)?)
}
