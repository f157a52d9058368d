use clap::{Args, ValueEnum};
use serde_json::Value;

use peerbot_core::peers::{PeerOverrides, QueryDescriptor};
use peerbot_core::report::{build_report, render, ReportFormat, ReportInput, ValuationReport};
use peerbot_core::ComputationOutput;

use super::shared::{
    self, CmdResult, FallbackArg, TargetArgs, TuningArgs, UniverseArgs, DEFAULT_YEAR,
};
use crate::input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Markdown,
    Text,
    Csv,
    /// Full report envelope, formatted by `--output`
    Json,
}

/// Arguments for valuation-report generation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ReportArgs {
    /// Path to JSON/YAML report input (target, peers, year); skips the peer search
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Base year of the report
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Report rendering
    #[arg(long, value_enum, default_value_t = RenderFormat::Markdown)]
    pub format: RenderFormat,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Policy for listed companies without a curated peer list
    #[arg(long, value_enum, default_value_t = FallbackArg::Placeholder)]
    pub fallback: FallbackArg,

    #[command(flatten)]
    pub universe: UniverseArgs,
}

impl ReportArgs {
    /// Text rendering requested instead of the JSON envelope.
    pub fn text_format(&self) -> Option<ReportFormat> {
        match self.format {
            RenderFormat::Markdown => Some(ReportFormat::Markdown),
            RenderFormat::Text => Some(ReportFormat::Text),
            RenderFormat::Csv => Some(ReportFormat::Csv),
            RenderFormat::Json => None,
        }
    }
}

fn generate(args: &ReportArgs) -> CmdResult<ComputationOutput<ValuationReport>> {
    let report_input: ReportInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if !args.target.is_empty() {
        let universe = args.universe.load()?;
        let overrides = PeerOverrides::seeded();
        let ranker = shared::ranker(&universe, &overrides, args.fallback);
        let target = args.target.profile(&universe, args.year)?;
        let tuning = args.tuning.apply(Default::default());
        tuning.validate()?;
        let peers = ranker.find_peers(&QueryDescriptor::from_profile(&target), &tuning);
        ReportInput {
            target,
            peers,
            year: args.year,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--corp-code or --description is required (or provide --input)".into());
    };

    Ok(build_report(&report_input)?)
}

pub fn run_report(args: ReportArgs) -> CmdResult<Value> {
    Ok(serde_json::to_value(generate(&args)?)?)
}

/// Render the report as markdown, plain text or CSV.
pub fn render_report(args: ReportArgs) -> CmdResult<String> {
    let format = args
        .text_format()
        .ok_or("JSON reports are printed through --output")?;
    let output = generate(&args)?;
    for w in &output.warnings {
        tracing::warn!("{w}");
    }
    Ok(render(&output.result, format)?)
}
