mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::exclusion::ExclusionArgs;
use commands::filings::{FilingArgs, FsSummaryArgs, MetaArgs, ProfileArgs, SearchArgs, UniverseListArgs};
use commands::golden::GoldenSetsArgs;
use commands::peers::PeersArgs;
use commands::quality::QualityArgs;
use commands::report::ReportArgs;

/// Peer-company discovery and search-quality evaluation
#[derive(Parser)]
#[command(
    name = "peerbot",
    version,
    about = "Peer-company discovery and search-quality evaluation",
    long_about = "A CLI for finding comparable companies for listed or virtual targets, \
                  diagnosing why a candidate should be excluded, measuring ranking quality \
                  against golden peer sets, and rendering peer valuation reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Debug logging on stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank peers for a listed corp code or a virtual company
    Peers(PeersArgs),
    /// Check whether named candidates should be excluded as peers
    Exclusion(ExclusionArgs),
    /// Precision@K / Recall@K against a golden peer set
    Quality(QualityArgs),
    /// List, show or upsert golden peer sets
    GoldenSets(GoldenSetsArgs),
    /// Generate a peer valuation report
    Report(ReportArgs),
    /// Annual-report metadata for a company
    Meta(MetaArgs),
    /// Business-section text of a filing
    BusinessSection(FilingArgs),
    /// Financial-summary tables of a filing
    FsSummary(FsSummaryArgs),
    /// Company profile assembled from filings
    Profile(ProfileArgs),
    /// Search the filing registry by name or business
    Search(SearchArgs),
    /// Filing coverage registry, or the peer candidate pool
    Universe(UniverseListArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Peers(args) => commands::peers::run_peers(args),
        Commands::Exclusion(args) => commands::exclusion::run_exclusion(args),
        Commands::Quality(args) => commands::quality::run_quality(args),
        Commands::GoldenSets(args) => commands::golden::run_golden_sets(args),
        Commands::Report(args) if args.text_format().is_some() => {
            match commands::report::render_report(args) {
                Ok(text) => {
                    print!("{}", text);
                    process::exit(0);
                }
                Err(e) => fail(e),
            }
        }
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Meta(args) => commands::filings::run_meta(args),
        Commands::BusinessSection(args) => commands::filings::run_business_section(args),
        Commands::FsSummary(args) => commands::filings::run_fs_summary(args),
        Commands::Profile(args) => commands::filings::run_profile(args),
        Commands::Search(args) => commands::filings::run_search(args),
        Commands::Universe(args) => commands::filings::run_universe(args),
        Commands::Version => {
            println!("peerbot {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}
