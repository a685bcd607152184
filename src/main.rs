use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use team_analysis::aggregate::UnknownTierPolicy;
use team_analysis::pipeline::{self, AnalysisOptions, DEFAULT_INPUT, DEFAULT_OUTPUT};
use team_analysis::{AnalysisError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;
    let options = cli.into_options();
    let mut stdout = std::io::stdout().lock();
    pipeline::run(&options, &mut stdout)?;
    Ok(())
}

fn init_logging(verbosity: u8) -> Result<()> {
    let default_directive = match verbosity {
        0 => "team_analysis=warn",
        1 => "team_analysis=info",
        _ => "team_analysis=debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|error| AnalysisError::Logging(error.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| AnalysisError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarise per-team game results, leaving out wins against flagged-tier opponents."
)]
struct Cli {
    /// Workbook holding one game per row on its first sheet.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Destination of the per-team CSV summary.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Column that marks tier opponents, instead of guessing from
    /// "d1", "division" or "tier" in the header.
    #[arg(long)]
    tier_column: Option<String>,

    /// What to do with games whose tier value is neither yes nor no.
    #[arg(long, value_enum, default_value_t = UnknownTier::Keep)]
    unknown_tier: UnknownTier,

    /// Increase log verbosity when RUST_LOG is unset.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_options(self) -> AnalysisOptions {
        AnalysisOptions {
            input: self.input,
            output: self.output,
            tier_column: self.tier_column,
            unknown_tier: self.unknown_tier.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum UnknownTier {
    /// Count the game as if the opponent were not flagged.
    Keep,
    /// Leave the game out of the totals.
    Drop,
}

impl From<UnknownTier> for UnknownTierPolicy {
    fn from(kind: UnknownTier) -> Self {
        match kind {
            UnknownTier::Keep => UnknownTierPolicy::Keep,
            UnknownTier::Drop => UnknownTierPolicy::Drop,
        }
    }
}
