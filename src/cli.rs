use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{BalancingPolicy, Counterbalancing, ExperimentConfig};
use crate::export::TimelineExport;
use crate::metrics::balance_summary;
use crate::timeline::{Timeline, build_timeline};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Balanced,
    WithReplacement,
}

impl From<PolicyArg> for BalancingPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Balanced => BalancingPolicy::BalancedRepeat,
            PolicyArg::WithReplacement => BalancingPolicy::WithReplacement,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    AFirst,
    BFirst,
    /// Seeded coin flip between the two orders.
    Random,
}

#[derive(Debug, Parser)]
#[command(
    name = "iat_timeline",
    disable_help_subcommand = true,
    about = "Build a seeded IAT timeline",
    long_about = "Generate the 7-block gender x talent/effort IAT timeline and emit it as JSON for the presentation runtime.",
    after_help = "Flags override values loaded from --config; unset flags keep the config (or built-in) values."
)]
/// CLI for `iat_timeline`.
///
/// Common usage:
/// - Print the default timeline: `iat_timeline`
/// - Reproduce a participant's sequence: `iat_timeline --seed 1234 --output out/p1234.json`
/// - Inspect block balance only: `iat_timeline --summary`
struct IatTimelineCli {
    #[arg(long, help = "Deterministic seed override")]
    seed: Option<u64>,
    #[arg(long, value_enum, help = "Balancing policy for every block")]
    policy: Option<PolicyArg>,
    #[arg(long, value_enum, help = "Counterbalancing order")]
    order: Option<OrderArg>,
    #[arg(
        long,
        value_name = "PATH",
        help = "JSON experiment config; missing fields use the standard design"
    )]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        help = "Write JSON to this file instead of stdout"
    )]
    output: Option<PathBuf>,
    #[arg(
        long,
        help = "Print per-block balance instead of the timeline JSON"
    )]
    summary: bool,
}

/// Parse arguments, build the timeline, and emit it.
pub fn run_iat_timeline<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<IatTimelineCli, _>(
        std::iter::once("iat_timeline".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::from_json_path(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }
    if let Some(order) = cli.order {
        config.counterbalancing = match order {
            OrderArg::AFirst => Counterbalancing::AFirst,
            OrderArg::BFirst => Counterbalancing::BFirst,
            OrderArg::Random => Counterbalancing::choose(config.seed),
        };
    }

    let timeline = build_timeline(&config)?;

    if cli.summary {
        print_summary(config.seed, &timeline);
        return Ok(());
    }

    let export = TimelineExport::new(config.seed, timeline);
    match &cli.output {
        Some(path) => export.write_json(path)?,
        None => println!("{}", export.to_json()?),
    }
    Ok(())
}

fn print_summary(seed: u64, timeline: &Timeline) {
    println!("=== IAT timeline ===");
    println!("seed: {seed}");
    println!("policy: {:?}", timeline.policy);
    println!("order: {}", timeline.counterbalancing.condition_tag());
    println!("trials: {}", timeline.trial_count());
    println!();
    for block in &timeline.blocks {
        let records: Vec<_> = timeline.block_trials(&block.id).collect();
        match balance_summary(records.iter().copied()) {
            Some(summary) => println!(
                "  {:<24} trials={:<3} left={:<3} right={:<3} entries={:<2} per-entry={}..{}",
                block.id,
                summary.total,
                summary.sides.left,
                summary.sides.right,
                summary.distinct_entries,
                summary.min,
                summary.max
            ),
            None => println!("  {:<24} trials=0", block.id),
        }
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
