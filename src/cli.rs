//! Command-line interface.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Running-best leaderboard views from timestamped competition submissions.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Apply one filter state and write report files
    Run(RunArgs),
    /// Stream a JSON view per control event read from stdin
    Watch(WatchArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InputArgs {
    /// Submissions table (csv/tsv, optionally .gz)
    #[arg(long, value_name = "FILE", env = "LEADERBOARD_INPUT")]
    pub input: PathBuf,

    /// JSON profile overriding baseline, colors and control steps
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for reports
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Day cutoff (inclusive); defaults to the profile's initial day
    #[arg(long, value_name = "DAYS")]
    pub day: Option<f64>,

    /// Score cutoff (exclusive); defaults to the baseline
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub score: Option<f64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
