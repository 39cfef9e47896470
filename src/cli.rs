use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ombros precipitation forecast verification.
#[derive(Parser)]
#[command(
    name = "ombros",
    version,
    about = "Verify precipitation forecasts against station observations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build one day's contingency tables under the calendar-day regime.
    Daily(DailyArgs),
    /// Build one day's contingency tables under the short-range rule.
    ShortRange(ShortRangeArgs),
    /// Compute verification scores over a date range.
    Scores(ScoresArgs),
}

/// Arguments for the `daily` subcommand.
#[derive(clap::Args)]
pub struct DailyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "ombros.toml")]
    pub config: PathBuf,

    /// Model code (e.g. gdps_ne36).
    #[arg(long)]
    pub model: String,

    /// Observation network code (asos/aws).
    #[arg(long)]
    pub obs: String,

    /// Target day, YYYYMMDD.
    #[arg(long = "target-date")]
    pub target_date: String,
}

/// Arguments for the `short-range` subcommand.
#[derive(clap::Args)]
pub struct ShortRangeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "ombros.toml")]
    pub config: PathBuf,

    /// Model code (must publish at least 72h of lead).
    #[arg(long)]
    pub model: String,

    /// Observation network code (asos/aws).
    #[arg(long)]
    pub obs: String,

    /// Target day, YYYYMMDD.
    #[arg(long = "target-date")]
    pub target_date: String,
}

/// Arguments for the `scores` subcommand.
#[derive(clap::Args)]
pub struct ScoresArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "ombros.toml")]
    pub config: PathBuf,

    /// Model code.
    #[arg(long)]
    pub model: String,

    /// Observation network code (asos/aws).
    #[arg(long)]
    pub obs: String,

    /// First day of the range, YYYYMMDD.
    #[arg(long = "start-date")]
    pub start_date: String,

    /// Last day of the range, YYYYMMDD.
    #[arg(long = "end-date")]
    pub end_date: String,

    /// Window length in hours.
    #[arg(long = "th-hour")]
    pub th_hour: i64,

    /// Threshold depth in millimetres.
    #[arg(long)]
    pub mm: f64,

    /// Largest window label to include.
    #[arg(long = "max-fcst-hour", default_value_t = 120)]
    pub max_fcst_hour: i64,

    /// Read the short-range databases instead of the calendar-day ones.
    #[arg(long = "short-range")]
    pub short_range: bool,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
