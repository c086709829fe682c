use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jobtrend")]
#[command(about = "Keyword trends across daily job-listing snapshots")]
#[command(version)]
pub struct Cli {
    /// Snapshot directory (overrides the datapath environment variable)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Show load timing and memory usage
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List loaded snapshot dates with their job totals
    Days(DaysArgs),

    /// Count keyword matches per day over a date range
    Series(SeriesArgs),

    /// List the configured keywords
    Terms,
}

#[derive(Parser)]
pub struct DaysArgs {
    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SeriesArgs {
    /// First day to include, YYYY-MM-DD (defaults to the earliest snapshot)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include, YYYY-MM-DD (defaults to the latest snapshot)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Keywords to count (defaults to every configured keyword)
    #[arg(long, value_delimiter = ',')]
    pub terms: Option<Vec<String>>,

    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
