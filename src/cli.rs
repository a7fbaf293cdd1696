//! Command-line interface for the daily gym.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// One gym leader a day, fought with three rental creatures
#[derive(Parser, Debug)]
#[command(name = "daily-gym")]
#[command(about = "Daily gym leader challenge with rental teams")]
#[command(version)]
pub struct Args {
    /// Engine config file (RON). Defaults are used when it doesn't exist.
    #[arg(long, global = true, value_name = "CONFIG_FILE", default_value = "data/config.ron")]
    pub config: PathBuf,

    /// Shift today's date by this many days
    #[arg(long, global = true, default_value_t = 0, allow_hyphen_values = true)]
    pub day_offset: i64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a day's leader, rentals and the time until the next challenge
    Challenge {
        /// KST calendar date to show instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Fight today's gym leader
    Battle {
        /// Rental numbers to pick, 1-based, e.g. 1,4,5
        #[arg(long, value_delimiter = ',')]
        picks: Vec<usize>,

        /// Choose moves at random instead of reading them from stdin
        #[arg(long)]
        auto: bool,

        /// Print narration without pacing delays
        #[arg(long)]
        instant: bool,
    },
}

pub fn parse_args() -> Args {
    Args::parse()
}
