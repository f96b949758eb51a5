//! Command line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vocab_core::{Direction, EngineSettings};

#[derive(Debug, Parser)]
#[command(name = "vocab-drill", version, about = "Latvian-Dutch vocabulary drills")]
pub struct Cli {
    /// SQLite database holding progress, streak and leaderboard
    #[arg(long, global = true, env = "VOCAB_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Vocabulary catalog (.txt/.md entry format or .json)
    #[arg(long, global = true, env = "VOCAB_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Hour (UTC) at which a new study day begins
    #[arg(
        long,
        global = true,
        env = "VOCAB_DAILY_RESET_HOUR",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub daily_reset_hour: u32,

    /// Round size that drills the whole filtered catalog
    #[arg(long, global = true, env = "VOCAB_MARATHON_SIZE", default_value_t = 180)]
    pub marathon_size: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a review round
    Drill(DrillArgs),
    /// Show mastery and streak
    Stats,
    /// List catalog categories
    Categories,
    /// Show the marathon leaderboard
    Leaderboard,
    /// Forget all progress
    Reset {
        /// Also clear the leaderboard
        #[arg(long)]
        leaderboard: bool,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DrillArgs {
    /// lv-nl, nl-lv or lv-en (defaults to the last one used)
    #[arg(long, short)]
    pub direction: Option<Direction>,

    /// Items per round (defaults to the last one used)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,

    /// Restrict to a category; repeat for several
    #[arg(long = "category", short)]
    pub categories: Vec<String>,

    /// Start a new round even if one can be resumed
    #[arg(long)]
    pub fresh: bool,
}

impl Cli {
    /// Database path, falling back to the local data directory.
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            marathon_size: self.marathon_size,
            daily_reset_hour: self.daily_reset_hour,
            ..EngineSettings::default()
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-drill")
        .join("progress.db")
}
