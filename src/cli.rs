use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::settings::SpikeTiming;

#[derive(Parser, Debug)]
#[command(author, version, about = "Open Soup Rating - round impact based player rating")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Lookup tables and replay options shared by every computing command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct EngineArgs {
    /// Win probability table (defaults to $OSR_DATA_DIR/xvx_data.json)
    #[arg(long)]
    pub win_table: Option<PathBuf>,

    /// Economy matchup table (defaults to $OSR_DATA_DIR/loadout_cost_analysis.json)
    #[arg(long)]
    pub economy_table: Option<PathBuf>,

    /// When a plant starts to count for win probability lookups
    #[arg(long, value_enum, default_value_t = SpikeTiming::RoundWide)]
    pub spike_timing: SpikeTiming,

    /// Stop after loading this many matches from a directory
    #[arg(long)]
    pub max_matches: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Calculate player ratings from match logs
    Calculate {
        /// Match JSON file or directory of match files
        input: PathBuf,

        /// Output file (prints JSON to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component weights JSON
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Normalization parameters JSON
        #[arg(short, long)]
        normalization: Option<PathBuf>,

        /// Components to use (all when omitted)
        #[arg(short, long, num_args = 1..)]
        components: Vec<String>,

        /// Pretty print JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print raw component values per player-match
    Components {
        /// Match JSON file or directory of match files
        input: PathBuf,

        /// Output file (prints JSON to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Components to compute (all when omitted)
        #[arg(short, long, num_args = 1..)]
        components: Vec<String>,

        /// Pretty print JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Fit normalization parameters on a set of matches
    Fit {
        /// Match JSON file or directory of match files
        input: PathBuf,

        /// Component weights JSON
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Output file (prints JSON to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// List available rating components
    List,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
