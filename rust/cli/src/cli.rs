//! Command-line definitions for the `quartet` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quartet", version, about = "Four-card discard patience: play, simulate, climb the tiers")]
pub struct QuartetCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a round interactively (or let the configured policy play it)
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Deck luckiness, 1.0 (neutral) to 1.25
        #[arg(long)]
        luck: Option<f64>,
        /// Seed from today's date and record as a daily challenge
        #[arg(long)]
        daily: bool,
        /// Let the autoplayer make every move
        #[arg(long)]
        auto: bool,
        /// Append the result to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Print a shuffled deck in draw order
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        luck: Option<f64>,
    },
    /// Print ChaCha20 samples for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play many rounds with an autoplayer and log the results
    Sim {
        #[arg(long)]
        rounds: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        luck: Option<f64>,
        #[arg(long)]
        policy: Option<String>,
        #[arg(long)]
        output: Option<String>,
        /// Continue an existing results file
        #[arg(long)]
        resume: Option<String>,
    },
    /// Run career entries against simulated rivals
    Career {
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// Each entry is a best-of-4
        #[arg(long)]
        ao3: bool,
        /// Enter this tier before playing
        #[arg(long)]
        tier: Option<String>,
        /// SQLite file holding career state (in-memory when omitted)
        #[arg(long)]
        db: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        policy: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Summarize result logs (.jsonl, .jsonl.zst or a directory)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Deal { .. } => "deal",
            Commands::Rng { .. } => "rng",
            Commands::Sim { .. } => "sim",
            Commands::Career { .. } => "career",
            Commands::Stats { .. } => "stats",
            Commands::Cfg => "cfg",
        }
    }
}

pub const COMMANDS: &[&str] = &["play", "deal", "rng", "sim", "career", "stats", "cfg"];
