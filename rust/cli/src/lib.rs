//! # Quartet CLI Library
//!
//! Command-line front end for the quartet patience engine: interactive play,
//! batch simulation, career runs against simulated rivals, result statistics
//! and configuration inspection.
//!
//! The entry point is [`run`], which parses arguments, resolves the layered
//! configuration and dispatches to a `handle_<name>_command` function.
//!
//! ```
//! use std::io;
//! let args = vec!["quartet", "deal", "--seed", "42"];
//! let code = quartet_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: play a round on stdin, or watch the autoplayer play it
//! - `deal`: print a shuffled deck in draw order
//! - `rng`: print ChaCha20 samples for a seed
//! - `sim`: autoplay many rounds and append results to a JSONL log
//! - `career`: play entries against simulated rivals, persisting to SQLite
//! - `stats`: summarize result logs
//! - `cfg`: show the resolved configuration and value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{COMMANDS, Commands, QuartetCli};
use commands::{
    CareerOptions, PlayOptions, SimOptions, handle_career_command, handle_cfg_command,
    handle_deal_command, handle_play_command, handle_rng_command, handle_sim_command,
    handle_stats_command,
};

pub use error::CliError;

/// Parses `args` and runs the selected subcommand.
///
/// Returns `0` on success, `2` on errors and `130` when a run was interrupted.
/// Flags take precedence over the configuration file and `QUARTET_*`
/// environment variables.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match QuartetCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: quartet <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: quartet --help");
            return exit_code::ERROR;
        }
    };

    let name = cli.cmd.name();
    tracing::debug!(command = name, "dispatching");
    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(command = name, error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    if let Commands::Cfg = cmd {
        return handle_cfg_command(out, err);
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;

    match cmd {
        Commands::Play {
            seed,
            luck,
            daily,
            auto,
            output,
        } => {
            let opts = PlayOptions {
                seed: seed.or(cfg.seed),
                luck: luck.unwrap_or(cfg.luckiness),
                daily,
                auto,
                policy: cfg.policy,
                output,
            };
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&opts, out, err, &mut stdin_lock)
        }
        Commands::Deal { seed, luck } => {
            handle_deal_command(seed.or(cfg.seed), luck.unwrap_or(cfg.luckiness), out, err)
        }
        Commands::Rng { seed } => handle_rng_command(seed.or(cfg.seed), out),
        Commands::Sim {
            rounds,
            seed,
            luck,
            policy,
            output,
            resume,
        } => {
            let opts = SimOptions {
                rounds,
                seed: seed.or(cfg.seed),
                luck: luck.unwrap_or(cfg.luckiness),
                policy: policy.unwrap_or(cfg.policy),
                output,
                resume,
            };
            handle_sim_command(&opts, out, err)
        }
        Commands::Career {
            rounds,
            ao3,
            tier,
            db,
            seed,
            policy,
            output,
        } => {
            let opts = CareerOptions {
                rounds,
                ao3,
                tier,
                db,
                seed: seed.or(cfg.seed),
                policy: policy.unwrap_or(cfg.policy),
                player_name: cfg.player_name,
                adaptive: cfg.adaptive,
                output,
            };
            handle_career_command(&opts, out, err)
        }
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    }
}
