//! # Play Command
//!
//! One round of patience on the terminal. In human mode each line read from
//! stdin is a command (`d`, `x`, `u`, `e`, `q`); in auto mode the configured
//! autoplayer picks every move. Finished rounds can be appended to a results
//! file. Quitting early records nothing.

use crate::error::CliError;
use crate::formatters::{format_outcome, format_round_status};
use crate::io_utils::{ensure_parent_dir, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, parse_play_input, validate_luck};
use chrono::{Datelike, NaiveDate, Utc};
use quartet_ai::create_player;
use quartet_engine::logger::{ResultCategory, ResultLogger, ResultRecord};
use quartet_engine::round::Round;
use std::io::{BufRead, Write};
use std::path::Path;

/// Auto mode gives up and ends the round after this many actions.
const MAX_AUTO_STEPS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub luck: f64,
    pub daily: bool,
    pub auto: bool,
    pub policy: String,
    pub output: Option<String>,
}

/// Daily challenge seed: the date read as a `YYYYMMDD` number.
///
/// ```rust
/// use chrono::NaiveDate;
/// # use quartet_cli::commands::play::daily_seed;
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(daily_seed(date), 20261019);
/// ```
pub fn daily_seed(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

pub fn handle_play_command(
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let (luck, clamped) = match validate_luck(opts.luck) {
        Ok(v) => v,
        Err(e) => {
            ui::write_error(err, &e)?;
            return Err(CliError::InvalidInput(e));
        }
    };
    if clamped {
        ui::display_warning(err, &format!("luckiness {} is clamped to 1.0..=1.25", luck))?;
    }
    if opts.daily && opts.seed.is_some() {
        ui::display_warning(err, "--seed is ignored for the daily challenge")?;
    }
    let seed = if opts.daily {
        daily_seed(Utc::now().date_naive())
    } else {
        opts.seed.unwrap_or_else(rand::random)
    };
    let player = if opts.auto {
        Some(create_player(&opts.policy)?)
    } else {
        None
    };

    writeln!(
        out,
        "play: seed={} luck={} mode={}",
        seed,
        luck,
        player.as_ref().map(|p| p.name()).unwrap_or("human")
    )?;

    let mut round = Round::start(Some(seed), luck);
    writeln!(out, "{}", format_round_status(&round))?;
    let mut steps = 0usize;

    while !round.is_over() {
        let action = match &player {
            Some(p) => {
                if steps >= MAX_AUTO_STEPS {
                    ui::display_warning(err, "step limit reached, ending the round")?;
                    round.end_game();
                    break;
                }
                p.choose(&round)
            }
            None => {
                ui::write_prompt(out)?;
                let Some(line) = read_stdin_line(stdin) else {
                    writeln!(out)?;
                    writeln!(out, "Round abandoned.")?;
                    return Ok(());
                };
                match parse_play_input(&line) {
                    ParseResult::Action(a) => a,
                    ParseResult::Quit => {
                        writeln!(out, "Round abandoned.")?;
                        return Ok(());
                    }
                    ParseResult::Invalid(msg) => {
                        ui::write_error(err, &msg)?;
                        continue;
                    }
                }
            }
        };
        steps += 1;
        let outcome = round.apply(action);
        tracing::trace!(?action, ?outcome, "play step");
        writeln!(out, "  {}", format_outcome(&outcome))?;
        if !round.is_over() {
            writeln!(out, "{}", format_round_status(&round))?;
        }
    }

    writeln!(
        out,
        "Result: {} score={} clears={} undos={}",
        if round.is_won() { "won" } else { "lost" },
        round.calculate_score(),
        round.clear_count(),
        round.undos_used()
    )?;

    if let Some(path) = &opts.output {
        let category = if opts.daily {
            ResultCategory::PracticeDaily
        } else {
            ResultCategory::PracticeSingles
        };
        let mut record = ResultRecord::from_round(category, &round).with_extra("luck", luck);
        if let Some(p) = &player {
            record = record.with_extra("policy", p.name());
        }
        append_record(Path::new(path), &record, err)?;
        writeln!(out, "Saved result to {}", path)?;
    }
    Ok(())
}

pub(crate) fn append_record(
    path: &Path,
    record: &ResultRecord,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let Err(e) = ensure_parent_dir(path) {
        ui::write_error(err, &e)?;
        return Err(CliError::Io(std::io::Error::other(e)));
    }
    let mut logger = match ResultLogger::append(path) {
        Ok(l) => l,
        Err(e) => {
            ui::write_error(err, &format!("Failed to open output file: {}", e))?;
            return Err(CliError::Io(e));
        }
    };
    logger.write(record)?;
    Ok(())
}
