//! `sim`: batch autoplay.
//!
//! Round `i` is dealt from seed `base + i`, so a results file can be resumed
//! and still match an uninterrupted run.
//!
//! # Environment Variables
//!
//! - `QUARTET_SIM_BREAK_AFTER`: stop after N new rounds and exit as interrupted (testing aid)

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use crate::validation::validate_luck;
use quartet_ai::{create_player, play_to_completion};
use quartet_engine::logger::{ResultCategory, ResultLogger, ResultRecord};
use quartet_engine::round::Round;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

const MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub rounds: u64,
    pub seed: Option<u64>,
    pub luck: f64,
    pub policy: String,
    pub output: Option<String>,
    pub resume: Option<String>,
}

#[derive(Debug, Default)]
struct Tally {
    rounds: u64,
    wins: u64,
    total_score: i64,
    best: Option<i32>,
}

impl Tally {
    fn add(&mut self, score: i32, won: bool) {
        self.rounds += 1;
        if won {
            self.wins += 1;
        }
        self.total_score += i64::from(score);
        self.best = Some(self.best.map_or(score, |b| b.min(score)));
    }

    fn mean(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.total_score as f64 / self.rounds as f64
        }
    }
}

pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
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
    let player = create_player(&opts.policy)?;

    let mut completed = 0u64;
    let mut path = opts.output.as_ref().map(PathBuf::from);

    if let Some(res) = opts.resume.as_ref() {
        let contents = std::fs::read_to_string(res).unwrap_or_default();
        let mut seen = HashSet::new();
        let mut dups = 0usize;
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            let Ok(rec) = serde_json::from_str::<ResultRecord>(line) else {
                continue;
            };
            if rec.result_id.is_empty() {
                continue;
            }
            if !seen.insert(rec.result_id) {
                dups += 1;
            }
        }
        completed = seen.len() as u64;
        path = Some(PathBuf::from(res));
        if dups > 0 {
            ui::display_warning(err, &format!("{} duplicate result_id(s) skipped", dups))?;
        }
        writeln!(out, "Resumed from {}", completed)?;
    }

    let mut logger = match &path {
        Some(p) => {
            if let Err(e) = ensure_parent_dir(p) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            match ResultLogger::append(p) {
                Ok(l) => Some(l),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open output file: {}", e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let break_after = std::env::var("QUARTET_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let base_seed = opts.seed.unwrap_or_else(rand::random);
    let mut tally = Tally::default();

    for i in completed..opts.rounds {
        if break_after.is_some_and(|n| tally.rounds >= n) {
            writeln!(
                out,
                "Interrupted: saved {}/{}",
                completed + tally.rounds,
                opts.rounds
            )?;
            return Err(CliError::Interrupted(format!(
                "stopped after {} rounds",
                completed + tally.rounds
            )));
        }
        let seed = base_seed.wrapping_add(i);
        let mut round = Round::start(Some(seed), luck);
        let steps = play_to_completion(&mut round, player.as_ref(), MAX_STEPS);
        let record = ResultRecord::from_round(ResultCategory::PracticeSingles, &round)
            .with_extra("policy", player.name())
            .with_extra("luck", luck)
            .with_extra("steps", steps as u64);
        if let Some(l) = logger.as_mut() {
            l.write(&record)?;
        }
        tally.add(record.score, record.won);
    }
    tracing::info!(rounds = tally.rounds, wins = tally.wins, "simulation finished");

    writeln!(
        out,
        "Simulated: {} rounds (policy={} seed={} luck={})",
        tally.rounds,
        player.name(),
        base_seed,
        luck
    )?;
    if tally.rounds > 0 {
        writeln!(out, "Wins: {}", tally.wins)?;
        writeln!(out, "Mean score: {:.2}", tally.mean())?;
        if let Some(best) = tally.best {
            writeln!(out, "Best score: {}", best)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(rounds: u64) -> SimOptions {
        SimOptions {
            rounds,
            seed: Some(7),
            luck: 1.0,
            policy: "baseline".into(),
            output: None,
            resume: None,
        }
    }

    #[test]
    fn zero_rounds_is_an_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_sim_command(&opts(0), &mut out, &mut err);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn summary_is_deterministic() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(&opts(5), &mut a, &mut err).unwrap();
        handle_sim_command(&opts(5), &mut b, &mut err).unwrap();
        assert_eq!(a, b);
        let s = String::from_utf8(a).unwrap();
        assert!(s.contains("Simulated: 5 rounds"));
        assert!(s.contains("Mean score:"));
    }

    #[test]
    fn tally_tracks_best_and_mean() {
        let mut t = Tally::default();
        t.add(10, false);
        t.add(-10, true);
        assert_eq!(t.best, Some(-10));
        assert_eq!(t.mean(), 0.0);
        assert_eq!(t.wins, 1);
    }
}
