//! `career`: play entries against simulated rivals and climb the tiers.
//!
//! Career state (form meter, rival pool, tier progress) is kept in a SQLite
//! file when `--db` is given; otherwise it lives only for this run.

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::store::SqliteStore;
use crate::ui;
use crate::validation::parse_tier;
use quartet_ai::{Autoplayer, create_player, play_to_completion};
use quartet_career::progression::AO3_ROUNDS;
use quartet_career::session::{Ao3Session, CareerReport, CareerSession};
use quartet_engine::logger::{ResultLogger, ResultRecord, ResultSink};
use quartet_engine::round::Round;
use std::io::Write;
use std::path::Path;

const MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct CareerOptions {
    pub rounds: u32,
    pub ao3: bool,
    pub tier: Option<String>,
    pub db: Option<String>,
    pub seed: Option<u64>,
    pub policy: String,
    pub player_name: String,
    pub adaptive: bool,
    pub output: Option<String>,
}

/// Results go to a JSONL file when one was requested, otherwise nowhere.
enum ResultOutput {
    File(ResultLogger),
    Discard,
}

impl ResultSink for ResultOutput {
    fn record_result(&mut self, record: &ResultRecord) {
        if let ResultOutput::File(logger) = self {
            logger.record_result(record);
        }
    }
}

pub fn handle_career_command(
    opts: &CareerOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let target_tier = match opts.tier.as_deref().map(parse_tier).transpose() {
        Ok(t) => t,
        Err(e) => {
            ui::write_error(err, &e)?;
            return Err(CliError::InvalidInput(e));
        }
    };
    let player = create_player(&opts.policy)?;

    let store = match &opts.db {
        Some(p) => {
            if let Err(e) = ensure_parent_dir(Path::new(p)) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            SqliteStore::open(p)?
        }
        None => SqliteStore::open_in_memory()?,
    };
    let player_id = opts.player_name.trim().to_lowercase();
    let saved = match store.load_career(&player_id) {
        Ok(c) => c,
        Err(e) => {
            ui::display_warning(err, &format!("ignoring saved career: {}", e))?;
            None
        }
    };

    let sink = match &opts.output {
        Some(p) => {
            if let Err(e) = ensure_parent_dir(Path::new(p)) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            ResultOutput::File(ResultLogger::append(p)?)
        }
        None => ResultOutput::Discard,
    };

    let base_seed = opts.seed.unwrap_or_else(rand::random);
    let mut session = CareerSession::new(&player_id, &opts.player_name, store, sink, base_seed);
    if let Some(c) = saved {
        session = session.with_career(c);
    }
    session.set_adaptive(opts.adaptive);

    if let Some(tier) = target_tier {
        if let Err(e) = session.enter_tier(tier) {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    }

    writeln!(
        out,
        "career: player={} tier={} form={} mode={}",
        opts.player_name,
        session.career().tier,
        session.career().form.value(),
        if opts.ao3 { "ao3" } else { "singles" }
    )?;

    let mut next_seed = base_seed;
    for entry in 1..=opts.rounds {
        let report = if opts.ao3 {
            let mut ao3 = Ao3Session::new();
            for _ in 0..AO3_ROUNDS {
                next_seed = next_seed.wrapping_add(1);
                let round = play_round(&session, player.as_ref(), next_seed);
                ao3.push(&round)?;
            }
            session.finish_ao3(&ao3)?
        } else {
            next_seed = next_seed.wrapping_add(1);
            let round = play_round(&session, player.as_ref(), next_seed);
            session.finish_round(&round)?
        };
        write_report(out, entry, &report)?;
    }

    let (career, mut store, _) = session.into_parts();
    if let Err(e) = store.save_career(&player_id, &career) {
        tracing::warn!(error = %e, player_id = %player_id, "failed to save career");
        ui::display_warning(err, &format!("career progress not saved: {}", e))?;
    }
    writeln!(
        out,
        "Career: tier={} highest={} form={}",
        career.tier,
        career.highest_tier,
        career.form.value()
    )?;
    Ok(())
}

fn play_round<S, R>(session: &CareerSession<S, R>, player: &dyn Autoplayer, seed: u64) -> Round
where
    S: quartet_career::CareerStore,
    R: ResultSink,
{
    let mut round = session.start_round(Some(seed));
    play_to_completion(&mut round, player, MAX_STEPS);
    round
}

fn write_report(out: &mut dyn Write, entry: u32, report: &CareerReport) -> Result<(), CliError> {
    let score = match &report.ao3 {
        Some(agg) => format!("{:.2} (best three of {:?}, dropped {})", agg.average, agg.counted, agg.dropped),
        None => report.score.to_string(),
    };
    writeln!(
        out,
        "Entry {}: tier={} score={} placement={}/{} form={} ({:+})",
        entry,
        report.tier,
        score,
        report.placement(),
        report.standings.total_players(),
        report.form,
        report.form_delta
    )?;
    if let Some(t) = report.advanced_to {
        writeln!(out, "Advanced to {}!", t)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CareerOptions {
        CareerOptions {
            rounds: 2,
            ao3: false,
            tier: None,
            db: None,
            seed: Some(11),
            policy: "baseline".into(),
            player_name: "You".into(),
            adaptive: true,
            output: None,
        }
    }

    #[test]
    fn singles_print_one_line_per_entry() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_career_command(&opts(), &mut out, &mut err).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.matches("Entry ").count(), 2);
        assert!(s.contains("placement="));
        assert!(s.contains("Career: tier="));
    }

    #[test]
    fn locked_tier_is_refused() {
        let mut o = opts();
        o.tier = Some("global".into());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_career_command(&o, &mut out, &mut err);
        assert!(result.is_err());
        assert!(String::from_utf8(err).unwrap().contains("locked"));
    }

    #[test]
    fn ao3_entries_report_the_average() {
        let mut o = opts();
        o.rounds = 1;
        o.ao3 = true;
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_career_command(&o, &mut out, &mut err).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("best three of"));
    }
}
