//! A player's career: rounds are played, standings simulated, form and tier
//! updated, then results persisted through injected stores and sinks.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use quartet_engine::logger::{ResultCategory, ResultRecord, ResultSink};
use quartet_engine::round::Round;

use crate::error::CareerError;
use crate::form::FormMeter;
use crate::progression::{best_of_four, Ao3Aggregate, Career, RoundSummary, AO3_ROUNDS};
use crate::rival::{Rival, RivalBank, INITIAL_RIVALS, MIN_STORED_RIVALS};
use crate::simulation::{simulate_round, Standings};
use crate::store::CareerStore;
use crate::tier::Tier;

/// Outcome of one competitive entry (a single round or a best-of-4).
#[derive(Debug, Clone, Serialize)]
pub struct CareerReport {
    pub tier: Tier,
    pub score: i32,
    pub won: bool,
    pub standings: Standings,
    pub form_delta: i32,
    pub form: u8,
    pub advanced_to: Option<Tier>,
    pub ao3: Option<Ao3Aggregate>,
}

impl CareerReport {
    pub fn placement(&self) -> usize {
        self.standings.placement
    }
}

/// Collects the rounds of a best-of-4 entry.
#[derive(Debug, Clone, Default)]
pub struct Ao3Session {
    rounds: Vec<RoundSummary>,
}

impl Ao3Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished round. Extra rounds past the fourth are ignored by the aggregate.
    pub fn push(&mut self, round: &Round) -> Result<(), CareerError> {
        if !round.is_over() {
            return Err(CareerError::RoundInProgress);
        }
        self.push_summary(RoundSummary {
            score: round.calculate_score(),
            won: round.is_won(),
        });
        Ok(())
    }

    pub fn push_summary(&mut self, summary: RoundSummary) {
        self.rounds.push(summary);
    }

    pub fn rounds(&self) -> &[RoundSummary] {
        &self.rounds
    }

    pub fn is_complete(&self) -> bool {
        self.rounds.len() >= AO3_ROUNDS
    }

    pub fn aggregate(&self) -> Result<Ao3Aggregate, CareerError> {
        best_of_four(&self.rounds)
    }
}

pub struct CareerSession<S: CareerStore, R: ResultSink> {
    player_id: String,
    player_name: String,
    career: Career,
    rivals: Vec<Rival>,
    adaptive: bool,
    rng: ChaCha20Rng,
    store: S,
    sink: R,
}

impl<S: CareerStore, R: ResultSink> CareerSession<S, R> {
    /// Loads form and rivals for `player_id`, generating a fresh rival pool
    /// when fewer than [`MIN_STORED_RIVALS`] are stored. `seed` drives rival
    /// generation and simulation.
    pub fn new(player_id: &str, player_name: &str, mut store: S, sink: R, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let form = match store.get_form_meter(player_id) {
            Ok(v) => FormMeter::new(v),
            Err(e) => {
                tracing::warn!(error = %e, player_id, "failed to load form meter");
                FormMeter::default()
            }
        };
        let stored = match store.load_rivals(player_id) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, player_id, "failed to load rivals");
                None
            }
        };
        let rivals = match stored {
            Some(r) if r.len() >= MIN_STORED_RIVALS => r,
            _ => {
                let fresh = RivalBank::default().generate(INITIAL_RIVALS, &mut rng);
                if let Err(e) = store.save_rivals(player_id, &fresh) {
                    tracing::warn!(error = %e, player_id, "failed to save rivals");
                }
                fresh
            }
        };
        Self {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            career: Career::new(form),
            rivals,
            adaptive: true,
            rng,
            store,
            sink,
        }
    }

    /// Resumes previously saved progress. The stored form meter wins over
    /// the one carried in `career`.
    pub fn with_career(mut self, mut career: Career) -> Self {
        career.form = self.career.form;
        self.career = career;
        self
    }

    /// When disabled every round is dealt at neutral luckiness.
    pub fn set_adaptive(&mut self, adaptive: bool) {
        self.adaptive = adaptive;
    }

    pub fn luckiness(&self) -> f64 {
        if self.adaptive {
            self.career.luckiness()
        } else {
            1.0
        }
    }

    pub fn start_round(&self, seed: Option<u64>) -> Round {
        Round::start(seed, self.luckiness())
    }

    pub fn enter_tier(&mut self, tier: Tier) -> Result<(), CareerError> {
        self.career.enter(tier)
    }

    /// Scores a finished single round against the current tier.
    pub fn finish_round(&mut self, round: &Round) -> Result<CareerReport, CareerError> {
        if !round.is_over() {
            return Err(CareerError::RoundInProgress);
        }
        let score = round.calculate_score();
        let won = round.is_won();
        let report = self.compete(score, won, None);
        let record = ResultRecord::from_round(ResultCategory::CareerSingles, round);
        self.persist(&report, record);
        Ok(report)
    }

    /// Scores a completed best-of-4. The ranking score is the rounded
    /// average of the best three; any won round counts as a win.
    pub fn finish_ao3(&mut self, ao3: &Ao3Session) -> Result<CareerReport, CareerError> {
        let agg = ao3.aggregate()?;
        let score = agg.ranking_score();
        let won = agg.wins > 0;
        let report = self.compete(score, won, Some(agg.clone()));
        let record = ResultRecord::new(ResultCategory::CareerAo3, score, won)
            .with_extra("average", agg.average)
            .with_extra("wins", agg.wins as u64)
            .with_extra("counted", agg.counted.to_vec());
        self.persist(&report, record);
        Ok(report)
    }

    fn compete(&mut self, score: i32, won: bool, ao3: Option<Ao3Aggregate>) -> CareerReport {
        let tier = self.career.tier;
        let standings = simulate_round(tier, &self.rivals, &self.player_name, score, won, &mut self.rng);
        let form_delta = self
            .career
            .record_placement(standings.placement, standings.total_players(), won);
        let advanced_to = self.career.advance_tier_if_eligible();
        CareerReport {
            tier,
            score,
            won,
            standings,
            form_delta,
            form: self.career.form.value(),
            advanced_to,
            ao3,
        }
    }

    fn persist(&mut self, report: &CareerReport, record: ResultRecord) {
        if let Err(e) = self.store.set_form_meter(&self.player_id, report.form) {
            tracing::warn!(error = %e, player_id = %self.player_id, "failed to save form meter");
        }
        let record = record
            .with_extra("tier", report.tier.as_str())
            .with_extra("placement", report.placement() as u64)
            .with_extra("players", report.standings.total_players() as u64);
        self.sink.record_result(&record);
    }

    pub fn career(&self) -> &Career {
        &self.career
    }

    pub fn rivals(&self) -> &[Rival] {
        &self.rivals
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_parts(self) -> (Career, S, R) {
        (self.career, self.store, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use quartet_engine::logger::MemorySink;

    #[test]
    fn unfinished_round_is_rejected() {
        let mut session = CareerSession::new("p", "You", MemoryStore::new(), MemorySink::default(), 1);
        let round = session.start_round(Some(3));
        assert_eq!(session.finish_round(&round).unwrap_err(), CareerError::RoundInProgress);
        assert!(session.sink().records.is_empty());
    }

    #[test]
    fn non_adaptive_sessions_deal_neutral_decks() {
        let mut store = MemoryStore::new();
        crate::store::FormMeterStore::set_form_meter(&mut store, "p", 100).unwrap();
        let mut session = CareerSession::new("p", "You", store, MemorySink::default(), 1);
        assert!((session.luckiness() - 1.15).abs() < 1e-12);
        session.set_adaptive(false);
        assert_eq!(session.luckiness(), 1.0);
    }
}
